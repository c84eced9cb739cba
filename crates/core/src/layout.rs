//! Mansion layout generation: one room per endpoint, packed into a square-ish
//! grid of 3x3 pockets joined by 2-tile corridors. Pure and deterministic —
//! the same endpoint list always yields the same mansion.

use thiserror::Error;

use crate::collection::Endpoint;
use crate::state::{Map, Room};
use crate::tuning::{ROOM_POCKET, ROOM_STRIDE};
use crate::types::{Pos, TileKind};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("cannot generate a mansion from an empty endpoint list")]
    EmptyCollection,
}

#[derive(Debug)]
pub struct Mansion {
    pub map: Map,
    /// One room per endpoint, in input order. The first room is the spawn.
    pub rooms: Vec<Room>,
}

pub fn generate_mansion(endpoints: &[Endpoint]) -> Result<Mansion, LayoutError> {
    if endpoints.is_empty() {
        return Err(LayoutError::EmptyCollection);
    }

    let count = endpoints.len();
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let width = cols * ROOM_STRIDE + 2;
    let height = rows * ROOM_STRIDE + 2;

    let mut map = Map::filled(width, height, TileKind::Wall);
    let mut rooms = Vec::with_capacity(count);

    for (index, endpoint) in endpoints.iter().enumerate() {
        let col = index % cols;
        let row = index / cols;
        let room_x = (col * ROOM_STRIDE + 1) as i32;
        let room_y = (row * ROOM_STRIDE + 1) as i32;

        for y in room_y..room_y + ROOM_POCKET as i32 {
            for x in room_x..room_x + ROOM_POCKET as i32 {
                map.set_tile(Pos { y, x }, TileKind::Floor);
            }
        }
        let center = Pos { y: room_y + 1, x: room_x + 1 };
        map.set_tile(center, TileKind::RoomCell);

        if col < cols - 1 {
            map.set_tile(Pos { y: room_y + 1, x: room_x + 3 }, TileKind::Floor);
            map.set_tile(Pos { y: room_y + 1, x: room_x + 4 }, TileKind::Floor);
        }
        if row < rows - 1 {
            map.set_tile(Pos { y: room_y + 3, x: room_x + 1 }, TileKind::Floor);
            map.set_tile(Pos { y: room_y + 4, x: room_x + 1 }, TileKind::Floor);
        }

        rooms.push(Room {
            endpoint_id: endpoint.id.clone(),
            cell: center,
            endpoint: endpoint.clone(),
            visited: false,
            has_collectible: true,
            monster: None,
        });
    }

    Ok(Mansion { map, rooms })
}
