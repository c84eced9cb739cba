//! Canonical game state: the map, the rooms, the player, and the one
//! pending request. Mutated only through the `Game` transition functions.

use slotmap::SlotMap;

use crate::collection::Endpoint;
use crate::gateway::{ApiError, ApiResponse};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
}

impl Map {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Out-of-bounds reads as wall, so edge collisions need no special case.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Wall
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// Spawned by a failed request; roams until the session ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub pos: Vec2,
    pub error: ErrorCode,
    pub active: bool,
    pub speed: f32,
}

/// One endpoint's room. Created at layout time, never destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub endpoint_id: String,
    pub cell: Pos,
    pub endpoint: Endpoint,
    pub visited: bool,
    pub has_collectible: bool,
    pub monster: Option<Monster>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub lives: u32,
    pub collected: u32,
    pub flashlight_on: bool,
    pub invincible: bool,
    pub invincible_until_ms: u64,
    pub power_up: Option<PowerUp>,
    pub power_up_until_ms: u64,
    pub combo: u32,
    pub last_collect_ms: Option<u64>,
}

/// The single outstanding gateway call, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub room: RoomId,
    pub loading: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransientMessage {
    pub text: String,
    pub until_ms: u64,
}

pub struct GameState {
    pub map: Map,
    pub rooms: SlotMap<RoomId, Room>,
    /// Room keys in endpoint input order, for stable iteration and hashing.
    pub room_order: Vec<RoomId>,
    pub player: Player,
    pub pending_request: Option<PendingRequest>,
    pub last_response: Option<ApiResponse>,
    pub last_error: Option<ApiError>,
    pub score: u64,
    pub game_over: bool,
    pub victory: bool,
    pub screen_shake: f32,
    pub monsters_frozen: bool,
    pub freeze_until_ms: u64,
    /// Set by the reveal power-up; forces the effective flashlight on
    /// without touching the player's own toggle.
    pub flashlight_forced: bool,
    pub flashlight_forced_until_ms: u64,
    pub difficulty: f32,
    pub elapsed_secs: f32,
    pub message: Option<TransientMessage>,
}

impl GameState {
    pub fn terminal(&self) -> bool {
        self.game_over || self.victory
    }

    pub fn room_at(&self, cell: Pos) -> Option<RoomId> {
        self.rooms.iter().find(|(_, room)| room.cell == cell).map(|(id, _)| id)
    }

    /// What the renderer should treat the flashlight as.
    pub fn effective_flashlight(&self) -> bool {
        self.player.flashlight_on || self.flashlight_forced
    }

    pub fn collectibles_remaining(&self) -> usize {
        self.rooms.iter().filter(|(_, room)| room.has_collectible).count()
    }
}
