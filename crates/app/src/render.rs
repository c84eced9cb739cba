//! Read-only snapshot rendering: tiles, rooms, monsters, the player, the
//! flashlight falloff, and the HUD. Nothing in here mutates game state.

use macroquad::prelude::*;
use manor_core::GameState;
use manor_core::types::{MonsterKind, Pos, TileKind, Vec2};

use crate::hud;

const BACKGROUND: Color = Color { r: 0.02, g: 0.01, b: 0.04, a: 1.0 };
const WALL: Color = Color { r: 0.16, g: 0.10, b: 0.22, a: 1.0 };
const FLOOR: Color = Color { r: 0.07, g: 0.06, b: 0.10, a: 1.0 };
const ROOM_MARKER: Color = Color { r: 0.22, g: 0.16, b: 0.10, a: 1.0 };
const COLLECTIBLE: Color = Color { r: 0.95, g: 0.80, b: 0.25, a: 1.0 };
const VISITED_MARKER: Color = Color { r: 0.28, g: 0.28, b: 0.34, a: 1.0 };
const PLAYER: Color = Color { r: 0.95, g: 0.55, b: 0.15, a: 1.0 };
const HUD_TEXT: Color = Color { r: 0.85, g: 0.85, b: 0.90, a: 1.0 };
const MESSAGE_TEXT: Color = Color { r: 1.0, g: 0.95, b: 0.75, a: 1.0 };

const HUD_HEIGHT: f32 = 64.0;
const LIGHT_RADIUS: f32 = 3.5;

pub fn draw_frame(state: &GameState) {
    clear_background(BACKGROUND);

    let scale = tile_scale(state);
    let (shake_x, shake_y) = shake_offset(state.screen_shake);
    let origin = (shake_x, HUD_HEIGHT + shake_y);

    draw_tiles(state, scale, origin);
    draw_rooms(state, scale, origin);
    draw_monsters(state, scale, origin);
    draw_player(state, scale, origin);
    if !state.effective_flashlight() {
        draw_darkness(state, scale, origin);
    }
    draw_hud(state);
}

fn tile_scale(state: &GameState) -> f32 {
    let map_w = state.map.width as f32;
    let map_h = state.map.height as f32;
    (screen_width() / map_w).min((screen_height() - HUD_HEIGHT) / map_h)
}

fn shake_offset(magnitude: f32) -> (f32, f32) {
    if magnitude <= 0.0 {
        return (0.0, 0.0);
    }
    let t = get_time() as f32 * 40.0;
    (t.sin() * magnitude * 0.3, (t * 1.3).cos() * magnitude * 0.3)
}

fn draw_tiles(state: &GameState, scale: f32, origin: (f32, f32)) {
    for y in 0..state.map.height as i32 {
        for x in 0..state.map.width as i32 {
            let color = match state.map.tile_at(Pos { y, x }) {
                TileKind::Wall => WALL,
                TileKind::Floor => FLOOR,
                TileKind::RoomCell => ROOM_MARKER,
            };
            draw_rectangle(
                origin.0 + x as f32 * scale,
                origin.1 + y as f32 * scale,
                scale,
                scale,
                color,
            );
        }
    }
}

fn draw_rooms(state: &GameState, scale: f32, origin: (f32, f32)) {
    for &room_id in &state.room_order {
        let room = &state.rooms[room_id];
        let center_x = origin.0 + (room.cell.x as f32 + 0.5) * scale;
        let center_y = origin.1 + (room.cell.y as f32 + 0.5) * scale;
        if room.has_collectible && !room.visited {
            draw_rectangle(
                center_x - scale * 0.2,
                center_y - scale * 0.2,
                scale * 0.4,
                scale * 0.4,
                COLLECTIBLE,
            );
        } else if room.visited && !room.has_collectible {
            draw_rectangle_lines(
                center_x - scale * 0.2,
                center_y - scale * 0.2,
                scale * 0.4,
                scale * 0.4,
                2.0,
                VISITED_MARKER,
            );
        }
    }
}

fn monster_color(kind: MonsterKind) -> Color {
    match kind {
        MonsterKind::Ghost => Color { r: 0.90, g: 0.92, b: 1.00, a: 0.9 },
        MonsterKind::Demon => Color { r: 0.90, g: 0.15, b: 0.10, a: 1.0 },
        MonsterKind::Zombie => Color { r: 0.35, g: 0.75, b: 0.25, a: 1.0 },
        MonsterKind::Vampire => Color { r: 0.55, g: 0.15, b: 0.60, a: 1.0 },
        MonsterKind::Wraith => Color { r: 0.55, g: 0.75, b: 0.90, a: 0.8 },
    }
}

fn draw_monsters(state: &GameState, scale: f32, origin: (f32, f32)) {
    for &room_id in &state.room_order {
        let Some(monster) = &state.rooms[room_id].monster else { continue };
        if !monster.active {
            continue;
        }
        let mut color = monster_color(monster.kind);
        if state.monsters_frozen {
            color.a *= 0.5;
        }
        draw_circle(
            origin.0 + (monster.pos.x + 0.5) * scale,
            origin.1 + (monster.pos.y + 0.5) * scale,
            scale * 0.38,
            color,
        );
    }
}

fn draw_player(state: &GameState, scale: f32, origin: (f32, f32)) {
    // Blink while invincible so the grace window reads on screen.
    if state.player.invincible && (get_time() * 8.0) as u64 % 2 == 0 {
        return;
    }
    draw_circle(
        origin.0 + (state.player.pos.x + 0.5) * scale,
        origin.1 + (state.player.pos.y + 0.5) * scale,
        scale * 0.3,
        PLAYER,
    );
}

/// Flashlight-off gloom: tiles fade with distance from the player.
fn draw_darkness(state: &GameState, scale: f32, origin: (f32, f32)) {
    let player = state.player.pos;
    for y in 0..state.map.height as i32 {
        for x in 0..state.map.width as i32 {
            let center = Vec2::new(x as f32, y as f32);
            let distance = center.distance(player);
            if distance <= LIGHT_RADIUS {
                continue;
            }
            let alpha = ((distance - LIGHT_RADIUS) * 0.45).min(0.92);
            draw_rectangle(
                origin.0 + x as f32 * scale,
                origin.1 + y as f32 * scale,
                scale,
                scale,
                Color { r: 0.0, g: 0.0, b: 0.0, a: alpha },
            );
        }
    }
}

fn draw_hud(state: &GameState) {
    draw_text(&hud::status_line(state), 12.0, 24.0, 20.0, HUD_TEXT);
    draw_text(&hud::collectible_line(state), 12.0, 46.0, 20.0, HUD_TEXT);
    if let Some(line) = hud::pending_line(state) {
        let width = measure_text(&line, None, 20, 1.0).width;
        draw_text(&line, screen_width() - width - 12.0, 24.0, 20.0, HUD_TEXT);
    }

    if let Some(message) = &state.message {
        let width = measure_text(&message.text, None, 24, 1.0).width;
        draw_text(
            &message.text,
            (screen_width() - width) / 2.0,
            HUD_HEIGHT + 28.0,
            24.0,
            MESSAGE_TEXT,
        );
    }

    if let Some(banner) = hud::banner(state) {
        let width = measure_text(banner, None, 64, 1.0).width;
        draw_text(
            banner,
            (screen_width() - width) / 2.0,
            screen_height() / 2.0,
            64.0,
            MESSAGE_TEXT,
        );
    }
}
