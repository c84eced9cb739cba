//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

/// Held movement keys in a fixed order; the core's move cooldown decides
/// which of these intents actually land.
const MOVE_KEYS: [(KeyCode, KeyCode, (i32, i32)); 4] = [
    (KeyCode::Up, KeyCode::W, (0, -1)),
    (KeyCode::Down, KeyCode::S, (0, 1)),
    (KeyCode::Left, KeyCode::A, (-1, 0)),
    (KeyCode::Right, KeyCode::D, (1, 0)),
];

#[derive(Default)]
pub struct FrameInput {
    pub moves: Vec<(i32, i32)>,
    pub toggle_flashlight: bool,
    pub quit: bool,
}

pub fn capture_frame_input() -> FrameInput {
    let mut moves = Vec::with_capacity(2);
    for (arrow, letter, dir) in MOVE_KEYS {
        if is_key_down(arrow) || is_key_down(letter) {
            moves.push(dir);
        }
    }

    FrameInput {
        moves,
        toggle_flashlight: is_key_pressed(KeyCode::F),
        quit: is_key_pressed(KeyCode::Escape),
    }
}
