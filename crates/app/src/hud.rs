//! HUD text, kept free of drawing calls so it can be asserted on.

use manor_core::GameState;

pub fn status_line(state: &GameState) -> String {
    format!(
        "Score {}   Lives {}   Combo x{}   Difficulty x{:.1}",
        state.score, state.player.lives, state.player.combo, state.difficulty
    )
}

pub fn collectible_line(state: &GameState) -> String {
    format!("Collectibles {}/{}", state.player.collected, state.room_order.len())
}

/// Shown while a request is in flight.
pub fn pending_line(state: &GameState) -> Option<String> {
    let pending = state.pending_request?;
    let room = state.rooms.get(pending.room)?;
    Some(format!("Testing {} ...", room.endpoint.name))
}

pub fn banner(state: &GameState) -> Option<&'static str> {
    if state.victory {
        Some("VICTORY!")
    } else if state.game_over {
        Some("GAME OVER")
    } else {
        None
    }
}
