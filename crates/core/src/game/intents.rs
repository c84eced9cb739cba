//! Player-intent transitions: movement, flashlight, damage, power-ups.

use super::*;

impl Game {
    /// Step the player one cell. No-op when the run is over, the move is
    /// still on cooldown, or the destination is a wall.
    pub fn move_player(&mut self, dx: i32, dy: i32) {
        if self.state.terminal() {
            return;
        }
        let cooldown = if matches!(self.state.player.power_up, Some(PowerUp::Speed)) {
            MOVE_COOLDOWN_SPEED_MS
        } else {
            MOVE_COOLDOWN_MS
        };
        if let Some(last) = self.last_move_ms
            && self.now_ms.saturating_sub(last) < cooldown
        {
            return;
        }

        let next = Vec2 {
            x: self.state.player.pos.x + dx as f32,
            y: self.state.player.pos.y + dy as f32,
        };
        if self.state.map.is_wall(next.cell()) {
            return;
        }

        self.last_move_ms = Some(self.now_ms);
        self.cue(AudioCue::Move);
        if !self.combo_window_open() {
            self.state.player.combo = 0;
        }
        self.state.player.pos = next;
    }

    /// Flip the flashlight. Presentation-only except for the reveal
    /// power-up, which forces the effective light on regardless.
    pub fn toggle_flashlight(&mut self) {
        self.state.player.flashlight_on = !self.state.player.flashlight_on;
        self.cue(AudioCue::Flashlight);
    }

    /// The one damage transition, shared by the tick-loop contact check and
    /// external callers. Ignored while invincible or shielded.
    pub fn take_damage(&mut self) {
        if self.state.terminal() {
            return;
        }
        if self.state.player.invincible
            || matches!(self.state.player.power_up, Some(PowerUp::Shield))
        {
            return;
        }

        self.state.player.lives = self.state.player.lives.saturating_sub(1);
        self.cue(AudioCue::Error);

        if self.state.player.lives == 0 {
            self.state.game_over = true;
            self.state.screen_shake = SHAKE_GAME_OVER;
            self.show_message("GAME OVER!", TERMINAL_MESSAGE_MS);
            self.events.push(GameEvent::GameOver);
            return;
        }

        let lives = self.state.player.lives;
        self.state.player.invincible = true;
        self.state.player.invincible_until_ms = self.now_ms + INVINCIBILITY_MS;
        self.state.player.combo = 0;
        self.state.screen_shake = SHAKE_HIT;
        let noun = if lives == 1 { "life" } else { "lives" };
        self.show_message(format!("Ouch! {lives} {noun} left!"), MESSAGE_MS);
        self.events.push(GameEvent::DamageTaken { lives_left: lives });
    }

    /// Put a power-up in the active slot and apply its immediate effect.
    /// Expiry is handled by the tick advance, not a detached timer.
    pub fn activate_power_up(&mut self, kind: PowerUp) {
        if self.state.terminal() {
            return;
        }

        self.cue(AudioCue::PowerUp);
        self.state.player.power_up = Some(kind);
        self.state.player.power_up_until_ms = self.now_ms + POWER_UP_MS;
        self.events.push(GameEvent::PowerUpGranted { kind });

        match kind {
            PowerUp::Speed => {
                self.show_message("SPEED BOOST!", MESSAGE_MS);
            }
            PowerUp::Shield => {
                self.state.player.invincible = true;
                self.state.player.invincible_until_ms = self.now_ms + POWER_UP_MS;
                self.show_message("SHIELD ACTIVE!", MESSAGE_MS);
            }
            PowerUp::Freeze => {
                self.state.monsters_frozen = true;
                self.state.freeze_until_ms = self.now_ms + FREEZE_MS;
                self.show_message("MONSTERS FROZEN!", MESSAGE_MS);
            }
            PowerUp::Reveal => {
                self.state.flashlight_forced = true;
                self.state.flashlight_forced_until_ms = self.now_ms + POWER_UP_MS;
                self.show_message("ALL REVEALED!", MESSAGE_MS);
            }
        }
    }
}
