//! The fixed-rate tick: timers, difficulty, monster chase, room entry.

use super::*;
use rand_chacha::rand_core::Rng;

impl Game {
    /// Advance the simulation by one fixed tick. Returns a ticket when this
    /// tick's room-entry check issued a new gateway call; at most one call
    /// is ever outstanding, so at most one ticket per tick.
    pub fn advance(&mut self) -> Option<RequestTicket> {
        self.tick += 1;
        self.now_ms += TICK_MS;

        self.decay_screen_shake();
        self.expire_deadlines();
        self.grant_due_power_up();

        self.state.elapsed_secs = self.now_ms as f32 / 1000.0;
        self.state.difficulty = difficulty_for(self.now_ms);

        self.chase_player();
        self.check_room_entry()
    }

    fn decay_screen_shake(&mut self) {
        let decayed = self.state.screen_shake * SHAKE_DECAY;
        self.state.screen_shake = if decayed < SHAKE_FLOOR { 0.0 } else { decayed };
    }

    fn expire_deadlines(&mut self) {
        let now = self.now_ms;
        let player = &mut self.state.player;
        if player.invincible && now >= player.invincible_until_ms {
            player.invincible = false;
        }
        if player.power_up.is_some() && now >= player.power_up_until_ms {
            player.power_up = None;
            // The slot clearing also drops any freeze still riding on it.
            self.state.monsters_frozen = false;
        }
        if self.state.monsters_frozen && now >= self.state.freeze_until_ms {
            self.state.monsters_frozen = false;
        }
        if self.state.flashlight_forced && now >= self.state.flashlight_forced_until_ms {
            self.state.flashlight_forced = false;
        }
        if let Some(message) = &self.state.message
            && now >= message.until_ms
        {
            self.state.message = None;
        }
    }

    fn grant_due_power_up(&mut self) {
        if let Some(grant) = self.pending_power_up
            && self.now_ms >= grant.grant_at_ms
        {
            self.pending_power_up = None;
            self.activate_power_up(grant.kind);
        }
    }

    /// Move every active monster toward the player, with a little jitter so
    /// paths stay unpredictable. Contact flags a hit; the hit is applied
    /// through the damage transition at most once per tick, no matter how
    /// many monsters are touching.
    fn chase_player(&mut self) {
        if self.state.monsters_frozen {
            return;
        }

        let player_pos = self.state.player.pos;
        let invincible = self.state.player.invincible;
        let difficulty = self.state.difficulty;
        let mut hit = false;

        let Game { state, rng, .. } = self;
        for (_, room) in state.rooms.iter_mut() {
            let Some(monster) = room.monster.as_mut() else { continue };
            if !monster.active {
                continue;
            }

            let dx = player_pos.x - monster.pos.x;
            let dy = player_pos.y - monster.pos.y;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance < CONTACT_RADIUS && !invincible {
                hit = true;
            }
            if distance > CHASE_EPSILON {
                let step = monster.speed * difficulty * CHASE_FACTOR;
                monster.pos.x += dx / distance * step + jitter(rng);
                monster.pos.y += dy / distance * step + jitter(rng);
            }
        }

        if hit {
            self.take_damage();
        }
    }

    /// Issue a gateway call when the player stands on an unvisited room and
    /// nothing is in flight. The pending slot is the structural guarantee
    /// that no second call starts while one is outstanding.
    fn check_room_entry(&mut self) -> Option<RequestTicket> {
        if self.state.terminal() || self.state.pending_request.is_some() {
            return None;
        }
        let room_id = self.state.room_at(self.state.player.pos.cell())?;
        let room = &self.state.rooms[room_id];
        if room.visited {
            return None;
        }

        let ticket = RequestTicket { room: room_id, endpoint: room.endpoint.clone() };
        self.state.pending_request = Some(PendingRequest { room: room_id, loading: true });
        self.cue(AudioCue::EnterRoom);
        self.events.push(GameEvent::RoomEntered { room: room_id });
        Some(ticket)
    }
}

fn difficulty_for(now_ms: u64) -> f32 {
    1.0 + (now_ms / 1000 / DIFFICULTY_STEP_SECS) as f32 * DIFFICULTY_STEP
}

fn jitter(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u32() as f32 / u32::MAX as f32 - 0.5) * (2.0 * CHASE_JITTER)
}
