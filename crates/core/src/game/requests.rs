//! Folding asynchronous gateway resolutions back into the simulation.
//!
//! Many ticks and moves may have elapsed since the ticket was issued, so
//! every merge targets *current* state, keyed by room id. A resolution that
//! arrives after the run ended keeps the books straight but never revives
//! gameplay.

use super::*;

impl Game {
    pub fn resolve_request(&mut self, resolution: Resolution) {
        let Resolution { room: room_id, outcome } = resolution;

        if self.state.pending_request.map(|pending| pending.room) == Some(room_id) {
            self.state.pending_request = None;
        }
        if !self.state.rooms.contains_key(room_id) {
            return;
        }

        if self.state.terminal() {
            self.merge_after_end(room_id, outcome);
            return;
        }

        match outcome {
            RequestOutcome::Success(response) => self.resolve_success(room_id, response),
            RequestOutcome::Failure(error) => self.resolve_failure(room_id, error),
        }
    }

    /// Room bookkeeping only: no score, no combo, no cues, and the terminal
    /// flags stay exactly as they are.
    fn merge_after_end(&mut self, room_id: RoomId, outcome: RequestOutcome) {
        let room = &mut self.state.rooms[room_id];
        room.visited = true;
        match outcome {
            RequestOutcome::Success(response) => {
                room.has_collectible = false;
                self.state.last_response = Some(response);
                self.state.last_error = None;
            }
            RequestOutcome::Failure(error) => {
                self.state.last_error = Some(error);
                self.state.last_response = None;
            }
        }
    }

    fn resolve_success(&mut self, room_id: RoomId, response: ApiResponse) {
        let already_collected = {
            let room = &mut self.state.rooms[room_id];
            let was_visited = room.visited;
            room.visited = true;
            room.has_collectible = false;
            was_visited
        };
        self.state.last_response = Some(response);
        self.state.last_error = None;
        if already_collected {
            return;
        }

        self.cue(AudioCue::Success);

        let combo = if self.combo_window_open() { self.state.player.combo + 1 } else { 1 };
        self.state.player.combo = combo;
        self.state.player.last_collect_ms = Some(self.now_ms);

        let multiplier = u64::from(combo.min(COMBO_MULTIPLIER_CAP));
        let time_bonus = TIME_BONUS_CAP.saturating_sub(self.state.elapsed_secs as u64);
        let points = (BASE_SCORE + time_bonus) * multiplier;
        self.state.score += points;
        self.state.player.collected += 1;
        self.events.push(GameEvent::Collected { room: room_id, points, combo });

        let mut bonus_label = "";
        if combo >= POWER_UP_COMBO_MIN && self.roll_unit() < POWER_UP_CHANCE {
            let kind = self.roll_power_up();
            self.pending_power_up =
                Some(PendingGrant { kind, grant_at_ms: self.now_ms + POWER_UP_GRANT_DELAY_MS });
            bonus_label = " + POWER-UP!";
        }

        if self.state.player.collected as usize == self.state.room_order.len() {
            self.state.victory = true;
            self.cue(AudioCue::Victory);
            self.events.push(GameEvent::Victory);
            self.show_message("VICTORY! You escaped!", TERMINAL_MESSAGE_MS);
        } else if combo > 1 {
            self.show_message(
                format!("+{points} points! {combo}x COMBO!{bonus_label}"),
                MESSAGE_MS,
            );
        } else {
            self.show_message(format!("+{points} points!"), MESSAGE_MS);
        }
    }

    fn resolve_failure(&mut self, room_id: RoomId, error: ApiError) {
        let code = error.error_code();
        let kind = classify_error(code);
        let difficulty = self.state.difficulty;

        {
            let room = &mut self.state.rooms[room_id];
            room.visited = true;
            if room.monster.is_none() {
                room.monster = Some(Monster {
                    kind,
                    pos: Vec2::from(room.cell),
                    error: code,
                    active: true,
                    speed: base_speed(code) * difficulty,
                });
            }
        }

        let label = match code {
            ErrorCode::Timeout => "timeout".to_string(),
            ErrorCode::Status(status) => status.to_string(),
        };
        self.state.player.combo = 0;
        self.state.last_error = Some(error);
        self.state.last_response = None;
        self.cue(AudioCue::Error);
        self.cue(AudioCue::Monster);
        self.events.push(GameEvent::MonsterSpawned { room: room_id, kind });
        self.show_message(format!("{label}: a monster now haunts that room!"), MESSAGE_MS);
    }
}
