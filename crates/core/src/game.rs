//! The game owner: seed, clock, rng, state, and the three mutation paths
//! (player intents, the tick advance, gateway resolution). Submodules hold
//! one path each; everything else in the crate only reads snapshots.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use slotmap::SlotMap;

use crate::collection::Collection;
use crate::gateway::{
    ApiError, ApiResponse, RequestOutcome, RequestTicket, Resolution, base_speed, classify_error,
};
use crate::layout::{self, LayoutError};
use crate::state::{GameState, Monster, PendingRequest, Player, TransientMessage};
use crate::tuning::*;
use crate::types::*;

mod advance;
mod intents;
mod requests;


/// A power-up won on a combo, waiting out its short grant delay.
#[derive(Clone, Copy, Debug)]
struct PendingGrant {
    kind: PowerUp,
    grant_at_ms: u64,
}

pub struct Game {
    seed: u64,
    tick: u64,
    /// Tick-derived clock. Advances by `TICK_MS` per `advance()`; every
    /// timer in the state is a deadline against this, never the wall clock.
    now_ms: u64,
    rng: ChaCha8Rng,
    state: GameState,
    events: Vec<GameEvent>,
    cues: Vec<AudioCue>,
    last_move_ms: Option<u64>,
    pending_power_up: Option<PendingGrant>,
}

impl Game {
    pub fn new(collection: &Collection, seed: u64) -> Result<Self, LayoutError> {
        let mansion = layout::generate_mansion(&collection.endpoints)?;

        let mut rooms = SlotMap::with_key();
        let mut room_order = Vec::with_capacity(mansion.rooms.len());
        for room in mansion.rooms {
            room_order.push(rooms.insert(room));
        }
        let spawn = rooms[room_order[0]].cell;

        let player = Player {
            pos: Vec2::from(spawn),
            lives: STARTING_LIVES,
            collected: 0,
            flashlight_on: false,
            invincible: false,
            invincible_until_ms: 0,
            power_up: None,
            power_up_until_ms: 0,
            combo: 0,
            last_collect_ms: None,
        };

        let state = GameState {
            map: mansion.map,
            rooms,
            room_order,
            player,
            pending_request: None,
            last_response: None,
            last_error: None,
            score: 0,
            game_over: false,
            victory: false,
            screen_shake: 0.0,
            monsters_frozen: false,
            freeze_until_ms: 0,
            flashlight_forced: false,
            flashlight_forced_until_ms: 0,
            difficulty: 1.0,
            elapsed_secs: 0.0,
            message: Some(TransientMessage {
                text: "Find every collectible to escape the manor!".to_string(),
                until_ms: OPENING_MESSAGE_MS,
            }),
        };

        Ok(Self {
            seed,
            tick: 0,
            now_ms: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state,
            events: Vec::new(),
            cues: Vec::new(),
            last_move_ms: None,
            pending_power_up: None,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Read-only snapshot for presentation layers.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand the queued audio cues to their consumer, clearing the queue.
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.state.player.pos.x.to_bits());
        hasher.write_u32(self.state.player.pos.y.to_bits());
        hasher.write_u32(self.state.player.lives);
        hasher.write_u32(self.state.player.combo);
        hasher.write_u64(self.state.score);
        hasher.write_u8(self.state.game_over as u8);
        hasher.write_u8(self.state.victory as u8);
        for &room_id in &self.state.room_order {
            let room = &self.state.rooms[room_id];
            hasher.write_u8(room.visited as u8);
            hasher.write_u8(room.has_collectible as u8);
            if let Some(monster) = &room.monster {
                hasher.write_u8(monster.kind as u8);
                hasher.write_u32(monster.pos.x.to_bits());
                hasher.write_u32(monster.pos.y.to_bits());
            }
        }
        hasher.finish()
    }

    fn cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }

    fn show_message(&mut self, text: impl Into<String>, duration_ms: u64) {
        self.state.message =
            Some(TransientMessage { text: text.into(), until_ms: self.now_ms + duration_ms });
    }

    fn combo_window_open(&self) -> bool {
        match self.state.player.last_collect_ms {
            Some(at) => self.now_ms.saturating_sub(at) < COMBO_WINDOW_MS,
            None => false,
        }
    }

    fn roll_unit(&mut self) -> f32 {
        self.rng.next_u32() as f32 / u32::MAX as f32
    }

    fn roll_power_up(&mut self) -> PowerUp {
        PowerUp::ALL[(self.rng.next_u32() % PowerUp::ALL.len() as u32) as usize]
    }
}
