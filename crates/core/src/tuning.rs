//! Gameplay constants. Times are milliseconds on the tick-derived clock,
//! distances are grid units.

pub const TICK_HZ: u64 = 30;
pub const TICK_MS: u64 = 1000 / TICK_HZ;

pub const STARTING_LIVES: u32 = 3;

pub const MOVE_COOLDOWN_MS: u64 = 120;
pub const MOVE_COOLDOWN_SPEED_MS: u64 = 80;

pub const COMBO_WINDOW_MS: u64 = 3_000;
pub const COMBO_MULTIPLIER_CAP: u32 = 5;

pub const INVINCIBILITY_MS: u64 = 2_000;
pub const POWER_UP_MS: u64 = 5_000;
pub const FREEZE_MS: u64 = 3_000;
pub const POWER_UP_GRANT_DELAY_MS: u64 = 100;
pub const POWER_UP_COMBO_MIN: u32 = 3;
pub const POWER_UP_CHANCE: f32 = 0.2;

pub const MESSAGE_MS: u64 = 2_000;
pub const OPENING_MESSAGE_MS: u64 = 3_000;
pub const TERMINAL_MESSAGE_MS: u64 = 5_000;

pub const CONTACT_RADIUS: f32 = 0.8;
pub const CHASE_EPSILON: f32 = 0.1;
pub const CHASE_FACTOR: f32 = 0.03;
pub const CHASE_JITTER: f32 = 0.01;

pub const SHAKE_DECAY: f32 = 0.9;
pub const SHAKE_FLOOR: f32 = 0.5;
pub const SHAKE_HIT: f32 = 10.0;
pub const SHAKE_GAME_OVER: f32 = 20.0;

pub const DIFFICULTY_STEP_SECS: u64 = 30;
pub const DIFFICULTY_STEP: f32 = 0.2;

pub const BASE_SCORE: u64 = 100;
pub const TIME_BONUS_CAP: u64 = 50;

/// Tile pitch of one room cell in the generated layout: a 3x3 floor pocket
/// plus a 2-tile corridor gap.
pub const ROOM_STRIDE: usize = 5;
pub const ROOM_POCKET: usize = 3;
