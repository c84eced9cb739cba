use slotmap::new_key_type;

new_key_type! {
    pub struct RoomId;
}

/// Discrete map cell, y-major to match the tile storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Continuous position in grid units. Movement and chase distances are
/// floating point; only wall checks discretize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The grid cell this position falls in.
    pub fn cell(self) -> Pos {
        Pos { y: self.y.floor() as i32, x: self.x.floor() as i32 }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<Pos> for Vec2 {
    fn from(pos: Pos) -> Self {
        Self { x: pos.x as f32, y: pos.y as f32 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    /// Center tile of a room pocket; walkable, triggers the entry check.
    RoomCell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Ghost,
    Demon,
    Zombie,
    Vampire,
    Wraith,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUp {
    Speed,
    Shield,
    Freeze,
    Reveal,
}

impl PowerUp {
    pub const ALL: [PowerUp; 4] = [PowerUp::Speed, PowerUp::Shield, PowerUp::Freeze, PowerUp::Reveal];
}

/// Classification key for a failed request: an HTTP status, or the timeout
/// sentinel which has no status at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Status(u16),
    Timeout,
}

/// Discrete triggers for the audio layer. Fired as things happen, never
/// derived by polling state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Move,
    Flashlight,
    EnterRoom,
    Success,
    Error,
    Monster,
    PowerUp,
    Victory,
}

/// Inspectable record of what the simulation did, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    RoomEntered { room: RoomId },
    Collected { room: RoomId, points: u64, combo: u32 },
    MonsterSpawned { room: RoomId, kind: MonsterKind },
    DamageTaken { lives_left: u32 },
    PowerUpGranted { kind: PowerUp },
    GameOver,
    Victory,
}
