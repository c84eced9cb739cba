pub mod collection;
pub mod game;
pub mod gateway;
pub mod layout;
pub mod state;
pub mod tuning;
pub mod types;

pub use collection::{AuthConfig, Collection, CollectionError, Endpoint, HttpMethod};
pub use game::Game;
pub use gateway::{ApiError, ApiResponse, RequestOutcome, RequestTicket, Resolution};
pub use layout::{LayoutError, Mansion, generate_mansion};
pub use state::{GameState, Map, Monster, PendingRequest, Player, Room};
pub use types::*;
