//! Request-gateway contract shared by the simulation and its drivers.
//!
//! The simulation never performs a network call itself. Entering a room
//! yields a [`RequestTicket`]; a driver runs the call and hands back a
//! [`Resolution`], which the game merges defensively by room id. Keeping
//! these types here lets the whole simulation be tested without an HTTP
//! stack in sight.

use std::collections::BTreeMap;

use crate::collection::Endpoint;
use crate::types::{ErrorCode, MonsterKind, RoomId};

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
    pub timestamp_ms: u64,
}

/// Normalized failure value. Every gateway failure mode ends up here; none
/// of them ever surface as a panic or an unhandled error in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
    pub timeout: bool,
}

impl ApiError {
    /// Classification key for monster spawning. A failure without a status
    /// (connection refused, DNS) haunts like a server error.
    pub fn error_code(&self) -> ErrorCode {
        if self.timeout {
            ErrorCode::Timeout
        } else {
            ErrorCode::Status(self.status.unwrap_or(500))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestOutcome {
    Success(ApiResponse),
    Failure(ApiError),
}

/// Work order handed to a gateway driver when the player enters a room.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestTicket {
    pub room: RoomId,
    pub endpoint: Endpoint,
}

/// A finished gateway call travelling back to the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub room: RoomId,
    pub outcome: RequestOutcome,
}

pub fn classify_error(code: ErrorCode) -> MonsterKind {
    match code {
        ErrorCode::Timeout => MonsterKind::Wraith,
        ErrorCode::Status(status) if status >= 500 => MonsterKind::Demon,
        ErrorCode::Status(404) => MonsterKind::Ghost,
        ErrorCode::Status(401) => MonsterKind::Zombie,
        ErrorCode::Status(403) => MonsterKind::Vampire,
        ErrorCode::Status(_) => MonsterKind::Ghost,
    }
}

/// Base chase speed before difficulty scaling. Wraiths drift, demons sprint.
pub fn base_speed(code: ErrorCode) -> f32 {
    match code {
        ErrorCode::Timeout => 0.5,
        ErrorCode::Status(status) if status >= 500 => 1.5,
        ErrorCode::Status(404) => 1.2,
        ErrorCode::Status(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification_matches_the_bestiary() {
        assert_eq!(classify_error(ErrorCode::Timeout), MonsterKind::Wraith);
        assert_eq!(classify_error(ErrorCode::Status(404)), MonsterKind::Ghost);
        assert_eq!(classify_error(ErrorCode::Status(500)), MonsterKind::Demon);
        assert_eq!(classify_error(ErrorCode::Status(503)), MonsterKind::Demon);
        assert_eq!(classify_error(ErrorCode::Status(401)), MonsterKind::Zombie);
        assert_eq!(classify_error(ErrorCode::Status(403)), MonsterKind::Vampire);
        assert_eq!(classify_error(ErrorCode::Status(418)), MonsterKind::Ghost);
    }

    #[test]
    fn base_speeds_order_by_severity() {
        assert_eq!(base_speed(ErrorCode::Timeout), 0.5);
        assert_eq!(base_speed(ErrorCode::Status(500)), 1.5);
        assert_eq!(base_speed(ErrorCode::Status(404)), 1.2);
        assert_eq!(base_speed(ErrorCode::Status(401)), 1.0);
        assert_eq!(base_speed(ErrorCode::Status(403)), 1.0);
    }

    #[test]
    fn statusless_failures_classify_as_server_errors() {
        let error = ApiError {
            message: "connection refused".to_string(),
            status: None,
            code: None,
            timeout: false,
        };
        assert_eq!(error.error_code(), ErrorCode::Status(500));
        assert_eq!(classify_error(error.error_code()), MonsterKind::Demon);
    }

    #[test]
    fn timeout_flag_wins_over_status() {
        let error = ApiError {
            message: "Request timeout".to_string(),
            status: Some(404),
            code: Some("timeout".to_string()),
            timeout: true,
        };
        assert_eq!(error.error_code(), ErrorCode::Timeout);
    }
}
