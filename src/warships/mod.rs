//! Warships game server integration and API client.
//!
//! This module provides the HTTP layer talking to the warships server: it
//! registers matches, polls their status, fires shots and reads the lobby and
//! the leaderboard.
//!
//! # Modules
//!
//! - `requester` - HTTP client making the API requests and owning the session token
//! - `request_structs` - Bodies sent to the server
//! - `response_structs` - JSON payloads returned by the server
//! - `structs` - Domain representation of statuses, opponents and shots

mod request_structs;
mod requester;
mod response_structs;
mod structs;

pub use crate::warships::request_structs::InitGameRequest;
#[cfg(test)]
pub use crate::warships::requester::MockRequester;
pub use crate::warships::requester::{Requester, WarshipsRequester};
pub use crate::warships::response_structs::{
    FireResponse, LobbyEntry, PlayerStatistics, StatusResponse,
};
pub use crate::warships::structs::{
    GameOutcome, GameStatus, GameStatusSnapshot, Opponent, OpponentStatus, ShotResult,
};

/// Errors that can occur while talking to the warships server.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request could not be sent or its response could not be decoded.
    ///
    /// Covers connection failures, client timeouts and malformed JSON bodies.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("server responded with status {status_code}")]
    Server {
        /// HTTP status code returned by the server
        status_code: u16,
    },

    /// An authenticated endpoint was called before a game was initialized.
    #[error("no session token, the game is not initialized")]
    MissingToken,
}
