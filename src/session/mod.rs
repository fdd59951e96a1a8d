//! Game session orchestration.
//!
//! This module drives one game from opponent selection to the final outcome.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────┐
//!            │     App      │  ← one instance per game cycle
//!            └──────────────┘
//!      ┌────────────┼──────────────────┐
//!      ▼            ▼                  ▼
//! ┌──────────┐ ┌──────────────┐ ┌───────────────┐
//! │Discovery │ │ StatusMachine│ │TokenRefresher │
//! │ (5s tick)│ │  (1s polls)  │ │  (10s tick)   │
//! └──────────┘ └──────────────┘ └───────────────┘
//!      ▲            │  play_turn        ▲
//!      └── Stopper ─┴─────── Stopper ───┘
//! ```
//!
//! - `app` - [`App`], sequencing selection, nick check, init and the status loop
//! - `discovery` - Background refresh of the waiting opponents list
//! - `refresh` - Background refresh of the session token
//! - `status` - Status polling state machine
//! - `turn` - Prompting and firing while our shots hit
//! - `stopper` - Non-blocking stop signals for the background loops
//! - `messages` - User facing texts
//! - `stats` - Leaderboard and player statistics queries

mod app;
mod discovery;
mod messages;
mod refresh;
mod stats;
mod status;
mod stopper;
#[cfg(test)]
mod testing;
mod turn;

use std::io;

pub use crate::session::app::App;
pub use crate::session::messages::format_restart;
pub use crate::session::stats::{show_player_statistics, show_top_statistics};

use crate::{
    settings::Settings,
    warships::{GameStatus, InitGameRequest, RequestError},
};

/// Errors that can end a game cycle.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The command-line settings are inconsistent.
    #[error("invalid settings: {0}")]
    Validation(String),

    /// The server answered with a non-success HTTP status.
    #[error("server responded with status {status_code}")]
    Server {
        /// HTTP status code returned by the server
        status_code: u16,
    },

    /// Network failure, timeout or undecodable response.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// An authenticated call happened without session token.
    #[error("no session token, the game is not initialized")]
    MissingToken,

    /// Another waiting player already uses our nickname.
    #[error("nick {0} is not available")]
    NickUnavailable(String),

    /// Reading user input failed.
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    /// User input reached its end.
    #[error("input closed")]
    InputClosed,

    /// The server sent something the client cannot interpret.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// A running game failed: its polls, reveal or shots were refused.
    #[error("game failed: {0}")]
    GameFailed(#[source] Box<SessionError>),
}

impl SessionError {
    /// Whether the process must stop instead of starting a new game cycle.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            SessionError::NickUnavailable(_) | SessionError::Server { .. }
        )
    }

    /// Makes the error fatal, for failures past the game initialization.
    ///
    /// Server errors are only recoverable while registering a match; once a
    /// game runs they end the process.
    pub fn into_fatal(self) -> Self {
        if self.is_fatal() {
            self
        } else {
            SessionError::GameFailed(Box::new(self))
        }
    }
}

impl From<RequestError> for SessionError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Transport(e) => SessionError::Transport(e),
            RequestError::Server { status_code } => SessionError::Server { status_code },
            RequestError::MissingToken => SessionError::MissingToken,
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => SessionError::InputClosed,
            _ => SessionError::Input(error),
        }
    }
}

/// State of the game played by one [`App`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Own nickname
    pub nick: String,
    /// Own description
    pub desc: String,
    /// Challenged opponent, chosen on the command line or through discovery
    pub target_nick: Option<String>,
    /// Whether the opponent is the server bot
    pub wpbot: bool,
    /// Last status seen by the status machine
    pub status: GameStatus,
}

impl Session {
    /// Creates the session described by the command-line settings.
    pub fn new(settings: &Settings) -> Self {
        Session {
            nick: settings.nick.clone(),
            desc: settings.desc.clone(),
            target_nick: settings.target_nick.clone(),
            wpbot: settings.wpbot,
            status: GameStatus::Waiting,
        }
    }

    /// Body registering this session's match.
    pub fn init_request(&self) -> InitGameRequest {
        InitGameRequest {
            nick: self.nick.clone(),
            desc: self.desc.clone(),
            target_nick: self.target_nick.clone(),
            wpbot: self.wpbot,
        }
    }
}
