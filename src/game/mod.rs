//! Client side of a single game.
//!
//! This module holds what the session core calls but does not decide:
//!
//! - `client` - The [`SessionClient`] capability set and its [`GameClient`] implementation
//! - `coordinate` - Parsing and validation of board cells
//! - `board` - Text rendering of the own and target boards
//! - `accuracy` - Hit/miss tally of our shots
//! - `input` - Line reader over standard input

mod accuracy;
mod board;
mod client;
mod coordinate;
mod input;

pub use crate::game::accuracy::AccuracyCounter;
#[cfg(test)]
pub use crate::game::client::MockSessionClient;
pub use crate::game::client::{GameClient, SessionClient};
pub use crate::game::coordinate::Coordinate;
#[cfg(test)]
pub use crate::game::input::MockLineReader;
pub use crate::game::input::StdinReader;
