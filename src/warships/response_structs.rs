//! Response structures for warships API endpoints.
//!
//! This module contains structures for deserializing JSON responses from
//! the warships server API.

use serde::Deserialize;
use std::fmt;

/// Game status from `GET /api/game` and `GET /api/game/desc`.
///
/// The description endpoint returns the same shape with the descriptions
/// filled in.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StatusResponse {
    /// Own description
    pub desc: String,
    /// `waiting`, `game_in_progress` or `ended`
    pub game_status: String,
    /// `win`, `lose` or `abandoned` once a game ended
    pub last_game_status: String,
    /// Own nickname
    pub nick: String,
    /// Opponent description
    pub opp_desc: String,
    /// Cells targeted by the opponent so far
    pub opp_shots: Vec<String>,
    /// Opponent nickname
    pub opponent: String,
    /// Whether it is our turn to shoot
    pub should_fire: bool,
    /// Seconds left to play the current turn
    pub timer: u32,
}

impl fmt::Display for StatusResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "game_status={}, last_game_status={}, opponent={}, should_fire={}, timer={}, opp_shots={:?}",
            self.game_status,
            self.last_game_status,
            self.opponent,
            self.should_fire,
            self.timer,
            self.opp_shots
        )
    }
}

/// Board layout from `GET /api/game/board`.
#[derive(Deserialize, Debug)]
pub struct BoardResponse {
    /// Cells occupied by own ships
    pub board: Vec<String>,
}

/// Shot result from `POST /api/game/fire`.
#[derive(Deserialize, Debug)]
pub struct FireResponse {
    /// `hit`, `sunk` or `miss`
    pub result: String,
}

/// Player listed by `GET /api/lobby`.
#[derive(Deserialize, Debug, Clone)]
pub struct LobbyEntry {
    /// Player nickname
    pub nick: String,
    /// `waiting` when the player can be challenged
    pub game_status: String,
}

impl fmt::Display for LobbyEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "nick={}, game_status={}", self.nick, self.game_status)
    }
}

/// Statistics of one player from `GET /api/stats`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatistics {
    /// Number of played games
    pub games: u32,
    /// Player nickname
    pub nick: String,
    /// Leaderboard points
    pub points: u32,
    /// Position on the leaderboard
    pub rank: u32,
    /// Number of won games
    pub wins: u32,
}

/// Wrapper of `GET /api/stats`.
#[derive(Deserialize, Debug)]
pub struct TopStatisticsResponse {
    /// Leaderboard, best player first
    pub stats: Vec<PlayerStatistics>,
}

/// Wrapper of `GET /api/stats/{nick}`.
#[derive(Deserialize, Debug)]
pub struct PlayerStatisticsResponse {
    /// Statistics of the requested player
    pub stats: PlayerStatistics,
}
