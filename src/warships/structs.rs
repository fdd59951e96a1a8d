//! Domain structures for representing the warships game state.
//!
//! The server speaks in loosely typed strings; this module turns them into
//! enums the rest of the client can match on.

use std::fmt;

use log::warn;

use crate::warships::{LobbyEntry, StatusResponse};

/// Status of the current match as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The match is registered but no opponent joined yet.
    Waiting,
    /// Both players are on the board.
    InProgress,
    /// The match is over, see [`GameOutcome`].
    Ended,
}

impl GameStatus {
    /// Converts the `game_status` field of a status response.
    ///
    /// Unknown values are reported as [`GameStatus::Waiting`] so the caller
    /// keeps polling until the server settles on a known state.
    pub fn from_api(status: &str) -> Self {
        match status {
            "waiting" | "waiting_wpbot" => GameStatus::Waiting,
            "game_in_progress" => GameStatus::InProgress,
            "ended" => GameStatus::Ended,
            _ => {
                warn!("unknown game status string: {}", status);
                GameStatus::Waiting
            }
        }
    }
}

/// Result of the last finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Lose,
    Abandoned,
    /// No match finished yet, or the server sent an unknown value.
    Unset,
}

impl GameOutcome {
    /// Converts the `last_game_status` field of a status response.
    pub fn from_api(outcome: &str) -> Self {
        match outcome {
            "win" => GameOutcome::Win,
            "lose" => GameOutcome::Lose,
            "abandoned" => GameOutcome::Abandoned,
            "" => GameOutcome::Unset,
            _ => {
                warn!("unknown last game status string: {}", outcome);
                GameOutcome::Unset
            }
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let outcome = match self {
            GameOutcome::Win => "win",
            GameOutcome::Lose => "lose",
            GameOutcome::Abandoned => "abandoned",
            GameOutcome::Unset => "unknown",
        };
        f.write_str(outcome)
    }
}

/// Immutable result of a single status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStatusSnapshot {
    /// Current status of the match
    pub status: GameStatus,
    /// Outcome of the last finished match
    pub outcome: GameOutcome,
    /// Own nickname
    pub nick: String,
    /// Own description
    pub desc: String,
    /// Opponent nickname
    pub opponent: String,
    /// Opponent description
    pub opponent_desc: String,
    /// Cells targeted by the opponent, in firing order
    pub opponent_shots: Vec<String>,
    /// Whether it is our turn to shoot
    pub should_fire: bool,
    /// Seconds left to play the current turn
    pub timer: u32,
}

impl From<StatusResponse> for GameStatusSnapshot {
    fn from(response: StatusResponse) -> Self {
        GameStatusSnapshot {
            status: GameStatus::from_api(&response.game_status),
            outcome: GameOutcome::from_api(&response.last_game_status),
            nick: response.nick,
            desc: response.desc,
            opponent: response.opponent,
            opponent_desc: response.opp_desc,
            opponent_shots: response.opp_shots,
            should_fire: response.should_fire,
            timer: response.timer,
        }
    }
}

/// Lobby status of another player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentStatus {
    /// The player waits to be challenged.
    Waiting,
    /// The player is already in a match.
    InProgress,
    /// Any other status string, kept verbatim.
    Other(String),
}

impl OpponentStatus {
    /// Converts the `game_status` field of a lobby entry.
    pub fn from_api(status: &str) -> Self {
        match status {
            "waiting" => OpponentStatus::Waiting,
            "game_in_progress" | "in_progress" => OpponentStatus::InProgress,
            other => OpponentStatus::Other(other.to_owned()),
        }
    }
}

/// Another player visible in the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    /// Nickname, unique within one lobby listing
    pub nick: String,
    /// Lobby status
    pub status: OpponentStatus,
}

impl Opponent {
    /// Whether the player can be challenged right now.
    pub fn is_waiting(&self) -> bool {
        self.status == OpponentStatus::Waiting
    }
}

impl From<LobbyEntry> for Opponent {
    fn from(entry: LobbyEntry) -> Self {
        Opponent {
            status: OpponentStatus::from_api(&entry.game_status),
            nick: entry.nick,
        }
    }
}

/// Result of one of our shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    Hit,
    Sunk,
    Miss,
}

impl ShotResult {
    /// Converts the `result` field of a fire response.
    ///
    /// Returns `None` for values the client does not know about.
    pub fn from_api(result: &str) -> Option<Self> {
        match result {
            "hit" => Some(ShotResult::Hit),
            "sunk" => Some(ShotResult::Sunk),
            "miss" => Some(ShotResult::Miss),
            _ => None,
        }
    }

    /// Whether the shot touched a ship, granting another shot.
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Sunk)
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let result = match self {
            ShotResult::Hit => "hit",
            ShotResult::Sunk => "sunk",
            ShotResult::Miss => "miss",
        };
        f.write_str(result)
    }
}
