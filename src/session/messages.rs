//! User facing texts printed during a game session.
//!
//! Every text goes through a function here so the session logic can be tested
//! against the exact wording.

use crate::{
    game::{AccuracyCounter, Coordinate},
    warships::{GameOutcome, GameStatusSnapshot, Opponent, PlayerStatistics, ShotResult},
};

/// Formats the discovery listing of waiting opponents.
pub fn format_opponents(opponents: &[Opponent]) -> String {
    if opponents.is_empty() {
        return "No active opponents".to_owned();
    }

    let nicks = opponents
        .iter()
        .map(|opponent| opponent.nick.as_str())
        .collect::<Vec<&str>>()
        .join("\n");

    format!("Active opponents:\n{}\nType opponent's name:", nicks)
}

pub fn format_refreshing_opponents() -> String {
    "Refreshing list of active players".to_owned()
}

pub fn format_invalid_opponent() -> String {
    "Invalid opponent. Type again:".to_owned()
}

pub fn format_waiting_for_opponent() -> String {
    "Waiting for an opponent...".to_owned()
}

/// Formats the one time presentation of both players.
pub fn format_game_info(snapshot: &GameStatusSnapshot) -> String {
    format!(
        "Nick: {}\nDescription: {}\nOpponent: {}\nOpponent's description: {}",
        snapshot.nick, snapshot.desc, snapshot.opponent, snapshot.opponent_desc
    )
}

/// Formats the prompt opening our turn.
pub fn format_turn_prompt(timer: u32) -> String {
    format!("It's your turn ({}s left):", timer)
}

pub fn format_invalid_coordinate() -> String {
    "Invalid coordinate, type again:".to_owned()
}

/// Formats the result of a shot with the running accuracy.
pub fn format_shot_result(
    coordinate: &Coordinate,
    result: ShotResult,
    accuracy: &AccuracyCounter,
) -> String {
    let prompt = match result {
        ShotResult::Hit | ShotResult::Sunk => "\nFire again:",
        ShotResult::Miss => "",
    };
    format!("{}: {}. {}{}", coordinate, result, accuracy, prompt)
}

/// Formats the end of the game.
///
/// Without a known outcome the line stays neutral.
pub fn format_outcome(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Unset => "Game over".to_owned(),
        _ => format!("You {}!!!", outcome),
    }
}

pub fn format_restart(delay_secs: u64) -> String {
    format!("Restarting game in {} seconds", delay_secs)
}

/// Formats a single player's statistics.
pub fn format_player_statistics(stats: &PlayerStatistics) -> String {
    format!(
        "{}. {}\nPoints: {}\nWins: {}\nGames: {}",
        stats.rank, stats.nick, stats.points, stats.wins, stats.games
    )
}

/// Formats the leaderboard.
pub fn format_top_statistics(stats: &[PlayerStatistics]) -> String {
    if stats.is_empty() {
        return "No statistics available.".to_owned();
    }

    let players = stats
        .iter()
        .map(format_player_statistics)
        .collect::<Vec<String>>()
        .join("\n");

    format!("Top statistics:\n{}", players)
}
