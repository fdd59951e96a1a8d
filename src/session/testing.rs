//! Helpers shared by the session tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::{
    session::SessionError,
    warships::{GameStatusSnapshot, StatusResponse},
};

/// Builds a snapshot as the server would report it.
pub fn snapshot(game_status: &str, should_fire: bool, last_game_status: &str) -> GameStatusSnapshot {
    GameStatusSnapshot::from(StatusResponse {
        game_status: game_status.to_owned(),
        should_fire,
        last_game_status: last_game_status.to_owned(),
        nick: "alice".to_owned(),
        desc: "captain".to_owned(),
        opponent: "bob".to_owned(),
        opp_desc: "pirate".to_owned(),
        timer: 60,
        ..StatusResponse::default()
    })
}

/// Returns a closure yielding `items` in order, then [`SessionError::InputClosed`].
pub fn script<T: Send + 'static>(
    items: Vec<Result<T, SessionError>>,
) -> impl FnMut() -> Result<T, SessionError> + Send + 'static {
    let items = Arc::new(Mutex::new(VecDeque::from(items)));
    move || {
        items
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SessionError::InputClosed))
    }
}

/// Scripted user input lines.
pub fn lines(lines: &[&str]) -> impl FnMut() -> Result<String, SessionError> + Send + 'static {
    script(lines.iter().map(|line| Ok(line.to_string())).collect())
}
