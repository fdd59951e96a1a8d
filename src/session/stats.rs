//! Statistics queries, run instead of a game.

use crate::{
    game::SessionClient,
    session::{
        SessionError,
        messages::{format_player_statistics, format_top_statistics},
    },
};

/// Prints the leaderboard.
pub async fn show_top_statistics<C: SessionClient + ?Sized>(client: &C) -> Result<(), SessionError> {
    let stats = client.top_statistics().await?;
    println!("{}", format_top_statistics(&stats));
    Ok(())
}

/// Prints the statistics of the player named `nick`.
pub async fn show_player_statistics<C: SessionClient + ?Sized>(
    client: &C,
    nick: &str,
) -> Result<(), SessionError> {
    let stats = client.player_statistics(nick).await?;
    println!("{}", format_player_statistics(&stats));
    Ok(())
}
