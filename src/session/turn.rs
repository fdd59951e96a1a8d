//! One turn of the local player.

use log::{debug, warn};

use crate::{
    game::{Coordinate, SessionClient},
    session::{
        SessionError,
        messages::{format_invalid_coordinate, format_shot_result, format_turn_prompt},
    },
};

/// Typed instead of a coordinate to forfeit the game.
const ABANDON_COMMAND: &str = "abandon";

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A shot missed, the opponent plays next.
    Completed,
    /// The player forfeited the game.
    Abandoned,
}

/// Prompts for coordinates and fires until a shot misses.
///
/// Invalid coordinates are re-prompted without being sent. Typing `abandon`
/// forfeits the game; a failure to notify the server is logged only, the game
/// is considered over either way.
pub async fn play_turn<C: SessionClient + ?Sized>(
    client: &C,
    timer: u32,
) -> Result<TurnOutcome, SessionError> {
    println!("{}", format_turn_prompt(timer));

    loop {
        let input = client.read_next_line().await?;

        if input.eq_ignore_ascii_case(ABANDON_COMMAND) {
            if let Err(e) = client.abandon_game().await {
                warn!("error while abandoning game: {}", e);
            }
            return Ok(TurnOutcome::Abandoned);
        }

        let coordinate: Coordinate = match input.parse() {
            Ok(coordinate) => coordinate,
            Err(e) => {
                debug!("{}", e);
                println!("{}", format_invalid_coordinate());
                continue;
            }
        };

        let result = client.submit_shot(&coordinate).await?;
        let accuracy = client.accuracy().await;
        println!("{}", format_shot_result(&coordinate, result, &accuracy));

        if !result.is_hit() {
            return Ok(TurnOutcome::Completed);
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        game::{AccuracyCounter, MockSessionClient},
        session::testing::lines,
        warships::ShotResult,
    };

    /// Makes `read_next_line` return the given lines in order.
    fn expect_lines(mock_client: &mut MockSessionClient, input: &[&str]) {
        mock_client.expect_read_next_line().returning(lines(input));
    }

    fn coordinate(text: &str) -> Coordinate {
        text.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fire_again_while_hitting() {
        let mut mock_client = MockSessionClient::new();
        expect_lines(&mut mock_client, &["A1", "A2", "A3"]);
        mock_client
            .expect_submit_shot()
            .with(eq(coordinate("A1")))
            .times(1)
            .returning(|_| Ok(ShotResult::Hit));
        mock_client
            .expect_submit_shot()
            .with(eq(coordinate("A2")))
            .times(1)
            .returning(|_| Ok(ShotResult::Sunk));
        mock_client
            .expect_submit_shot()
            .with(eq(coordinate("A3")))
            .times(1)
            .returning(|_| Ok(ShotResult::Miss));
        mock_client
            .expect_accuracy()
            .returning(AccuracyCounter::default);

        let outcome = play_turn(&mock_client, 60).await.unwrap();
        assert_eq!(outcome, TurnOutcome::Completed);
    }

    #[tokio::test]
    async fn test_invalid_coordinates_are_reprompted() {
        let mut mock_client = MockSessionClient::new();
        expect_lines(&mut mock_client, &["K1", "A0", "a5", "B10"]);
        mock_client
            .expect_submit_shot()
            .with(eq(coordinate("B10")))
            .times(1)
            .returning(|_| Ok(ShotResult::Miss));
        mock_client
            .expect_accuracy()
            .returning(AccuracyCounter::default);

        let outcome = play_turn(&mock_client, 60).await.unwrap();
        assert_eq!(outcome, TurnOutcome::Completed);
    }

    #[tokio::test]
    async fn test_abandon() {
        let mut mock_client = MockSessionClient::new();
        expect_lines(&mut mock_client, &["Abandon"]);
        mock_client.expect_abandon_game().times(1).returning(|| Ok(()));
        mock_client.expect_submit_shot().times(0);

        let outcome = play_turn(&mock_client, 60).await.unwrap();
        assert_eq!(outcome, TurnOutcome::Abandoned);
    }

    #[tokio::test]
    async fn test_abandon_failure_still_abandons() {
        let mut mock_client = MockSessionClient::new();
        expect_lines(&mut mock_client, &["abandon"]);
        mock_client
            .expect_abandon_game()
            .times(1)
            .returning(|| Err(SessionError::Server { status_code: 404 }));

        let outcome = play_turn(&mock_client, 60).await.unwrap();
        assert_eq!(outcome, TurnOutcome::Abandoned);
    }

    #[tokio::test]
    async fn test_shot_error_is_propagated() {
        let mut mock_client = MockSessionClient::new();
        expect_lines(&mut mock_client, &["C3", "C4"]);
        mock_client
            .expect_submit_shot()
            .times(1)
            .returning(|_| Err(SessionError::InvalidResponse("boom".to_owned())));

        let error = play_turn(&mock_client, 60).await.unwrap_err();
        assert!(matches!(error, SessionError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_closed_input_is_propagated() {
        let mut mock_client = MockSessionClient::new();
        expect_lines(&mut mock_client, &[]);

        let error = play_turn(&mock_client, 60).await.unwrap_err();
        assert!(matches!(error, SessionError::InputClosed));
    }
}
