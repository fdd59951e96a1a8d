//! Capability set used by the game session, and its implementation.
//!
//! [`SessionClient`] is everything the session core needs from the outside
//! world. [`GameClient`] implements it on top of a warships [`Requester`],
//! a [`LineReader`] for user input, the [`BoardView`] and the
//! [`AccuracyCounter`] of the current game.

use async_trait::async_trait;
use log::{debug, info};
use mockall::automock;
use tokio::sync::Mutex;

use crate::{
    game::{
        accuracy::AccuracyCounter, board::BoardView, coordinate::Coordinate, input::LineReader,
    },
    session::SessionError,
    warships::{
        GameStatusSnapshot, InitGameRequest, Opponent, PlayerStatistics, Requester, ShotResult,
    },
};

/// Operations a game session performs against the server and the user.
#[automock]
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Registers a new match. The session token is kept by the client.
    async fn init_game(&self, request: &InitGameRequest) -> Result<(), SessionError>;
    /// Fetches and displays the own board, returning the occupied cells.
    async fn fetch_board(&self) -> Result<Vec<String>, SessionError>;
    /// Polls the match status once.
    async fn poll_status(&self) -> Result<GameStatusSnapshot, SessionError>;
    /// Fetches the status along with both players' descriptions.
    async fn reveal_opponent_description(&self) -> Result<GameStatusSnapshot, SessionError>;
    /// Fires one shot, recording its result in the board and accuracy.
    async fn submit_shot(&self, coordinate: &Coordinate) -> Result<ShotResult, SessionError>;
    /// Keeps the session token alive.
    async fn refresh_token(&self) -> Result<(), SessionError>;
    /// Lists every player in the lobby.
    async fn list_online_opponents(&self) -> Result<Vec<Opponent>, SessionError>;
    /// Lists the lobby players that can be challenged.
    async fn list_waiting_opponents(&self) -> Result<Vec<Opponent>, SessionError>;
    /// Forfeits the current match.
    async fn abandon_game(&self) -> Result<(), SessionError>;
    /// Reads one line of user input.
    async fn read_next_line(&self) -> Result<String, SessionError>;
    /// Accuracy of the shots fired so far.
    async fn accuracy(&self) -> AccuracyCounter;
    /// Fetches the leaderboard.
    async fn top_statistics(&self) -> Result<Vec<PlayerStatistics>, SessionError>;
    /// Fetches the statistics of one player.
    async fn player_statistics(&self, nick: &str) -> Result<PlayerStatistics, SessionError>;
}

/// [`SessionClient`] talking to the warships server and the terminal.
///
/// One instance lives for one game: its board and accuracy counter start
/// empty and are never reset.
pub struct GameClient<R: Requester, I: LineReader> {
    /// Requester to interact with the warships server
    requester: R,
    /// Source of user input
    input: I,
    /// Boards of the current game
    board: Mutex<BoardView>,
    /// Accuracy of the current game
    accuracy: Mutex<AccuracyCounter>,
}

impl<R: Requester, I: LineReader> GameClient<R, I> {
    /// Create a new [GameClient].
    ///
    /// # Arguments
    ///
    /// * `requester` - An implementation of the [Requester] trait to interact with the warships server.
    /// * `input` - The source of user input lines.
    pub fn new(requester: R, input: I) -> Self {
        GameClient {
            requester,
            input,
            board: Mutex::new(BoardView::default()),
            accuracy: Mutex::new(AccuracyCounter::default()),
        }
    }
}

#[async_trait]
impl<R: Requester, I: LineReader> SessionClient for GameClient<R, I> {
    async fn init_game(&self, request: &InitGameRequest) -> Result<(), SessionError> {
        self.requester.init_game(request).await?;
        Ok(())
    }

    async fn fetch_board(&self) -> Result<Vec<String>, SessionError> {
        let ships = self.requester.get_board().await?;

        let mut board = self.board.lock().await;
        board.import_ships(&ships);
        println!("{}", board.render());

        Ok(ships)
    }

    /// Polls the status and applies new opponent shots to the own board.
    ///
    /// The boards are only printed again when the opponent fired since the
    /// previous poll.
    async fn poll_status(&self) -> Result<GameStatusSnapshot, SessionError> {
        let snapshot = GameStatusSnapshot::from(self.requester.get_status().await?);

        let mut board = self.board.lock().await;
        if board.apply_opponent_shots(&snapshot.opponent_shots) {
            debug!("opponent shots {:?}", snapshot.opponent_shots);
            println!("{}", board.render());
        }

        Ok(snapshot)
    }

    async fn reveal_opponent_description(&self) -> Result<GameStatusSnapshot, SessionError> {
        let snapshot = GameStatusSnapshot::from(self.requester.get_description().await?);
        Ok(snapshot)
    }

    async fn submit_shot(&self, coordinate: &Coordinate) -> Result<ShotResult, SessionError> {
        let response = self.requester.fire(&coordinate.to_string()).await?;
        let result = ShotResult::from_api(&response.result).ok_or_else(|| {
            SessionError::InvalidResponse(format!("unknown shot result {:?}", response.result))
        })?;
        info!("shot at {} -> {}", coordinate, result);

        self.accuracy.lock().await.record(result);

        let mut board = self.board.lock().await;
        board.mark_shot(coordinate, result);
        println!("{}", board.render());

        Ok(result)
    }

    async fn refresh_token(&self) -> Result<(), SessionError> {
        self.requester.refresh_session().await?;
        Ok(())
    }

    async fn list_online_opponents(&self) -> Result<Vec<Opponent>, SessionError> {
        let lobby = self.requester.get_lobby().await?;
        Ok(lobby.into_iter().map(Opponent::from).collect())
    }

    async fn list_waiting_opponents(&self) -> Result<Vec<Opponent>, SessionError> {
        let opponents = self.list_online_opponents().await?;
        Ok(opponents
            .into_iter()
            .filter(|opponent| opponent.is_waiting())
            .collect())
    }

    async fn abandon_game(&self) -> Result<(), SessionError> {
        self.requester.abandon().await?;
        info!("game abandoned");
        Ok(())
    }

    async fn read_next_line(&self) -> Result<String, SessionError> {
        Ok(self.input.read_line().await?)
    }

    async fn accuracy(&self) -> AccuracyCounter {
        *self.accuracy.lock().await
    }

    async fn top_statistics(&self) -> Result<Vec<PlayerStatistics>, SessionError> {
        Ok(self.requester.get_top_statistics().await?)
    }

    async fn player_statistics(&self, nick: &str) -> Result<PlayerStatistics, SessionError> {
        Ok(self.requester.get_player_statistics(nick).await?)
    }
}
