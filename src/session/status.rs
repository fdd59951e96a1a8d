//! Status polling state machine driving a running game.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::time;

use crate::{
    config::Timing,
    game::SessionClient,
    session::{
        Session, SessionError,
        messages::{format_game_info, format_outcome, format_waiting_for_opponent},
        stopper::Stopper,
        turn::{TurnOutcome, play_turn},
    },
    warships::{GameOutcome, GameStatus},
};

/// Polls the game status until the game ends, playing our turns as they come.
///
/// Polls are strictly sequential: one sleep, then one poll, then the action
/// the snapshot calls for.
pub struct StatusMachine<'a, C: SessionClient + ?Sized> {
    client: &'a C,
    poll_interval: Duration,
    max_poll_failures: u32,
    /// Background loops to stop once the game ends
    stoppers: Vec<Stopper>,
    /// Opponent info is revealed once per game
    info_shown: bool,
    waiting_shown: bool,
}

impl<'a, C: SessionClient + ?Sized> StatusMachine<'a, C> {
    /// Create a new [StatusMachine].
    ///
    /// # Arguments
    ///
    /// * `client` - The session client of the current game.
    /// * `timing` - Poll interval and tolerated consecutive poll failures.
    /// * `stoppers` - Stoppers of the background loops to signal at the end.
    pub fn new(client: &'a C, timing: &Timing, stoppers: Vec<Stopper>) -> Self {
        StatusMachine {
            client,
            poll_interval: timing.status_poll_interval(),
            max_poll_failures: timing.max_poll_failures.max(1),
            stoppers,
            info_shown: false,
            waiting_shown: false,
        }
    }

    /// Runs the game to its end and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns the poll error once `max_poll_failures` consecutive polls
    /// failed, and any reveal or turn error right away.
    pub async fn run(&mut self, session: &mut Session) -> Result<GameOutcome, SessionError> {
        let mut failures = 0;

        loop {
            time::sleep(self.poll_interval).await;

            let snapshot = match self.client.poll_status().await {
                Ok(snapshot) => {
                    failures = 0;
                    snapshot
                }
                Err(e) => {
                    failures += 1;
                    if failures >= self.max_poll_failures {
                        return Err(e);
                    }
                    warn!(
                        "status poll failed ({}/{}): {}",
                        failures, self.max_poll_failures, e
                    );
                    continue;
                }
            };

            if session.status != snapshot.status {
                debug!("game status {:?} -> {:?}", session.status, snapshot.status);
            }
            session.status = snapshot.status;

            match snapshot.status {
                GameStatus::Waiting => {
                    if !self.waiting_shown {
                        println!("{}", format_waiting_for_opponent());
                        self.waiting_shown = true;
                    }
                }
                GameStatus::InProgress if snapshot.should_fire => {
                    self.reveal_once().await?;

                    if play_turn(self.client, snapshot.timer).await? == TurnOutcome::Abandoned {
                        session.status = GameStatus::Ended;
                        return Ok(self.finish(GameOutcome::Abandoned));
                    }
                }
                GameStatus::InProgress => {}
                GameStatus::Ended => return Ok(self.finish(snapshot.outcome)),
            }
        }
    }

    async fn reveal_once(&mut self) -> Result<(), SessionError> {
        if self.info_shown {
            return Ok(());
        }

        let snapshot = self.client.reveal_opponent_description().await?;
        println!("{}", format_game_info(&snapshot));
        self.info_shown = true;

        Ok(())
    }

    fn finish(&self, outcome: GameOutcome) -> GameOutcome {
        info!("game ended: {}", outcome);
        println!("{}", format_outcome(outcome));

        for stopper in &self.stoppers {
            stopper.stop();
        }

        outcome
    }
}
