//! One game cycle, from opponent selection to the final outcome.

use std::sync::Arc;

use futures::future::join_all;
use log::{error, info};
use tokio::task::JoinHandle;

use crate::{
    config::Timing,
    game::SessionClient,
    session::{
        Session, SessionError,
        discovery::{OpponentCache, OpponentDiscovery},
        messages::{format_invalid_opponent, format_refreshing_opponents},
        refresh::TokenRefresher,
        status::StatusMachine,
        stopper::{StopSignal, Stopper, stop_channel},
    },
    settings::Settings,
    warships::GameOutcome,
};

/// Orchestrates a single game.
///
/// An [`App`] is used once: [`App::run`] consumes it, and a new one is built
/// for every game cycle.
///
/// # Sequence
///
/// 1. Pick an opponent among the waiting players, unless the settings already
///    decide who to play
/// 2. Make sure no waiting player uses our nickname
/// 3. Register the match and display the own board
/// 4. Keep the token alive and poll the status until the game ends
///
/// Background loops are stopped and joined before [`App::run`] returns,
/// whatever the result.
pub struct App<'a, C: SessionClient + 'static> {
    client: Arc<C>,
    settings: &'a Settings,
    timing: &'a Timing,
    session: Session,
    /// Waiting opponents, filled by discovery and the nick check
    opponents: OpponentCache,
    discovery_stopper: Stopper,
    discovery_signal: Option<StopSignal>,
    refresh_stopper: Stopper,
    refresh_signal: Option<StopSignal>,
    /// Spawned background loops
    tasks: Vec<JoinHandle<()>>,
}

impl<'a, C: SessionClient + 'static> App<'a, C> {
    /// Create a new [App].
    ///
    /// # Arguments
    ///
    /// * `client` - The session client for this game.
    /// * `settings` - The validated command-line settings.
    /// * `timing` - The periods of the game loops.
    pub fn new(client: Arc<C>, settings: &'a Settings, timing: &'a Timing) -> Self {
        let (discovery_stopper, discovery_signal) = stop_channel();
        let (refresh_stopper, refresh_signal) = stop_channel();

        App {
            client,
            settings,
            timing,
            session: Session::new(settings),
            opponents: OpponentCache::default(),
            discovery_stopper,
            discovery_signal: Some(discovery_signal),
            refresh_stopper,
            refresh_signal: Some(refresh_signal),
            tasks: Vec::new(),
        }
    }

    /// Plays the game and returns its outcome.
    pub async fn run(mut self) -> Result<GameOutcome, SessionError> {
        let result = self.play().await;
        self.stop_loops().await;
        result
    }

    async fn play(&mut self) -> Result<GameOutcome, SessionError> {
        if self.settings.needs_discovery() {
            self.select_opponent().await?;
        }

        self.check_nick_available().await?;

        self.client.init_game(&self.session.init_request()).await?;
        info!(
            "game initialized for {} against {}",
            self.session.nick,
            self.session.target_nick.as_deref().unwrap_or("anyone")
        );
        self.client.fetch_board().await?;

        if let Some(signal) = self.refresh_signal.take() {
            let refresher =
                TokenRefresher::new(self.client.clone(), self.timing.token_refresh_interval());
            self.tasks.push(refresher.spawn(signal));
        }

        let stoppers = vec![self.discovery_stopper.clone(), self.refresh_stopper.clone()];
        let mut machine = StatusMachine::new(self.client.as_ref(), self.timing, stoppers);
        machine
            .run(&mut self.session)
            .await
            .map_err(SessionError::into_fatal)
    }

    /// Lists the waiting opponents and reads nicknames until one of them is
    /// typed.
    ///
    /// The list is refreshed in the background while the player types.
    async fn select_opponent(&mut self) -> Result<(), SessionError> {
        println!("{}", format_refreshing_opponents());

        let discovery = OpponentDiscovery::new(
            self.client.clone(),
            self.opponents.clone(),
            self.timing.opponents_refresh_interval(),
        );
        if let Err(e) = discovery.refresh().await {
            error!("error while listing waiting opponents: {}", e);
        }
        if let Some(signal) = self.discovery_signal.take() {
            self.tasks.push(discovery.spawn(signal));
        }

        let target = loop {
            let nick = self.client.read_next_line().await?;
            match self.opponents.find_waiting(&nick).await {
                Some(opponent) => break opponent.nick,
                None => println!("{}", format_invalid_opponent()),
            }
        };

        self.discovery_stopper.stop();
        info!("challenging {}", target);
        self.session.target_nick = Some(target);

        Ok(())
    }

    /// Fails when a waiting player already uses our nickname.
    ///
    /// The cached list is checked first, then a fresh one which replaces it.
    async fn check_nick_available(&self) -> Result<(), SessionError> {
        let nick = &self.session.nick;
        if self.opponents.find_waiting(nick).await.is_some() {
            return Err(SessionError::NickUnavailable(nick.clone()));
        }

        let waiting = self.client.list_waiting_opponents().await?;
        self.opponents.replace(waiting).await;

        if self.opponents.find_waiting(nick).await.is_some() {
            return Err(SessionError::NickUnavailable(nick.clone()));
        }

        Ok(())
    }

    async fn stop_loops(&mut self) {
        self.discovery_stopper.stop();
        self.refresh_stopper.stop();

        for result in join_all(self.tasks.drain(..)).await {
            if let Err(e) = result {
                error!("background loop failed: {}", e);
            }
        }
    }
}
