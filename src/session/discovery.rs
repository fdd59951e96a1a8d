//! Background discovery of opponents waiting to be challenged.

use std::{sync::Arc, time::Duration};

use log::{debug, error, info};
use tokio::{
    sync::RwLock,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{
    game::SessionClient,
    session::{SessionError, messages::format_opponents, stopper::StopSignal},
    warships::Opponent,
};

/// Latest list of waiting opponents, shared between the discovery loop and
/// the opponent selection.
///
/// Every refresh replaces the whole list; readers always get a consistent
/// snapshot.
#[derive(Debug, Clone, Default)]
pub struct OpponentCache {
    opponents: Arc<RwLock<Vec<Opponent>>>,
}

impl OpponentCache {
    pub async fn replace(&self, opponents: Vec<Opponent>) {
        *self.opponents.write().await = opponents;
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<Opponent> {
        self.opponents.read().await.clone()
    }

    /// Finds a waiting opponent whose nickname matches exactly.
    pub async fn find_waiting(&self, nick: &str) -> Option<Opponent> {
        self.opponents
            .read()
            .await
            .iter()
            .find(|opponent| opponent.is_waiting() && opponent.nick == nick)
            .cloned()
    }
}

/// Periodically lists the waiting opponents and prints them.
pub struct OpponentDiscovery<C: SessionClient> {
    client: Arc<C>,
    opponents: OpponentCache,
    interval: Duration,
}

impl<C: SessionClient + 'static> OpponentDiscovery<C> {
    /// Create a new [OpponentDiscovery].
    ///
    /// # Arguments
    ///
    /// * `client` - The session client used to list the lobby.
    /// * `opponents` - The cache receiving every fetched list.
    /// * `interval` - Delay between two refreshes of the background loop.
    pub fn new(client: Arc<C>, opponents: OpponentCache, interval: Duration) -> Self {
        OpponentDiscovery {
            client,
            opponents,
            interval,
        }
    }

    /// Fetches the waiting opponents once, stores and prints them.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let opponents = self.client.list_waiting_opponents().await?;
        debug!("waiting opponents {:?}", opponents);

        println!("{}", format_opponents(&opponents));
        self.opponents.replace(opponents).await;

        Ok(())
    }

    /// Starts the background loop until `signal` fires.
    ///
    /// The first refresh happens one interval after the call; callers wanting
    /// an immediate listing await [`Self::refresh`] first. Refresh errors are
    /// logged and the loop keeps going.
    pub fn spawn(self, mut signal: StopSignal) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "refreshing waiting opponents every {} seconds",
                self.interval.as_secs()
            );
            let mut interval = time::interval_at(Instant::now() + self.interval, self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = signal.stopped() => {
                        info!("stopped refreshing waiting opponents");
                        return;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.refresh().await {
                            error!("error while refreshing waiting opponents: {}", e);
                        }
                    }
                }
            }
        })
    }
}
