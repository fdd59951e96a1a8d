//! Background refresh of the session token.

use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{game::SessionClient, session::stopper::StopSignal};

/// Keeps the session alive while a game is running.
pub struct TokenRefresher<C: SessionClient> {
    client: Arc<C>,
    interval: Duration,
}

impl<C: SessionClient + 'static> TokenRefresher<C> {
    pub fn new(client: Arc<C>, interval: Duration) -> Self {
        TokenRefresher { client, interval }
    }

    /// Starts refreshing the token every interval until `signal` fires.
    ///
    /// Failed refreshes are only logged: the status loop notices on its own
    /// when the session is really gone.
    pub fn spawn(self, mut signal: StopSignal) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "refreshing session token every {} seconds",
                self.interval.as_secs()
            );
            let mut interval = time::interval_at(Instant::now() + self.interval, self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = signal.stopped() => {
                        info!("stopped refreshing session token");
                        return;
                    }
                    _ = interval.tick() => {
                        match self.client.refresh_token().await {
                            Ok(()) => debug!("session token refreshed"),
                            Err(e) => warn!("error while refreshing session token: {}", e),
                        }
                    }
                }
            }
        })
    }
}
