//! Stop signals for the background loops.
//!
//! A [`Stopper`] never blocks: it can be triggered any number of times, before
//! the loop starts or after it already exited. The matching [`StopSignal`] is
//! awaited by exactly one loop inside its `select!`.

use std::sync::Arc;

use tokio::sync::watch;

/// Creates a connected stopper and signal.
pub fn stop_channel() -> (Stopper, StopSignal) {
    let (sender, receiver) = watch::channel(false);
    (
        Stopper {
            sender: Arc::new(sender),
        },
        StopSignal { receiver },
    )
}

/// Sending half, kept by the owner of the loop.
#[derive(Debug, Clone)]
pub struct Stopper {
    sender: Arc<watch::Sender<bool>>,
}

impl Stopper {
    /// Requests the loop to stop.
    pub fn stop(&self) {
        self.sender.send_replace(true);
    }

    #[cfg(test)]
    pub fn is_stopped(&self) -> bool {
        *self.sender.borrow()
    }
}

/// Receiving half, moved into the loop.
#[derive(Debug)]
pub struct StopSignal {
    receiver: watch::Receiver<bool>,
}

impl StopSignal {
    /// Completes once a stop was requested or every [`Stopper`] was dropped.
    pub async fn stopped(&mut self) {
        while !*self.receiver.borrow_and_update() {
            if self.receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time;

    use super::*;

    #[tokio::test]
    async fn test_stop_before_wait() {
        let (stopper, mut signal) = stop_channel();
        stopper.stop();

        signal.stopped().await;
        assert!(stopper.is_stopped());
    }

    #[tokio::test]
    async fn test_double_stop_is_noop() {
        let (stopper, mut signal) = stop_channel();
        let handle = tokio::spawn(async move { signal.stopped().await });

        stopper.stop();
        stopper.stop();

        handle.await.unwrap();
        // The loop is gone, stopping again must neither block nor panic
        stopper.stop();
        assert!(stopper.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_pending_until_stop() {
        let (stopper, mut signal) = stop_channel();

        let waited = time::timeout(Duration::from_secs(1), signal.stopped()).await;
        assert!(waited.is_err());
        assert!(!stopper.is_stopped());

        stopper.stop();
        signal.stopped().await;
    }

    #[tokio::test]
    async fn test_dropped_stopper_releases_signal() {
        let (stopper, mut signal) = stop_channel();
        drop(stopper);

        signal.stopped().await;
    }

    #[tokio::test]
    async fn test_cloned_stopper() {
        let (stopper, mut signal) = stop_channel();
        let clone = stopper.clone();

        clone.stop();
        signal.stopped().await;
        assert!(stopper.is_stopped());
    }
}
