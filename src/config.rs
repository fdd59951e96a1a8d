//! Configuration of the salvo client.
//!
//! Every value has a default, so the client runs without any configuration
//! file. Values are layered in this order, the last one winning:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file given with `--config`
//! 3. Environment variables prefixed with `SALVO_`, using `__` between
//!    section and key
//!
//! # Configuration File Format
//!
//! ```yaml
//! server:
//!   # Base URL of the warships server
//!   url: "https://go-pjatk-server.fly.dev"
//!   # Timeout of every request, in seconds
//!   timeout: 2
//!
//! timing:
//!   status_poll_interval: 1
//!   opponents_refresh_interval: 5
//!   token_refresh_interval: 10
//!   restart_delay: 30
//!   max_poll_failures: 1
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export SALVO_SERVER__URL="http://localhost:8080"
//! export SALVO_TIMING__RESTART_DELAY=5
//! ```

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Warships server connection
    pub server: Server,
    /// Periods of the game loops
    pub timing: Timing,
}

/// Warships server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    /// Base URL of the warships server.
    ///
    /// Should include the protocol (http/https). A trailing slash is removed
    /// at start-up.
    pub url: String,

    /// Timeout of every request, in seconds.
    pub timeout: u64,
}

impl Server {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for Server {
    fn default() -> Self {
        Server {
            url: "https://go-pjatk-server.fly.dev".to_owned(),
            timeout: 2,
        }
    }
}

/// Periods of the game loops, all in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Sleep between two status polls
    pub status_poll_interval: u64,
    /// Period of the waiting opponents refresh during selection
    pub opponents_refresh_interval: u64,
    /// Period of the session token refresh during a game
    pub token_refresh_interval: u64,
    /// Pause between the end of a game and the start of the next one
    pub restart_delay: u64,
    /// Consecutive failed status polls tolerated before the game is aborted.
    ///
    /// `1` aborts on the first failure.
    pub max_poll_failures: u32,
}

impl Timing {
    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_interval)
    }

    pub fn opponents_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.opponents_refresh_interval)
    }

    pub fn token_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.token_refresh_interval)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_secs(self.restart_delay)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            status_poll_interval: 1,
            opponents_refresh_interval: 5,
            token_refresh_interval: 10,
            restart_delay: 30,
            max_poll_failures: 1,
        }
    }
}

impl Config {
    /// Load the configuration from the defaults, the optional YAML file at
    /// `path` and the `SALVO_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, if a value has
    /// the wrong type, or if a timeout or loop period is zero.
    pub fn load(path: Option<&str>) -> Result<Config, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }

        let config: Config = figment
            .merge(Env::prefixed("SALVO_").split("__"))
            .extract()?;
        config.validate()?;

        Ok(config)
    }

    /// Rejects values the client cannot run with.
    fn validate(&self) -> Result<(), figment::Error> {
        let periods = [
            ("server.timeout", self.server.timeout),
            (
                "timing.opponents_refresh_interval",
                self.timing.opponents_refresh_interval,
            ),
            (
                "timing.token_refresh_interval",
                self.timing.token_refresh_interval,
            ),
        ];

        match periods.iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(figment::Error::from(format!(
                "{} must be at least 1 second",
                key
            ))),
            None => Ok(()),
        }
    }
}
