//! Salvo - A command-line client for the warships battleship server.
//!
//! This is the main entry point of salvo, which plays battleship games against
//! other players or the server bot from a terminal.
//!
//! # Overview
//!
//! Salvo registers a match on the warships server, shows the own board and
//! polls the game status. When it is the player's turn, it reads coordinates
//! from standard input and fires until a shot misses. Once a game ends, a new
//! one starts after a short delay.
//!
//! # Features
//!
//! - **Opponent Discovery**: Lists the waiting players every few seconds while
//!   the player picks one
//! - **Direct Challenge**: Skip discovery with `--target_nick`, `--wpbot` or `--wait`
//! - **Side By Side Boards**: Own board with the opponent's shots next to the
//!   targeting board
//! - **Accuracy Tracking**: Hit ratio printed after every shot
//! - **Statistics**: Leaderboard and per-player statistics
//! - **YAML Configuration**: Optional file with environment variable overrides
//!
//! # Configuration
//!
//! Every setting has a default. An optional `config.yaml` can override them:
//!
//! ```yaml
//! server:
//!   url: "https://go-pjatk-server.fly.dev"
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
//! Override any configuration value using environment variables with the `SALVO_` prefix:
//!
//! ```bash
//! export SALVO_SERVER__URL="http://localhost:8080"
//! export SALVO_TIMING__RESTART_DELAY=5
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Pick an opponent among the waiting players
//! salvo --nick alice --desc "Captain of the seas"
//!
//! # Challenge a given player, the server bot, or wait to be challenged
//! salvo --nick alice --target_nick bob
//! salvo --nick alice --wpbot
//! salvo --nick alice --wait
//!
//! # Statistics
//! salvo --topstats
//! salvo --stats alice
//! ```
//!
//! During a turn, type a coordinate such as `B7` to fire, or `abandon` to
//! forfeit the game.
//!
//! # Architecture
//!
//! - [`config`] - Configuration structures and loading
//! - [`game`] - Session client, coordinates, boards, accuracy and user input
//! - [`session`] - Orchestration of a game and its background loops
//! - [`settings`] - Validation of the command-line settings
//! - [`warships`] - Warships server API client
//!
//! # Runtime Behavior
//!
//! While a game runs, up to three tasks are active:
//!
//! 1. **Status Loop**: Polls the game status every `status_poll_interval`
//!    seconds and plays the player's turns
//! 2. **Token Refresh**: Refreshes the session token every
//!    `token_refresh_interval` seconds
//! 3. **Opponent Discovery**: Lists the waiting players every
//!    `opponents_refresh_interval` seconds, only while an opponent is picked
//!
//! # Exit Codes
//!
//! - `0` - Statistics were printed
//! - `1` - Invalid configuration or settings, or an unrecoverable game error
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use tokio::time;

use crate::{
    config::Config,
    game::{GameClient, StdinReader},
    session::{App, SessionError, format_restart, show_player_statistics, show_top_statistics},
    settings::Settings,
    warships::{GameOutcome, WarshipsRequester},
};

mod config;
mod game;
mod session;
mod settings;
mod warships;

/// Command-line arguments of salvo.
///
/// Statistics flags run a single query and exit. Every other invocation plays
/// games until the process is stopped, and requires `--nick`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Own nickname, 2 to 10 characters.
    #[arg(long)]
    nick: Option<String>,

    /// Own description, shown to the opponent.
    #[arg(long, default_value = "")]
    desc: String,

    /// Nickname of the player to challenge, skipping opponent discovery.
    #[arg(long = "target_nick")]
    target_nick: Option<String>,

    /// Play against the server bot.
    #[arg(long)]
    wpbot: bool,

    /// Wait to be challenged by another player.
    ///
    /// Cannot be combined with `--wpbot`.
    #[arg(long)]
    wait: bool,

    /// Print the leaderboard and exit.
    #[arg(long)]
    topstats: bool,

    /// Print the statistics of the given player and exit.
    #[arg(long)]
    stats: Option<String>,

    /// Path to an optional YAML configuration file.
    ///
    /// See the [`config`] module for the expected format.
    #[arg(short, long)]
    config: Option<String>,
}

/// Main entry point of salvo.
///
/// 1. **Logging Setup**: `info` level by default, overridden by `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Defaults, optional YAML file, then `SALVO_`
///    environment variables
/// 4. **Statistics**: `--topstats` and `--stats` print and exit
/// 5. **Game Loop**: Plays a game, waits `restart_delay` seconds and starts
///    again
///
/// # Error Handling
///
/// Configuration and settings errors exit with code 1 before any request is
/// made. Game errors are split in two:
/// - A taken nickname or a server error status is logged and the next game
///   starts after the restart delay
/// - Network failures, closed input and unexpected responses exit with code 1
#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting salvo {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Normalize server URL by removing trailing slash if present
    if config.server.url.ends_with('/') {
        config.server.url.pop();
    }

    // Shared by every game so buffered input survives a restart
    let input = StdinReader::new();

    if args.topstats || args.stats.is_some() {
        return match show_statistics(&config, &args, input).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Failed to fetch statistics: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let settings = match Settings::new(args.nick, args.desc, args.target_nick, args.wpbot, args.wait)
    {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    loop {
        match play_game(&config, &settings, input.clone()).await {
            Ok(outcome) => info!("game finished: {}", outcome),
            Err(e) if e.is_fatal() => {
                error!("Game aborted: {}", e);
                return ExitCode::FAILURE;
            }
            Err(e) => warn!("Game interrupted: {}", e),
        }

        println!("{}", format_restart(config.timing.restart_delay));
        time::sleep(config.timing.restart_delay()).await;
    }
}

/// Builds a fresh client with its own session token.
fn build_client(
    config: &Config,
    input: StdinReader,
) -> Result<GameClient<WarshipsRequester, StdinReader>, SessionError> {
    let requester = WarshipsRequester::new(&config.server.url, config.server.timeout())
        .map_err(SessionError::Transport)?;
    Ok(GameClient::new(requester, input))
}

async fn show_statistics(
    config: &Config,
    args: &Args,
    input: StdinReader,
) -> Result<(), SessionError> {
    let client = build_client(config, input)?;

    match &args.stats {
        Some(nick) => show_player_statistics(&client, nick).await,
        None => show_top_statistics(&client).await,
    }
}

async fn play_game(
    config: &Config,
    settings: &Settings,
    input: StdinReader,
) -> Result<GameOutcome, SessionError> {
    let client = Arc::new(build_client(config, input)?);
    App::new(client, settings, &config.timing).run().await
}
