//! Foosbot - A chat bot running a table football league in group chat rooms.
//!
//! # Overview
//!
//! Members of a chat room register in the league, record their matches and
//! ask for the leaderboard. Every member is rated with TrueSkill from the
//! match history of the room, the margin of victory weighting each match.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! server:
//!   address: "0.0.0.0"
//!   port: 8080
//!
//! bot:
//!   prefix: "/foosball"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `FOOSBOT_` prefix:
//!
//! ```bash
//! export FOOSBOT_SERVER__PORT=9000
//! export FOOSBOT_BOT__PREFIX="/table"
//! ```
//!
//! # Usage
//!
//! ```bash
//! foosbot --config config.yaml --data ./data
//! ```
//!
//! # Bot Commands
//!
//! - `add <name>, <name> and me` - Register members in the league
//! - `list` - Show the leaderboard
//! - `record <team> <a>-<b> <team>` - Record a match
//! - `help` - Display help information
//!
//! # Architecture
//!
//! - [`bot`] - Wiring of the storage, the commands and the webhook server
//! - [`commands`] - Command parsing and execution
//! - [`config`] - YAML configuration file structures and loading with environment variable support
//! - [`league`] - Members, matches, ratings and leaderboard
//! - [`store`] - Storage traits and their JSON file implementation
//! - [`utils`] - Utility functions for paths and message formatting
//! - [`webhook`] - HTTP routes called by the chat platform
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod league;
mod store;
mod utils;
mod webhook;

/// Command-line arguments for the foosbot.
///
/// # Examples
///
/// ```bash
/// foosbot --config config.yaml --data ./foosbot-data
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain the installations and the match history
    /// of every room, as JSON files. It is created if it does not exist.
    #[arg(short, long)]
    data: String,
}

/// Main entry point for the foosbot.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML configuration file and the environment overrides
/// 4. **Bot Initialization**: Creates the storage and the command dispatcher
/// 5. **Bot Execution**: Serves the webhook until interrupted
///
/// Start-up errors are logged and end the process.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting foosbot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, args).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {:#}", e);
    }
}
