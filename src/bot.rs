//! Bot module wiring the storage, the commands and the webhook server.
//!
//! # Overview
//!
//! The foosbot runs a table football league in every chat room it is
//! installed in. The chat platform forwards the room messages to the bot's
//! webhook, the bot answers in the HTTP response.
//!
//! # Command Processing Flow
//!
//! ```text
//! Webhook → ChatEvent → Commander → Storage writes → Reply → HTTP response
//! ```
//!
//! # Persistence
//!
//! Installations and match history are kept in two JSON files of the data
//! directory, see [`crate::store::json`].

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use log::info;
use tokio::fs;

use crate::{
    Args,
    commands::Commander,
    config::Config,
    store::json::{JsonInstallationStore, JsonMatchStore},
    utils::get_path,
    webhook,
};

/// Main bot structure.
pub struct Bot {
    /// Command parser and executor, shared by the webhook handlers
    commander: Arc<Commander<JsonInstallationStore, JsonMatchStore>>,

    /// Address the webhook server binds
    address: SocketAddr,
}

impl Bot {
    /// Creates a new Bot instance from configuration and command line arguments.
    ///
    /// The data directory is created if it does not exist. The storage files
    /// are only created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub async fn new(config: Config, args: Args) -> anyhow::Result<Self> {
        fs::create_dir_all(&args.data)
            .await
            .with_context(|| format!("failed to create data directory {}", args.data))?;

        let installations =
            JsonInstallationStore::new(get_path(&args.data, &config.storage.installations));
        let matches = JsonMatchStore::new(get_path(&args.data, &config.storage.matches));

        let commander = Arc::new(Commander::new(
            installations,
            matches,
            &config.bot,
            &config.rating,
        ));

        Ok(Bot {
            commander,
            address: SocketAddr::new(config.server.address, config.server.port),
        })
    }

    /// Serves the webhook until the process is interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the server address cannot be bound.
    pub async fn start(self) -> anyhow::Result<()> {
        info!("serving webhook on {}", self.address);

        webhook::serve(self.address, webhook::router(self.commander)).await
    }
}
