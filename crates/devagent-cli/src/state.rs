//! Opened application state.

use crate::config::{Backend, Config};
use devagent_core::{InteractionLog, KeyValueStore, MemoryStore, SqliteStore};
use tracing::info;

/// The log behind whichever backend the config selects.
pub type Log = InteractionLog<Box<dyn KeyValueStore>>;

pub struct AppState {
    pub log: Log,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> devagent_core::Result<Self> {
        let store: Box<dyn KeyValueStore> = match config.backend {
            Backend::Sqlite => Box::new(SqliteStore::open(&config.db_path)?),
            Backend::Memory => Box::new(MemoryStore::new()),
        };
        info!(
            target: "devagent::startup",
            "Opened {:?} store (key: {}, limit: {})",
            config.backend,
            config.storage_key,
            config.history_limit
        );

        let log = InteractionLog::new(store)
            .with_key(config.storage_key.clone())
            .with_limit(config.history_limit);

        Ok(Self { log, config })
    }
}
