//! Wiring from configuration to a ready [`PosState`].

use anyhow::Context;

use caisse_storage::{JsonDirStore, KeyValueStore, MemoryStore, SqliteStore};

use crate::config::{AppConfig, StoreKind};
use crate::printer::{LogPrinter, Printer};
use crate::state::PosState;

/// Open the backend selected by `config.store`.
pub fn open_store(config: &AppConfig) -> anyhow::Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.store {
        StoreKind::Sqlite => {
            let path = config.sqlite_path();
            Box::new(
                SqliteStore::open(&path)
                    .with_context(|| format!("failed to open sqlite store at {}", path.display()))?,
            )
        }
        StoreKind::Json => {
            let dir = config.json_dir();
            Box::new(
                JsonDirStore::open(&dir)
                    .with_context(|| format!("failed to open json store at {}", dir.display()))?,
            )
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; nothing will be persisted");
            Box::new(MemoryStore::new())
        }
    };
    tracing::info!(store = ?config.store, data_dir = %config.data_dir.display(), "store opened");
    Ok(store)
}

/// Build the controller with an explicit printer.
pub fn bootstrap_with<P: Printer + 'static>(config: &AppConfig, printer: P) -> anyhow::Result<PosState> {
    let store = open_store(config)?;
    PosState::open(store, printer, config).context("failed to load persisted pos data")
}

/// Build the controller from configuration, printing through the log.
pub fn bootstrap(config: &AppConfig) -> anyhow::Result<PosState> {
    bootstrap_with(config, LogPrinter)
}
