//! Environment-driven application configuration.

use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_DIR_ENV: &str = "CAISSE_DATA_DIR";
pub const STORE_ENV: &str = "CAISSE_STORE";
pub const SEED_SAMPLES_ENV: &str = "CAISSE_SEED_SAMPLES";
pub const SHOP_NAME_ENV: &str = "CAISSE_SHOP_NAME";

pub const DEFAULT_SHOP_NAME: &str = "Auto-Caisse Maestro";

/// Which key/value backend persists the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Sqlite,
    Json,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "json" => Ok(StoreKind::Json),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the database / JSON files.
    pub data_dir: PathBuf,
    pub store: StoreKind,
    /// Seed sample catalog and sales when a collection was never stored.
    pub seed_samples: bool,
    /// Printed at the top and bottom of every receipt.
    pub shop_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreKind::default(),
            seed_samples: true,
            shop_name: DEFAULT_SHOP_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values keep their default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(STORE_ENV) {
            match raw.parse::<StoreKind>() {
                Ok(kind) => config.store = kind,
                Err(err) => tracing::warn!("{STORE_ENV}: {err}; using {:?}", config.store),
            }
        }

        if let Some(raw) = lookup(SEED_SAMPLES_ENV) {
            match parse_bool(&raw) {
                Some(flag) => config.seed_samples = flag,
                None => tracing::warn!("{SEED_SAMPLES_ENV}: `{raw}` is not a boolean; keeping default"),
            }
        }

        if let Some(name) = lookup(SHOP_NAME_ENV).filter(|n| !n.trim().is_empty()) {
            config.shop_name = name.trim().to_string();
        }

        config
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("caisse.db")
    }

    pub fn json_dir(&self) -> PathBuf {
        self.data_dir.join("collections")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("caisse")
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
