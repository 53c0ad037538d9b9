//! Store configuration.

use crate::storage::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

/// Environment variable overriding the native storage directory.
pub const DATA_DIR_ENV: &str = "DASHDECK_DATA_DIR";

/// Configuration for opening a widget store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the snapshot is stored under.
    pub storage_key: String,
    /// Directory for snapshot files. `None` uses the platform data
    /// directory. Ignored on wasm32.
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Default configuration with `DASHDECK_DATA_DIR` applied, if set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self {
            data_dir,
            ..Self::default()
        }
    }
}
