//! Storage abstraction for persistence.

mod memory;
mod persistence;
mod snapshot;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
pub use persistence::{
    create_default_storage,
    Persistence,
    PlatformStorage,
    DEFAULT_STORAGE_KEY,
};
pub use snapshot::{decode_snapshot, encode_snapshot, SNAPSHOT_VERSION};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::model::DashboardState;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Nothing stored under key: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Stored snapshot version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for dashboard snapshot storage backends.
///
/// Each key holds one whole-state snapshot; saving replaces it.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a snapshot, replacing any previous one under `key`.
    fn save(&self, key: &str, state: &DashboardState) -> StorageResult<()>;

    /// Load a snapshot. Returns `NotFound` when nothing is stored.
    fn load(&self, key: &str) -> StorageResult<DashboardState>;

    /// Delete a snapshot. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a snapshot exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Move the snapshot under `from` to `to` without decoding it.
    ///
    /// Replaces anything stored under `to`. Returns `NotFound` when `from`
    /// holds nothing.
    fn rename(&self, from: &str, to: &str) -> StorageResult<()>;
}

/// Trait for dashboard snapshot storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a snapshot, replacing any previous one under `key`.
    fn save(&self, key: &str, state: &DashboardState) -> StorageResult<()>;

    /// Load a snapshot. Returns `NotFound` when nothing is stored.
    fn load(&self, key: &str) -> StorageResult<DashboardState>;

    /// Delete a snapshot. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a snapshot exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Move the snapshot under `from` to `to` without decoding it.
    ///
    /// Replaces anything stored under `to`. Returns `NotFound` when `from`
    /// holds nothing.
    fn rename(&self, from: &str, to: &str) -> StorageResult<()>;
}
