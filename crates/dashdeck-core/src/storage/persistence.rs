//! Snapshot persistence for the widget store.
//!
//! Every effective store mutation writes the whole state under one fixed key.

use crate::config::StoreConfig;
use crate::model::DashboardState;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Key the dashboard snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "dashboard-storage";

/// Writes and restores dashboard snapshots through a storage backend.
pub struct Persistence<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Namespace key for the snapshot.
    key: String,
    /// Whether the in-memory state is ahead of storage.
    dirty: bool,
    /// Number of successful saves.
    save_count: u64,
}

impl<S: Storage> Persistence<S> {
    /// Create a persistence handle for `key`.
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            dirty: false,
            save_count: 0,
        }
    }

    /// Create a persistence handle using [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(storage: Arc<S>) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    /// The namespace key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mark the state as changed since the last save.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the state has changes storage has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of successful saves through this handle.
    pub fn save_count(&self) -> u64 {
        self.save_count
    }

    /// Load the stored snapshot. `Ok(None)` means nothing is stored.
    pub fn load(&self) -> StorageResult<Option<DashboardState>> {
        match self.storage.load(&self.key) {
            Ok(state) => Ok(Some(state)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Save the full state, replacing the previous snapshot.
    ///
    /// On failure the handle stays dirty so a later [`save`](Self::save) retries.
    pub fn save(&mut self, state: &DashboardState) -> StorageResult<()> {
        self.dirty = true;
        self.storage.save(&self.key, state)?;
        self.dirty = false;
        self.save_count += 1;
        Ok(())
    }

    /// Remove the stored snapshot.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.delete(&self.key)
    }

    /// Move an unreadable snapshot out of the way of future saves.
    ///
    /// The raw text goes to `<key>.unreadable` (or `<key>.unreadable-N` when
    /// earlier backups exist). Returns the backup key.
    pub fn move_aside(&self) -> StorageResult<String> {
        let base = format!("{}.unreadable", self.key);
        let mut backup = base.clone();
        let mut n = 1;
        while self.storage.exists(&backup)? {
            n += 1;
            backup = format!("{base}-{n}");
        }
        self.storage.rename(&self.key, &backup)?;
        Ok(backup)
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage(config: &StoreConfig) -> StorageResult<Arc<crate::storage::FileStorage>> {
    let storage = match &config.data_dir {
        Some(dir) => crate::storage::FileStorage::new(dir.clone())?,
        None => crate::storage::FileStorage::default_location()?,
    };
    log::info!("Dashboard storage at {}", storage.base_path().display());
    Ok(Arc::new(storage))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage(_config: &StoreConfig) -> StorageResult<Arc<crate::storage::LocalStorage>> {
    Ok(Arc::new(crate::storage::LocalStorage::new()))
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = crate::storage::LocalStorage;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::seed::seed_state;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::tempdir;

    /// Backend whose writes always fail.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn save(&self, _key: &str, _state: &DashboardState) -> StorageResult<()> {
            Err(StorageError::Io("read-only".to_string()))
        }
        fn load(&self, key: &str) -> StorageResult<DashboardState> {
            Err(StorageError::NotFound(key.to_string()))
        }
        fn delete(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
        fn exists(&self, _key: &str) -> StorageResult<bool> {
            Ok(false)
        }
        fn rename(&self, _from: &str, _to: &str) -> StorageResult<()> {
            Err(StorageError::Io("read-only".to_string()))
        }
    }

    #[test]
    fn test_persistence_creation() {
        let persistence = Persistence::with_default_key(Arc::new(MemoryStorage::new()));

        assert_eq!(persistence.key(), "dashboard-storage");
        assert!(!persistence.is_dirty());
        assert_eq!(persistence.save_count(), 0);
    }

    #[test]
    fn test_load_nothing_stored() {
        let persistence = Persistence::with_default_key(Arc::new(MemoryStorage::new()));
        assert!(persistence.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = Arc::new(MemoryStorage::new());
        let mut persistence = Persistence::with_default_key(storage.clone());
        let state = seed_state();

        persistence.save(&state).unwrap();
        assert!(!persistence.is_dirty());
        assert_eq!(persistence.save_count(), 1);

        // A fresh handle over the same backend sees the snapshot
        let reopened = Persistence::with_default_key(storage);
        assert_eq!(reopened.load().unwrap(), Some(state));
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let mut persistence = Persistence::with_default_key(Arc::new(ReadOnlyStorage));

        let result = persistence.save(&seed_state());
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(persistence.is_dirty());
        assert_eq!(persistence.save_count(), 0);
    }

    #[test]
    fn test_clear() {
        let storage = Arc::new(MemoryStorage::new());
        let mut persistence = Persistence::new(storage.clone(), "k");
        persistence.save(&seed_state()).unwrap();

        persistence.clear().unwrap();
        assert!(!storage.exists("k").unwrap());
        assert!(persistence.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw(DEFAULT_STORAGE_KEY, "][").unwrap();
        let persistence = Persistence::with_default_key(storage);

        assert!(matches!(persistence.load(), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_move_aside_keeps_earlier_backups() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = Persistence::new(storage.clone(), "k");

        storage.insert_raw("k", "first").unwrap();
        assert_eq!(persistence.move_aside().unwrap(), "k.unreadable");
        storage.insert_raw("k", "second").unwrap();
        assert_eq!(persistence.move_aside().unwrap(), "k.unreadable-2");

        assert!(!storage.exists("k").unwrap());
        assert_eq!(storage.raw("k.unreadable").unwrap().as_deref(), Some("first"));
        assert_eq!(storage.raw("k.unreadable-2").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_create_default_storage_with_dir() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            data_dir: Some(dir.path().join("data")),
            ..StoreConfig::default()
        };

        let storage: Arc<FileStorage> = create_default_storage(&config).unwrap();
        assert_eq!(storage.base_path(), dir.path().join("data").as_path());
    }
}
