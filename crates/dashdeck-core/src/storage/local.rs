//! Browser `localStorage` implementation for WebAssembly.

use super::{decode_snapshot, encode_snapshot, Storage, StorageError, StorageResult};
use crate::model::DashboardState;

/// `localStorage`-backed storage for WebAssembly.
///
/// Note: Not Send/Sync since WASM is single-threaded and the
/// `web_sys::Storage` handle is looked up on each call.
#[derive(Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Create a new localStorage backend.
    pub fn new() -> Self {
        Self
    }

    fn handle(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, state: &DashboardState) -> StorageResult<()> {
        let json = encode_snapshot(state)?;
        // Quota errors surface here
        self.handle()?
            .set_item(key, &json)
            .map_err(|e| StorageError::Io(format!("Failed to write '{}': {:?}", key, e)))
    }

    fn load(&self, key: &str) -> StorageResult<DashboardState> {
        let json = self
            .handle()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read '{}': {:?}", key, e)))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        decode_snapshot(&json)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.handle()?
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to delete '{}': {:?}", key, e)))
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let value = self
            .handle()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read '{}': {:?}", key, e)))?;
        Ok(value.is_some())
    }

    fn rename(&self, from: &str, to: &str) -> StorageResult<()> {
        let storage = self.handle()?;
        let json = storage
            .get_item(from)
            .map_err(|e| StorageError::Io(format!("Failed to read '{}': {:?}", from, e)))?
            .ok_or_else(|| StorageError::NotFound(from.to_string()))?;
        storage
            .set_item(to, &json)
            .map_err(|e| StorageError::Io(format!("Failed to write '{}': {:?}", to, e)))?;
        storage
            .remove_item(from)
            .map_err(|e| StorageError::Io(format!("Failed to delete '{}': {:?}", from, e)))
    }
}
