//! In-memory storage implementation.

use super::{decode_snapshot, encode_snapshot, Storage, StorageError, StorageResult};
use crate::model::DashboardState;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Snapshots are kept in their serialized form so loads go through the same
/// decoding path as durable backends.
#[derive(Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw snapshot text under a key, bypassing encoding.
    pub fn insert_raw(&self, key: &str, json: impl Into<String>) -> StorageResult<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        snapshots.insert(key.to_string(), json.into());
        Ok(())
    }

    /// Raw snapshot text stored under a key.
    pub fn raw(&self, key: &str) -> StorageResult<Option<String>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(snapshots.get(key).cloned())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, state: &DashboardState) -> StorageResult<()> {
        let json = encode_snapshot(state)?;
        self.insert_raw(key, json)
    }

    fn load(&self, key: &str) -> StorageResult<DashboardState> {
        let json = self
            .raw(key)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        decode_snapshot(&json)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        snapshots.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(snapshots.contains_key(key))
    }

    fn rename(&self, from: &str, to: &str) -> StorageResult<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        let json = snapshots
            .remove(from)
            .ok_or_else(|| StorageError::NotFound(from.to_string()))?;
        snapshots.insert(to.to_string(), json);
        Ok(())
    }
}
