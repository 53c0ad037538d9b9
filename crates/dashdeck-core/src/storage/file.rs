//! File-based storage implementation for native platforms.

use super::{decode_snapshot, encode_snapshot, Storage, StorageError, StorageResult};
use crate::model::DashboardState;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Stores each snapshot as a JSON file in a specified directory.
pub struct FileStorage {
    /// Base directory for snapshot files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/dashdeck/`
    /// On Windows: `%LOCALAPPDATA%\dashdeck\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("dashdeck"))
    }

    /// Get the file path for a key.
    fn snapshot_path(&self, key: &str) -> PathBuf {
        // Sanitize key to be safe for filenames
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, state: &DashboardState) -> StorageResult<()> {
        let path = self.snapshot_path(key);
        let json = encode_snapshot(state)?;

        // Write next to the target and rename so readers never see a torn file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })
    }

    fn load(&self, key: &str) -> StorageResult<DashboardState> {
        let path = self.snapshot_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let json = fs::read_to_string(&path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        decode_snapshot(&json).map_err(|e| match e {
            StorageError::Serialization(msg) => {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.snapshot_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.snapshot_path(key).exists())
    }

    fn rename(&self, from: &str, to: &str) -> StorageResult<()> {
        let source = self.snapshot_path(from);
        if !source.exists() {
            return Err(StorageError::NotFound(from.to_string()));
        }
        let target = self.snapshot_path(to);
        fs::rename(&source, &target).map_err(|e| {
            StorageError::Io(format!(
                "Failed to move {} to {}: {}",
                source.display(),
                target.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_state;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let state = seed_state();

        storage.save("dashboard-storage", &state).unwrap();
        let loaded = storage.load("dashboard-storage").unwrap();

        assert_eq!(loaded, state);
        assert!(dir.path().join("dashboard-storage.json").exists());
        assert!(!dir.path().join("dashboard-storage.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("test", &seed_state()).unwrap();
        assert!(storage.exists("test").unwrap());

        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_key() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let state = seed_state();

        // Key with special characters should be sanitized
        storage.save("test/key:with*special", &state).unwrap();

        // Should still be loadable with the same key
        let loaded = storage.load("test/key:with*special").unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_file_storage_rename() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("current.json"), "{ not json").unwrap();

        storage.rename("current", "backup").unwrap();

        assert!(!storage.exists("current").unwrap());
        let moved = fs::read_to_string(dir.path().join("backup.json")).unwrap();
        assert_eq!(moved, "{ not json");
        assert!(matches!(
            storage.rename("current", "backup"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let err = storage.load("broken").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        assert!(err.to_string().contains("broken.json"));
    }
}
