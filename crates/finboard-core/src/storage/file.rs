//! File-based storage implementation for native platforms.

use super::{PersistedRecord, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each record as a JSON file in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the directory
    /// if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// The platform data directory, e.g. `~/.local/share/finboard` on Linux.
    pub fn default_dir() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("finboard"))
    }

    /// Create file storage in the default location.
    pub fn default_location() -> StorageResult<Self> {
        Self::new(Self::default_dir()?)
    }

    /// Path of the record for `key`.
    ///
    /// Keys are used verbatim as file stems. Anything outside `[A-Za-z0-9_-]`
    /// is rejected.
    fn record_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, record: &PersistedRecord) -> StorageResult<()> {
        let path = self.record_path(key)?;
        let json = record.to_json()?;
        // Write then rename so a crash never leaves a half-written record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StorageError::Io(format!("Failed to replace {}: {}", path.display(), e)))
    }

    fn load(&self, key: &str) -> StorageResult<PersistedRecord> {
        let path = self.record_path(key)?;
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        PersistedRecord::from_json(&json).map_err(|e| match e {
            StorageError::Serialization(msg) => {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.record_path(key)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut keys = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(name) = path.file_stem().and_then(|n| n.to_str()) {
                    keys.push(name.to_string());
                }
            }
        }
        Ok(keys)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.record_path(key)?.exists())
    }
}
