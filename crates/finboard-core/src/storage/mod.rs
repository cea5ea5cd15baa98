//! Storage abstraction for persistence.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use autosave::{
    AutoSaveManager,
    PlatformAutoSaveManager,
    PlatformStorage,
    create_autosave_manager,
    create_default_storage,
    DEFAULT_AUTOSAVE_INTERVAL_SECS,
};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::store::PersistedState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key under which the whiteboard state is persisted.
pub const STORAGE_KEY: &str = "fintech-whiteboard-storage";

/// Schema version written into every record.
pub const RECORD_VERSION: u32 = 0;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// On-disk envelope: `{"state": {...}, "version": 0}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    #[serde(default)]
    pub state: PersistedState,
    #[serde(default)]
    pub version: u32,
}

impl PersistedRecord {
    pub fn new(state: PersistedState) -> Self {
        Self {
            state,
            version: RECORD_VERSION,
        }
    }

    pub fn to_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> StorageResult<Self> {
        let record: Self = serde_json::from_str(json)?;
        if record.version > RECORD_VERSION {
            log::warn!(
                "Record version {} is newer than supported version {}",
                record.version,
                RECORD_VERSION
            );
        }
        Ok(record)
    }
}

/// Key-value backend for persisted records.
///
/// Calls are synchronous: the browser's `localStorage` is synchronous and
/// the core never suspends.
pub trait Storage {
    /// Save a record under `key`.
    fn save(&self, key: &str, record: &PersistedRecord) -> StorageResult<()>;

    /// Load the record stored under `key`.
    fn load(&self, key: &str) -> StorageResult<PersistedRecord>;

    /// Delete a record. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all stored keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a record exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_envelope_shape() {
        let record = PersistedRecord::new(PersistedState::default());
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], 0);
        assert!(value["state"].get("elements").is_some());
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record = PersistedRecord::from_json(r#"{"state": {"elements": []}}"#).unwrap();
        assert_eq!(record.version, 0);
        assert!(record.state.connectors.is_empty());

        let record = PersistedRecord::from_json("{}").unwrap();
        assert_eq!(record, PersistedRecord::default());
    }

    #[test]
    fn test_record_rejects_garbage() {
        let result = PersistedRecord::from_json("not json");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
