//! In-memory storage implementation.

use super::{PersistedRecord, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: &str, json: impl Into<String>) -> StorageResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        records.insert(key.to_string(), json.into());
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, record: &PersistedRecord) -> StorageResult<()> {
        let json = record.to_json()?;
        self.insert_raw(key, json)
    }

    fn load(&self, key: &str) -> StorageResult<PersistedRecord> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        let json = records
            .get(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        PersistedRecord::from_json(json)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        records.remove(key);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(records.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(records.contains_key(key))
    }
}
