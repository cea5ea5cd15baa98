//! Browser `localStorage` backend for WebAssembly.

use super::{PersistedRecord, Storage, StorageError, StorageResult};
use wasm_bindgen::JsValue;

fn js_err(context: &str, e: JsValue) -> StorageError {
    StorageError::Other(format!("{}: {:?}", context, e))
}

/// Stores records as JSON strings in `window.localStorage`.
///
/// Not Send/Sync: the handle belongs to the page's single thread.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Acquire the page's `localStorage`.
    pub fn new() -> StorageResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_err("localStorage error", e))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, record: &PersistedRecord) -> StorageResult<()> {
        let json = record.to_json()?;
        // Quota errors surface here.
        self.storage
            .set_item(key, &json)
            .map_err(|e| js_err("Failed to write record", e))
    }

    fn load(&self, key: &str) -> StorageResult<PersistedRecord> {
        let json = self
            .storage
            .get_item(key)
            .map_err(|e| js_err("Failed to read record", e))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        PersistedRecord::from_json(&json)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_err("Failed to delete record", e))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let len = self
            .storage
            .length()
            .map_err(|e| js_err("Failed to list records", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self
                .storage
                .key(i)
                .map_err(|e| js_err("Failed to list records", e))?
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let item = self
            .storage
            .get_item(key)
            .map_err(|e| js_err("Failed to read record", e))?;
        Ok(item.is_some())
    }
}
