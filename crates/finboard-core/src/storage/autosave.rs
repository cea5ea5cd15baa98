//! Auto-save of the persisted store subset.
//!
//! The manager subscribes to the [`Store`] to learn when persisted state
//! changed, and writes at most once per interval.

use crate::storage::{PersistedRecord, STORAGE_KEY, Storage, StorageError, StorageResult};
use crate::store::{Store, SubscriptionId};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 2;

/// Manages automatic persistence of a store.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    key: String,
    interval: Duration,
    last_save: Option<Instant>,
    /// Set by the store observer, cleared on save/load.
    dirty: Rc<Cell<bool>>,
    subscription: Option<SubscriptionId>,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a manager writing to [`STORAGE_KEY`].
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            key: STORAGE_KEY.to_string(),
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: Rc::new(Cell::new(false)),
            subscription: None,
        }
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start tracking changes to `store`.
    pub fn attach(&mut self, store: &mut Store) {
        self.detach(store);
        let dirty = Rc::clone(&self.dirty);
        let id = store.subscribe(move |event| {
            if event.affects_persisted() {
                dirty.set(true);
            }
        });
        self.subscription = Some(id);
    }

    /// Stop tracking changes.
    pub fn detach(&mut self, store: &mut Store) {
        if let Some(id) = self.subscription.take() {
            store.unsubscribe(id);
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty.set(true);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Check if there are unsaved changes and the interval has elapsed.
    pub fn should_save(&self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if needed. Returns true if a save was performed.
    pub fn maybe_save(&mut self, store: &Store) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }
        self.save(store)?;
        Ok(true)
    }

    /// Save immediately.
    pub fn save(&mut self, store: &Store) -> StorageResult<()> {
        let record = PersistedRecord::new(store.to_persisted());
        self.storage.save(&self.key, &record)?;
        self.last_save = Some(Instant::now());
        self.dirty.set(false);
        log::debug!("Saved whiteboard state to '{}'", self.key);
        Ok(())
    }

    /// Hydrate `store` from storage.
    ///
    /// Returns `Ok(false)` when nothing was stored yet; the store is left
    /// untouched in that case.
    pub fn load_into(&mut self, store: &mut Store) -> StorageResult<bool> {
        let record = match self.storage.load(&self.key) {
            Ok(record) => record,
            Err(StorageError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        store.hydrate(record.state);
        self.dirty.set(false);
        self.last_save = Some(Instant::now());
        log::info!(
            "Loaded {} element(s) and {} connector(s) from '{}'",
            store.elements().len(),
            store.connectors().len(),
            self.key
        );
        Ok(true)
    }

    /// Remove the stored record.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.delete(&self.key)
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::LocalStorage>> {
    Ok(Arc::new(crate::storage::LocalStorage::new()?))
}

/// Storage backend for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = crate::storage::LocalStorage;

pub type PlatformAutoSaveManager = AutoSaveManager<PlatformStorage>;

/// Create an auto-save manager with the platform's default storage.
pub fn create_autosave_manager() -> StorageResult<PlatformAutoSaveManager> {
    let storage = create_default_storage()?;
    Ok(AutoSaveManager::new(storage))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::elements::{Element, ElementKind};
    use crate::storage::MemoryStorage;
    use crate::tools::ToolKind;

    fn manager() -> AutoSaveManager<MemoryStorage> {
        AutoSaveManager::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_autosave_manager_creation() {
        let manager = manager();
        assert!(!manager.is_dirty());
        assert!(!manager.should_save());
        assert_eq!(manager.key(), STORAGE_KEY);
    }

    #[test]
    fn test_store_changes_mark_dirty() {
        let mut store = Store::new();
        let mut manager = manager();
        manager.attach(&mut store);

        store.set_tool(ToolKind::Pan);
        assert!(!manager.is_dirty());

        store.add_element(Element::new(ElementKind::Text, 0.0, 0.0, 150.0, 50.0));
        assert!(manager.is_dirty());
        assert!(manager.maybe_save(&store).unwrap());
        assert!(!manager.is_dirty());

        manager.detach(&mut store);
        store.add_element(Element::new(ElementKind::Text, 0.0, 0.0, 150.0, 50.0));
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_interval_throttles_saves() {
        let mut store = Store::new();
        let mut manager = manager();
        manager.set_interval(Duration::from_secs(3600));
        manager.attach(&mut store);

        store.add_element(Element::new(ElementKind::Text, 0.0, 0.0, 150.0, 50.0));
        assert!(manager.maybe_save(&store).unwrap());

        store.add_element(Element::new(ElementKind::Text, 0.0, 0.0, 150.0, 50.0));
        assert!(!manager.maybe_save(&store).unwrap());
        assert!(manager.is_dirty());

        manager.save(&store).unwrap();
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_load_into_restores_state() {
        let mut store = Store::new();
        let mut manager = manager();
        store.add_element(Element::new(ElementKind::StickyNote, 5.0, 5.0, 200.0, 200.0));
        store.set_current_user("dana");
        store.set_scale(3.0);
        manager.save(&store).unwrap();

        let mut fresh = Store::new();
        let mut loader = AutoSaveManager::new(Arc::clone(manager.storage()));
        loader.attach(&mut fresh);
        assert!(loader.load_into(&mut fresh).unwrap());

        assert_eq!(fresh.elements(), store.elements());
        assert_eq!(fresh.current_user(), "dana");
        assert_eq!(fresh.scale(), 1.0);
        assert!(!loader.is_dirty());
    }

    #[test]
    fn test_load_into_without_record() {
        let mut store = Store::new();
        let mut manager = manager();
        assert!(!manager.load_into(&mut store).unwrap());
        assert!(store.elements().is_empty());
    }

    #[test]
    fn test_load_into_corrupt_record() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw(STORAGE_KEY, "garbage").unwrap();
        let mut manager = AutoSaveManager::new(storage);
        let mut store = Store::new();

        assert!(matches!(
            manager.load_into(&mut store),
            Err(StorageError::Serialization(_))
        ));
    }
}
