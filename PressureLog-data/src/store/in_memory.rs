use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::errors::StoreError;
use super::KeyValueStore;

/// In-memory key-value store
///
/// Cloning the store yields another handle onto the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    /// Stored values by key
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Keys currently present, sorted
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let store = self.entries.lock()?;
        let mut keys: Vec<String> = store.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Number of stored keys
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries.lock()?.len())
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.entries.lock()?.is_empty())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let store = self.entries.lock()?;
        Ok(store.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("Storing {} bytes under key {}", value.len(), key);
        let mut store = self.entries.lock()?;
        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        debug!("Removing key {}", key);
        let mut store = self.entries.lock()?;
        store.remove(key);
        Ok(())
    }
}
