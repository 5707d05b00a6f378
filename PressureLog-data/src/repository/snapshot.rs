use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use super::errors::RepositoryError;
use crate::store::KeyValueStore;

/// Reads and writes JSON snapshots through a key-value store
#[derive(Debug, Clone)]
pub struct SnapshotRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SnapshotRepository<S> {
    /// Create a snapshot repository over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load and decode the value under `key`
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RepositoryError> {
        let raw = self.raw(key)?;
        match raw {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|source| {
                    error!("Failed to decode snapshot {}: {}", key, source);
                    RepositoryError::Serialization {
                        key: key.to_string(),
                        source,
                    }
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Load a list snapshot, treating a missing key as an empty list
    pub fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, RepositoryError> {
        Ok(self.load::<Vec<T>>(key)?.unwrap_or_default())
    }

    /// Encode and store `value` under `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(value).map_err(|source| RepositoryError::Serialization {
            key: key.to_string(),
            source,
        })?;
        debug!("Saving snapshot {} ({} bytes)", key, json.len());
        self.store.set(key, &json).map_err(|e| {
            error!("Failed to save snapshot {}: {}", key, e);
            RepositoryError::Store(e)
        })
    }

    /// Raw stored text, for callers that need to restore it verbatim
    pub fn raw(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.store.get(key)?)
    }

    /// Put back a value previously read with [`Self::raw`]
    pub fn restore_raw(&self, key: &str, previous: Option<&str>) -> Result<(), RepositoryError> {
        match previous {
            Some(json) => self.store.set(key, json)?,
            None => self.store.remove(key)?,
        }
        Ok(())
    }

    /// Delete the value under `key`
    pub fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        debug!("Removing snapshot {}", key);
        Ok(self.store.remove(key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn test_missing_list_is_empty() {
        let repo = SnapshotRepository::new(InMemoryStore::new());
        let items: Vec<String> = repo.load_list("records-nobody").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_reported() {
        let store = InMemoryStore::new();
        store.set("records-user-1", "{not json").unwrap();

        let repo = SnapshotRepository::new(store);
        let err = repo.load_list::<String>("records-user-1").unwrap_err();
        assert!(err.is_corrupt_snapshot());
        assert!(err.to_string().contains("records-user-1"));
    }

    #[test]
    fn test_restore_raw_removes_when_previously_absent() {
        let store = InMemoryStore::new();
        let repo = SnapshotRepository::new(store.clone());

        let before = repo.raw("registered-users").unwrap();
        repo.save("registered-users", &vec!["a".to_string()]).unwrap();
        repo.restore_raw("registered-users", before.as_deref()).unwrap();

        assert_eq!(store.get("registered-users").unwrap(), None);
    }
}
