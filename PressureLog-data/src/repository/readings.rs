use super::errors::RepositoryError;
use super::keys::records_key;
use super::snapshot::SnapshotRepository;
use crate::models::StoredReading;
use crate::store::KeyValueStore;

/// Repository for one account's blood pressure readings
#[derive(Debug, Clone)]
pub struct ReadingRepository<S> {
    snapshots: SnapshotRepository<S>,
}

impl<S: KeyValueStore> ReadingRepository<S> {
    /// Create a new repository
    pub fn new(store: S) -> Self {
        Self {
            snapshots: SnapshotRepository::new(store),
        }
    }

    /// Load the readings stored for `owner_id`
    pub fn load(&self, owner_id: &str) -> Result<Vec<StoredReading>, RepositoryError> {
        self.snapshots.load_list(&records_key(owner_id))
    }

    /// Whether a readings snapshot exists for `owner_id`
    pub fn exists(&self, owner_id: &str) -> Result<bool, RepositoryError> {
        Ok(self.snapshots.raw(&records_key(owner_id))?.is_some())
    }

    /// Replace the readings stored for `owner_id`
    pub fn save(&self, owner_id: &str, readings: &[StoredReading]) -> Result<(), RepositoryError> {
        self.snapshots.save(&records_key(owner_id), readings)
    }
}
