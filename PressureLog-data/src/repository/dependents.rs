use super::errors::RepositoryError;
use super::keys::dependents_key;
use super::snapshot::SnapshotRepository;
use crate::models::StoredDependent;
use crate::store::KeyValueStore;

/// Repository for one account's dependents
#[derive(Debug, Clone)]
pub struct DependentRepository<S> {
    snapshots: SnapshotRepository<S>,
}

impl<S: KeyValueStore> DependentRepository<S> {
    /// Create a new repository
    pub fn new(store: S) -> Self {
        Self {
            snapshots: SnapshotRepository::new(store),
        }
    }

    /// Load the dependents stored for `owner_id`
    pub fn load(&self, owner_id: &str) -> Result<Vec<StoredDependent>, RepositoryError> {
        self.snapshots.load_list(&dependents_key(owner_id))
    }

    /// Replace the dependents stored for `owner_id`
    pub fn save(&self, owner_id: &str, dependents: &[StoredDependent]) -> Result<(), RepositoryError> {
        self.snapshots.save(&dependents_key(owner_id), dependents)
    }
}
