use super::errors::RepositoryError;
use super::keys::{REGISTERED_USERS_KEY, SESSION_KEY};
use super::snapshot::SnapshotRepository;
use crate::models::{StoredAccount, StoredUser};
use crate::store::KeyValueStore;

/// Repository for registered accounts and the session snapshot
#[derive(Debug, Clone)]
pub struct AccountRepository<S> {
    snapshots: SnapshotRepository<S>,
}

impl<S: KeyValueStore> AccountRepository<S> {
    /// Create a new repository
    pub fn new(store: S) -> Self {
        Self {
            snapshots: SnapshotRepository::new(store),
        }
    }

    /// Load all registered accounts
    pub fn registered(&self) -> Result<Vec<StoredAccount>, RepositoryError> {
        self.snapshots.load_list(REGISTERED_USERS_KEY)
    }

    /// Replace the registered accounts list
    pub fn save_registered(&self, accounts: &[StoredAccount]) -> Result<(), RepositoryError> {
        self.snapshots.save(REGISTERED_USERS_KEY, accounts)
    }

    /// Raw registered accounts snapshot, used to roll back a failed registration
    pub fn registered_raw(&self) -> Result<Option<String>, RepositoryError> {
        self.snapshots.raw(REGISTERED_USERS_KEY)
    }

    /// Put back a snapshot read with [`Self::registered_raw`]
    pub fn restore_registered_raw(&self, previous: Option<&str>) -> Result<(), RepositoryError> {
        self.snapshots.restore_raw(REGISTERED_USERS_KEY, previous)
    }

    /// Load the signed-in user, if any
    pub fn session(&self) -> Result<Option<StoredUser>, RepositoryError> {
        self.snapshots.load(SESSION_KEY)
    }

    /// Store the signed-in user
    pub fn save_session(&self, user: &StoredUser) -> Result<(), RepositoryError> {
        self.snapshots.save(SESSION_KEY, user)
    }

    /// Forget the signed-in user
    pub fn clear_session(&self) -> Result<(), RepositoryError> {
        self.snapshots.remove(SESSION_KEY)
    }
}
