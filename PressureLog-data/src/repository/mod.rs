// Repository module structure
pub mod errors;
pub mod keys;
mod accounts;
mod dependents;
mod readings;
mod snapshot;

// Re-export commonly used types
pub use accounts::AccountRepository;
pub use dependents::DependentRepository;
pub use errors::RepositoryError;
pub use readings::ReadingRepository;
pub use snapshot::SnapshotRepository;
