use std::sync::PoisonError;
use thiserror::Error;

/// Error type for key-value store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Configuration error
    #[error("Store configuration error: {0}")]
    Config(String),

    /// Migration error
    #[error("Store migration error: {0}")]
    Migration(String),

    /// Filesystem error while preparing the store location
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(error: PoisonError<T>) -> Self {
        StoreError::Lock(error.to_string())
    }
}
