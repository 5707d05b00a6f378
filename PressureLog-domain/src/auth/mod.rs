//! Authentication and session handling for PressureLog
//!
//! Credentials are checked against an optional list of built-in accounts and
//! the registered accounts kept in the store. The signed-in user is persisted
//! as a password-free snapshot and handed to callers as an explicit [`Session`].

use pressure_log_data::repository::RepositoryError;
use thiserror::Error;

use crate::entities::conversions::ConversionError;

// Auth event logging
pub mod logging;

// Session manager
mod session;

pub use session::{Session, SessionManager};

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account matches the email and password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Another account already uses the email
    #[error("Email already in use: {0}")]
    EmailInUse(String),

    /// Input rejected by validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A stored account could not be read
    #[error("Corrupt account record: {0}")]
    CorruptRecord(#[from] ConversionError),

    /// Store or snapshot failure, passed through unchanged
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
