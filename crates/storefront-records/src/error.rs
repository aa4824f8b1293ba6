//! Error types for the records crate.

use thiserror::Error;

/// Errors that can occur in a record store backend.
#[derive(Debug, Error)]
pub enum RecordsError {
    /// An account with this email already exists.
    #[error("user already exists")]
    DuplicateEmail,

    /// The referenced record does not exist.
    #[error("record not found")]
    NotFound,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The backing database failed.
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RecordsError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => RecordsError::DuplicateEmail,
            sqlx::Error::RowNotFound => RecordsError::NotFound,
            _ => RecordsError::Database(err.to_string()),
        }
    }
}
