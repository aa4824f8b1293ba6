//! Error types for the auth crate.

use thiserror::Error;

/// Errors that can occur while issuing, verifying, or storing credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A signing secret is absent or empty. Fatal at startup.
    #[error("token signing secret is missing")]
    MissingSecret,

    /// Failed to sign a token.
    #[error("failed to create token: {0}")]
    TokenCreationFailed(String),

    /// Token is past its expiry. Reported separately from [`AuthError::Invalid`]
    /// so clients can decide to refresh instead of forcing a re-login.
    #[error("token has expired")]
    Expired,

    /// Token is malformed, has a bad signature, or was signed in the wrong
    /// domain.
    #[error("token is invalid")]
    Invalid,

    /// The credential store failed.
    #[error("credential store error: {0}")]
    Store(String),
}

impl From<redis::RedisError> for AuthError {
    fn from(err: redis::RedisError) -> Self {
        AuthError::Store(err.to_string())
    }
}
