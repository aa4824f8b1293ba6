//! Error types for the API surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use storefront_auth::AuthError;
use storefront_records::RecordsError;
use thiserror::Error;

/// Errors a handler can return. Every collaborator failure is mapped into one
/// of these at the handler boundary; nothing else reaches the transport layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or mismatched credential.
    #[error("{0}")]
    Unauthorized(String),

    /// Valid request shape, but the access token is past its expiry. Kept
    /// separate from [`ApiError::Unauthorized`] so the client knows a refresh
    /// (rather than a re-login) is worth attempting.
    #[error("Access token expired")]
    TokenExpired,

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected collaborator failure. Detail is logged, never surfaced.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref err) = self {
            tracing::error!(error = %err, "internal error");
        }
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Expired => ApiError::TokenExpired,
            AuthError::Invalid => ApiError::Unauthorized("Invalid token".to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<RecordsError> for ApiError {
    fn from(err: RecordsError) -> Self {
        match err {
            RecordsError::DuplicateEmail => ApiError::Validation("User already exists".to_string()),
            RecordsError::NotFound => ApiError::NotFound("Record not found".to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}
