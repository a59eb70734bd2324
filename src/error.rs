//! Error types for the message cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Body returned for every backend failure. Internal detail is logged, never sent.
const GENERIC_BACKEND_ERROR: &str = "Internal server error";

// == Cache Error Enum ==
/// Service-level outcome of a failed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Request path or body could not be parsed
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Digest has no entry in the store
    #[error("Message digest not found: {0}")]
    NotFound(String),

    /// Store could not be reached or dialed
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Store was reachable but rejected the SET
    #[error("Store write failed for digest {digest}: {reason}")]
    StoreWriteFailed { digest: String, reason: String },

    /// Store was reachable but the GET failed
    #[error("Store read failed: {0}")]
    StoreReadFailed(String),

    /// Request body exceeded the configured size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

impl CacheError {
    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            CacheError::BackendUnavailable(_)
            | CacheError::StoreWriteFailed { .. }
            | CacheError::StoreReadFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures originating in the backing store.
    pub fn is_backend_failure(&self) -> bool {
        self.status_code().is_server_error()
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let message = match &self {
            CacheError::MalformedRequest(reason) => format!("Bad request: {}", reason),
            CacheError::NotFound(_) => "Message digest not found in cache.".to_string(),
            CacheError::PayloadTooLarge(reason) => format!("Payload too large: {}", reason),
            _ => GENERIC_BACKEND_ERROR.to_string(),
        };

        (self.status_code(), Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the message cache.
pub type Result<T> = std::result::Result<T, CacheError>;
