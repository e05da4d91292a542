//! Error types for the KV server
//!
//! Errors exist only at the HTTP boundary; the store reports absence through
//! `Option` instead.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == KV Error Enum ==
/// Boundary error type for the KV server.
#[derive(Error, Debug)]
pub enum KvError {
    /// A required query parameter or body field was missing or empty
    #[error("{0}")]
    MissingParameter(String),

    /// Query string could not be decoded
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    /// Request body could not be decoded
    #[error("Failed to decode JSON data: {0}")]
    InvalidBody(String),

    /// Key not present in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// A value could not be encoded as JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KvError {
    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            KvError::MissingParameter(_) | KvError::InvalidQuery(_) | KvError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            KvError::NotFound(_) => StatusCode::NOT_FOUND,
            KvError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for KvError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the KV server.
pub type Result<T> = std::result::Result<T, KvError>;
