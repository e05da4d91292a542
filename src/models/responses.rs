//! Response DTOs for the KV server API
//!
//! Defines the structure of outgoing JSON response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::store::Record;

/// Response body for `GET /get`
///
/// `value` is the parsed JSON when the stored text is valid JSON, otherwise
/// the stored text as a JSON string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponse {
    pub key: String,
    pub value: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Record> for GetResponse {
    /// Records from `KvStore::get` already carry canonical JSON text; this
    /// only lifts it back into a `Value` so it serializes as JSON, not a string.
    fn from(record: Record) -> Self {
        let value = serde_json::from_str(&record.value).unwrap_or(Value::String(record.value));
        Self {
            key: record.key,
            value,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response body for `DELETE /delete`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
