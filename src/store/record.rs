//! Record Module
//!
//! Defines a stored key/value pair together with its timestamps.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Overwrite Policy ==
/// How `created_at` is treated when a key that already exists is set again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Both timestamps move to the time of the overwrite.
    #[default]
    Refresh,
    /// The first creation timestamp survives; only `updated_at` moves.
    Preserve,
}

impl OverwritePolicy {
    /// Parses `refresh` or `preserve` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "refresh" => Some(Self::Refresh),
            "preserve" => Some(Self::Preserve),
            _ => None,
        }
    }
}

// == Record ==
/// A single stored value with its creation and last-update timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    // == Constructor ==
    /// Creates a fresh record whose timestamps are both `now`.
    pub fn new(key: String, value: String, now: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            created_at: now,
            updated_at: now,
        }
    }

    // == Overwrite ==
    /// Replaces the value in place according to `policy`.
    ///
    /// `updated_at` never moves backwards and never falls below `created_at`.
    pub fn overwrite(&mut self, value: String, now: DateTime<Utc>, policy: OverwritePolicy) {
        self.value = value;
        match policy {
            OverwritePolicy::Refresh => {
                self.created_at = now;
                self.updated_at = now;
            }
            OverwritePolicy::Preserve => {
                self.updated_at = now.max(self.updated_at);
            }
        }
    }

    // == Age Check ==
    /// True when the record was created strictly before `cutoff`.
    pub fn created_before(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at < cutoff
    }

    // == Canonical Value ==
    /// Returns the value re-serialized through `serde_json` when it parses as
    /// JSON, or the raw value otherwise.
    pub fn canonical_value(&self) -> String {
        match serde_json::from_str::<serde_json::Value>(&self.value) {
            Ok(parsed) => serde_json::to_string(&parsed).unwrap_or_else(|_| self.value.clone()),
            Err(_) => self.value.clone(),
        }
    }
}
