//! Request DTOs for the KV server API
//!
//! Defines the query strings and JSON bodies accepted by the endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{KvError, Result};

/// Query string for `GET /set?key=K&value=V`
#[derive(Debug, Clone, Default)]
pub struct SetQuery {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl SetQuery {
    /// Builds the query from raw pairs, keeping the first value per name.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            key: first_value(&pairs, "key"),
            value: first_value(&pairs, "value"),
        }
    }

    /// Returns the key/value pair, rejecting missing or empty parameters.
    pub fn into_pair(self) -> Result<(String, String)> {
        match (non_empty(self.key), non_empty(self.value)) {
            (Some(key), Some(value)) => Ok((key, value)),
            _ => Err(KvError::MissingParameter(
                "Key or value not provided".to_string(),
            )),
        }
    }
}

/// JSON body for `POST /set`
///
/// `value` may be any JSON value. Strings are stored verbatim, everything
/// else is stored as its serialized JSON text.
#[derive(Debug, Clone, Deserialize)]
pub struct SetBody {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl SetBody {
    /// Returns the key and the value as it should be stored.
    pub fn into_pair(self) -> Result<(String, String)> {
        let value = match self.value {
            Some(Value::String(text)) => Some(text),
            None | Some(Value::Null) => None,
            Some(other) => Some(serde_json::to_string(&other)?),
        };

        match (non_empty(self.key), non_empty(value)) {
            (Some(key), Some(value)) => Ok((key, value)),
            _ => Err(KvError::MissingParameter(
                "Key or value not provided".to_string(),
            )),
        }
    }
}

/// Query string for `GET /get?key=K` and `DELETE /delete?key=K`
#[derive(Debug, Clone, Default)]
pub struct KeyQuery {
    pub key: Option<String>,
}

impl KeyQuery {
    /// Builds the query from raw pairs, keeping the first `key`.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            key: first_value(&pairs, "key"),
        }
    }

    /// Returns the key, rejecting a missing or empty parameter.
    pub fn into_key(self) -> Result<String> {
        non_empty(self.key).ok_or_else(|| KvError::MissingParameter("Key not provided".to_string()))
    }
}

fn first_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
