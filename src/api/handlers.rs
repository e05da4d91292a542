//! API Handlers
//!
//! HTTP request handlers for each KV server endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::debug;

use crate::config::Config;
use crate::error::{KvError, Result};
use crate::models::{DeleteResponse, GetResponse, HealthResponse, KeyQuery, SetBody, SetQuery};
use crate::store::KvStore;

/// Application state shared across all handlers.
///
/// The store does its own locking, so handlers only share an `Arc` to it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<KvStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: KvStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(KvStore::new(config.max_age(), config.overwrite_policy))
    }
}

/// Query strings are taken as raw pairs; a repeated parameter resolves to
/// its first occurrence and rejections surface as [`KvError`].
type QueryPairs = std::result::Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Handler for GET /set?key=K&value=V
pub async fn set_query_handler(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<String> {
    let Query(pairs) = query?;
    let (key, value) = SetQuery::from_pairs(pairs).into_pair()?;
    let message = format!("Key {} set to value {}\n", key, value);

    state.store.set(key, value).await;
    Ok(message)
}

/// Handler for POST /set
///
/// The body is decoded by hand so that any undecodable payload is a 400,
/// whatever its content type.
pub async fn set_body_handler(State(state): State<AppState>, body: Bytes) -> Result<&'static str> {
    let body: SetBody =
        serde_json::from_slice(&body).map_err(|e| KvError::InvalidBody(e.to_string()))?;
    let (key, value) = body.into_pair()?;

    debug!(key = %key, "Setting key from JSON body");
    state.store.set(key, value).await;
    Ok("ok\n")
}

/// Handler for GET /get?key=K
pub async fn get_handler(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<GetResponse>> {
    let Query(pairs) = query?;
    let key = KeyQuery::from_pairs(pairs).into_key()?;
    let found = state.store.get(&key).await;
    let record = found.ok_or(KvError::NotFound(key))?;

    Ok(Json(GetResponse::from(record)))
}

/// Handler for DELETE /delete?key=K
///
/// Lookup and removal happen under one exclusive lock acquisition.
pub async fn delete_handler(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<DeleteResponse>> {
    let Query(pairs) = query?;
    let key = KeyQuery::from_pairs(pairs).into_key()?;
    let removed = state.store.delete(&key).await;
    match removed {
        Some(_) => Ok(Json(DeleteResponse::new(key))),
        None => Err(KvError::NotFound(key)),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
