//! API Routes
//!
//! Configures the Axum router with all KV server endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, set_body_handler, set_query_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /set?key=K&value=V` - Store a pair from query parameters
/// - `POST /set` - Store a pair from a JSON body
/// - `GET /get?key=K` - Retrieve a record
/// - `DELETE /delete?key=K` - Delete a key
/// - `GET /health` - Health check endpoint
///
/// Any other method on a known path is answered with 405.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", get(set_query_handler).post(set_body_handler))
        .route("/get", get(get_handler))
        .route("/delete", delete(delete_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
