//! API Module
//!
//! HTTP handlers and routing for the KV server.
//!
//! # Endpoints
//! - `GET|POST /set` - Store a key-value pair
//! - `GET /get?key=K` - Retrieve a record
//! - `DELETE /delete?key=K` - Delete a key
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
