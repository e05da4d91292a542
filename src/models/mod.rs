//! Request and Response models for the KV server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP query strings and bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{KeyQuery, SetBody, SetQuery};
pub use responses::{DeleteResponse, ErrorResponse, GetResponse, HealthResponse};
