//! Mini KV - A minimal in-memory key/value store over HTTP
//!
//! Records live in a single lock-guarded map and are swept once they
//! outlive a fixed maximum age.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::{KvStore, OverwritePolicy, Record};
pub use tasks::{spawn_sweep_task, SweepHandle};
