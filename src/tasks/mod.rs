//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes records older than the store's maximum age

mod sweep;

pub use sweep::{spawn_sweep_task, SweepHandle, MIN_SWEEP_INTERVAL};
