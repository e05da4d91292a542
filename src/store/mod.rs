//! Store Module
//!
//! Provides the in-memory record map with fixed-age expiry.

mod kv;
mod record;


// Re-export public types
pub use kv::KvStore;
pub use record::{OverwritePolicy, Record};

// == Public Constants ==
/// Default age after which the sweep removes a record (24 hours)
pub const DEFAULT_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// Default period between expiry sweeps (24 hours)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;
