//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::store::{OverwritePolicy, DEFAULT_MAX_AGE_SECS, DEFAULT_SWEEP_INTERVAL_SECS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between expiry sweeps
    pub sweep_interval: u64,
    /// Seconds a record may live, measured from its creation timestamp
    pub max_age: u64,
    /// Treatment of `createdAt` when an existing key is set again
    pub overwrite_policy: OverwritePolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 86400)
    /// - `MAX_AGE` - Record lifetime in seconds (default: 86400)
    /// - `OVERWRITE_POLICY` - `refresh` or `preserve` (default: refresh)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_var::<u64>("SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            max_age: parse_var("MAX_AGE").unwrap_or(defaults.max_age),
            overwrite_policy: env::var("OVERWRITE_POLICY")
                .ok()
                .and_then(|v| OverwritePolicy::parse(&v))
                .unwrap_or(defaults.overwrite_policy),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            max_age: DEFAULT_MAX_AGE_SECS,
            overwrite_policy: OverwritePolicy::Refresh,
        }
    }
}
