//! Configuration Module
//!
//! Runtime settings for the HTTP binary, loaded from environment variables.
//! Cache TTLs, size caps and the sweep cadence are compile-time constants
//! (see `CachePolicy` and `CLEANUP_INTERVAL`).

use std::env;

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seed the in-memory store with sample gyms
    pub seed_sample_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SEED_SAMPLE_DATA` - `true`/`1` to pre-populate the store (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            seed_sample_data: env::var("SEED_SAMPLE_DATA")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.seed_sample_data),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            seed_sample_data: false,
        }
    }
}
