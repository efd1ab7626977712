//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default number of advisors held in the read cache
pub const DEFAULT_CACHE_CAPACITY: usize = 5;

/// Default HTTP server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of advisors the cache can hold
    pub cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Cached advisors (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// A capacity of 0 is kept as is and rejected when the cache is built.
    pub fn from_env() -> Self {
        Self {
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(DEFAULT_CACHE_CAPACITY),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
