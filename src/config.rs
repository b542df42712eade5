//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::TtlPolicy;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// TTL in milliseconds for entries with no TTL and no known category
    pub default_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Tags whose invalidations are logged
    pub watch_tags: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 500)
    /// - `DEFAULT_TTL_MS` - Fallback TTL in milliseconds (default: 300000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `WATCH_TAGS` - Comma separated tags to log invalidations for
    ///   (default: `yield-curve`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl_ms: parse_var::<u64>("DEFAULT_TTL_MS")
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.default_ttl_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            watch_tags: env::var("WATCH_TAGS")
                .map(|v| split_tags(&v))
                .unwrap_or(defaults.watch_tags),
        }
    }

    /// TTL policy with the standard categories and this config's fallback.
    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy::default().with_fallback(Duration::from_millis(self.default_ttl_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 500,
            default_ttl_ms: 300_000,
            server_port: 3000,
            watch_tags: vec!["yield-curve".to_string()],
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
