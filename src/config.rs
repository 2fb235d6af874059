//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheEntryOptions;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Sliding expiration of cached category views in seconds
    pub cache_sliding_secs: u64,
    /// Absolute expiration of cached category views in seconds
    pub cache_absolute_secs: u64,
    /// SQLite database URL; None selects the in-memory store
    pub database_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `CACHE_SLIDING_SECS` - Sliding expiration in seconds (default: 600)
    /// - `CACHE_ABSOLUTE_SECS` - Absolute expiration in seconds (default: 86400)
    /// - `DATABASE_URL` - e.g. `sqlite:categories.db` (default: unset, in-memory store)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            cache_sliding_secs: parse_var("CACHE_SLIDING_SECS")
                .unwrap_or(defaults.cache_sliding_secs),
            cache_absolute_secs: parse_var("CACHE_ABSOLUTE_SECS")
                .unwrap_or(defaults.cache_absolute_secs),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        }
    }

    /// Expiration policy applied to every cached category view.
    pub fn cache_policy(&self) -> CacheEntryOptions {
        CacheEntryOptions::new()
            .with_sliding_expiration(Duration::from_secs(self.cache_sliding_secs))
            .with_absolute_expiration(Duration::from_secs(self.cache_absolute_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 60,
            cache_sliding_secs: 600,
            cache_absolute_secs: 86_400,
            database_url: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::default_cache_policy;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.cache_sliding_secs, 600);
        assert_eq!(config.cache_absolute_secs, 86_400);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_default_policy_matches_service_constants() {
        assert_eq!(Config::default().cache_policy(), default_cache_policy());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("CACHE_SLIDING_SECS");
        env::remove_var("CACHE_ABSOLUTE_SECS");
        env::remove_var("DATABASE_URL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.cache_sliding_secs, 600);
        assert!(config.database_url.is_none());
    }
}
