//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

/// Default log filter when `GEECACHE_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "geecache=info";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Byte budget for keys plus values, 0 = unbounded
    pub max_bytes: usize,
    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GEECACHE_MAX_BYTES` - Byte budget (default: 0, unbounded)
    /// - `GEECACHE_LOG` - Log filter (default: "geecache=info")
    pub fn from_env() -> Self {
        Self {
            max_bytes: env::var("GEECACHE_MAX_BYTES")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            log_filter: env::var("GEECACHE_LOG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: 0,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_bytes, 0);
        assert_eq!(config.log_filter, "geecache=info");
    }

    // Env vars are process-global, so set and clear them in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("GEECACHE_MAX_BYTES");
        env::remove_var("GEECACHE_LOG");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("GEECACHE_MAX_BYTES", "1024");
        env::set_var("GEECACHE_LOG", "geecache=debug");
        let config = Config::from_env();
        assert_eq!(config.max_bytes, 1024);
        assert_eq!(config.log_filter, "geecache=debug");

        // Negative or garbage budgets fall back to unbounded
        env::set_var("GEECACHE_MAX_BYTES", "-5");
        assert_eq!(Config::from_env().max_bytes, 0);

        env::remove_var("GEECACHE_MAX_BYTES");
        env::remove_var("GEECACHE_LOG");
    }
}
