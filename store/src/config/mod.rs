//! Configuration management for the FitQuest store
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FQ__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Which persistence adapter to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory store, used for tests and local development
    #[default]
    Memory,
    /// Redis-backed document store
    Redis,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub redis: RedisConfig,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    /// Prefix prepended to every document key
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                key_prefix: "fitquest".to_string(),
            },
        }
    }
}

impl StoreConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FQ__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&StoreConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (FQ__ prefix)
            // e.g., FQ__REDIS__URL=redis://cache:6379 sets redis.url
            .add_source(config::Environment::with_prefix("FQ").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert_eq!(config.redis.key_prefix, "fitquest");
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!StoreConfig::is_production());
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<StoreBackend>("\"redis\"").unwrap(),
            StoreBackend::Redis
        );
        assert!(serde_json::from_str::<StoreBackend>("\"dynamo\"").is_err());
    }
}
