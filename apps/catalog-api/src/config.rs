//! Catalog API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use catalog_core::DEFAULT_SEARCH_LIMIT;
use catalog_db::DbConfig;

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// SQLite database file (or `:memory:`)
    pub database_path: PathBuf,

    /// Maximum pooled connections
    pub pool_max_connections: u32,

    /// Idle connections kept open
    pub pool_min_connections: u32,

    /// Maximum lifetime of a pooled connection in seconds
    pub conn_max_lifetime_secs: u64,

    /// Seconds to wait for a free connection
    pub acquire_timeout_secs: u64,

    /// Seconds a single query or transaction may run
    pub operation_timeout_secs: u64,

    /// Tracing filter directive overriding the default (e.g. `debug`)
    pub log_level: Option<String>,

    /// Page size used when a list request carries no `limit`
    pub default_search_limit: i64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            bind_addr: parse_or(&lookup, "BIND_ADDR", "0.0.0.0:8080")?,

            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| "catalog.db".to_string())
                .into(),

            pool_max_connections: parse_or(&lookup, "DB_POOL_SIZE_MAX", "10")?,

            pool_min_connections: parse_or(&lookup, "DB_POOL_SIZE_IDLE", "2")?,

            conn_max_lifetime_secs: parse_or(&lookup, "DB_CONN_MAX_LIFETIME_SECS", "600")?,

            acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", "30")?,

            operation_timeout_secs: parse_or(&lookup, "DB_OPERATION_TIMEOUT_SECS", "30")?,

            log_level: lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()),

            default_search_limit: parse_or(
                &lookup,
                "DEFAULT_SEARCH_LIMIT",
                &DEFAULT_SEARCH_LIMIT.to_string(),
            )?,
        };

        if config.pool_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_POOL_SIZE_MAX".to_string()));
        }
        if config.pool_min_connections > config.pool_max_connections {
            return Err(ConfigError::InvalidValue("DB_POOL_SIZE_IDLE".to_string()));
        }
        if config.default_search_limit < 0 {
            return Err(ConfigError::InvalidValue("DEFAULT_SEARCH_LIMIT".to_string()));
        }

        Ok(config)
    }

    /// Pool settings for [`catalog_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.pool_max_connections)
            .min_connections(self.pool_min_connections)
            .max_lifetime(Some(Duration::from_secs(self.conn_max_lifetime_secs)))
            .connect_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .operation_timeout(Duration::from_secs(self.operation_timeout_secs))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
