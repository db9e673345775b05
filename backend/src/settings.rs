//! Service configuration loaded via OrthoConfig.
//!
//! Values layer defaults, an optional configuration file, `CATALOG_*`
//! environment variables and command-line flags.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::identifiers::{DEFAULT_MAX_ATTEMPTS, RetryPolicy};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CHECKOUT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
}

/// Configuration for the catalogue service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct CatalogSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a free pooled connection.
    pub pool_checkout_timeout_secs: Option<u64>,
    /// Candidates tried before identifier resolution gives up.
    pub identifier_max_attempts: Option<u32>,
    /// Apply embedded migrations at start-up.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl CatalogSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_checkout_timeout(&self) -> Duration {
        Duration::from_secs(
            self.pool_checkout_timeout_secs
                .unwrap_or(DEFAULT_POOL_CHECKOUT_TIMEOUT_SECS),
        )
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size())
                .with_checkout_timeout(self.pool_checkout_timeout())
        })
    }

    /// Retry policy for slug, tag value and article resolution.
    pub fn identifier_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.identifier_max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS))
    }
}
