//! Shared PostgreSQL connection pool for the Diesel catalogue adapters.
//!
//! Connections come from `bb8` through `diesel-async`, so a checkout parks the
//! task rather than a runtime thread. Every repository clones the same
//! [`DbPool`].

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::info;

use crate::domain::ports::define_port_error;

pub(crate) const DEFAULT_MAX_SIZE: u32 = 10;
pub(crate) const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

define_port_error! {
    /// Pool failures, surfaced to callers as connection errors.
    pub enum PoolError {
        /// The pool could not be created.
        Build { message: String } => "catalogue pool could not be built: {message}",
        /// No connection became free before the checkout timeout.
        Checkout { message: String } => "catalogue connection checkout failed: {message}",
    }
}

/// Where to connect and how many connections to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Pool of up to ten connections with a thirty second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Upper bound on open connections; zero is raised to one.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// One warm connection per four allowed, at least one.
    fn min_idle(&self) -> u32 {
        (self.max_size / 4).max(1)
    }
}

/// Cloneable handle to the catalogue database.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Open the pool and its warm connections.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when the URL is unusable or the database refuses
    /// the initial connections.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(config.min_idle()))
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        let state = inner.state();
        info!(
            max_size = config.max_size,
            open = state.connections,
            idle = state.idle_connections,
            "catalogue database pool ready"
        );
        Ok(Self { inner })
    }

    /// Borrow a connection until the guard drops.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] once the checkout timeout elapses.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const URL: &str = "postgres://catalog@localhost/catalog";

    #[rstest]
    fn new_config_uses_defaults() {
        let config = PoolConfig::new(URL);
        assert_eq!(config.database_url(), URL);
        assert_eq!(config.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(config.checkout_timeout, DEFAULT_CHECKOUT_TIMEOUT);
    }

    #[rstest]
    #[case(0, 1, 1)]
    #[case(3, 3, 1)]
    #[case(10, 10, 2)]
    #[case(40, 40, 10)]
    fn warm_connections_scale_with_size(
        #[case] requested: u32,
        #[case] max_size: u32,
        #[case] min_idle: u32,
    ) {
        let config = PoolConfig::new(URL).with_max_size(requested);
        assert_eq!(config.max_size(), max_size);
        assert_eq!(config.min_idle(), min_idle);
    }

    #[rstest]
    fn checkout_error_names_the_cause() {
        let err = PoolError::checkout("timed out");
        assert_eq!(err.to_string(), "catalogue connection checkout failed: timed out");
    }
}
