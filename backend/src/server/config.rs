//! Runtime wiring chosen at start-up: listen address, storage backend and
//! identifier retry bound.

use std::net::SocketAddr;

use catalog_backend::domain::identifiers::RetryPolicy;
use catalog_backend::outbound::persistence::DbPool;
use catalog_backend::settings::{CatalogSettings, SettingsError};

/// Backend that serves the catalogue ports.
#[derive(Clone, Default)]
pub enum Storage {
    /// Process-local store; contents vanish on restart.
    #[default]
    Memory,
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
}

impl Storage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// Everything [`super::create_server`] needs.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) identifier_policy: RetryPolicy,
}

impl ServerConfig {
    /// In-memory server on `bind_addr` with the default retry bound.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            storage: Storage::Memory,
            identifier_policy: RetryPolicy::default(),
        }
    }

    /// Address and retry bound from loaded settings. Storage stays in memory
    /// until a pool is attached.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the configured address does not parse.
    pub fn from_settings(settings: &CatalogSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?).with_identifier_policy(settings.identifier_policy()))
    }

    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.storage = Storage::Postgres(pool);
        self
    }

    #[must_use]
    pub fn with_identifier_policy(mut self, policy: RetryPolicy) -> Self {
        self.identifier_policy = policy;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
