//! Backend entry-point: loads settings, prepares storage and serves the
//! catalogue REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalog_backend::inbound::http::health::HealthState;
use catalog_backend::outbound::persistence::{DbPool, run_migrations};
use catalog_backend::settings::CatalogSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CatalogSettings::load().wrap_err("failed to load configuration")?;
    let mut config = ServerConfig::from_settings(&settings)?;

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            let url = pool_config.database_url().to_owned();
            let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
                .await
                .map_err(|err| eyre!("migration task failed: {err}"))??;
            info!(applied, "database migrations complete");
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    info!(
        addr = %config.bind_addr(),
        storage = config.storage().label(),
        "starting catalogue server"
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}

#[cfg(test)]
mod tests;
