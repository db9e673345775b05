//! Builders for HTTP state over the configured storage adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use catalog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use catalog_backend::outbound::memory::InMemoryCatalog;
use catalog_backend::outbound::persistence::{
    DbPool, DieselBrandRepository, DieselCategoryRepository, DieselCharacteristicRepository,
    DieselFilterRepository, DieselIdentifierRegistry, DieselProductRepository,
    DieselSubcategoryRepository, DieselTagRepository,
};

use super::{ServerConfig, Storage};

/// Wire every catalogue port to its Diesel adapter.
fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    HttpStatePorts {
        categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
        subcategories: Arc::new(DieselSubcategoryRepository::new(pool.clone())),
        brands: Arc::new(DieselBrandRepository::new(pool.clone())),
        filters: Arc::new(DieselFilterRepository::new(pool.clone())),
        tags: Arc::new(DieselTagRepository::new(pool.clone())),
        products: Arc::new(DieselProductRepository::new(pool.clone())),
        characteristics: Arc::new(DieselCharacteristicRepository::new(pool.clone())),
        identifiers: Arc::new(DieselIdentifierRegistry::new(pool.clone())),
    }
}

/// Build the shared HTTP state, using the database when a pool is
/// configured and the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match config.storage() {
        Storage::Postgres(pool) => diesel_ports(pool),
        Storage::Memory => {
            info!("no database configured; using the in-memory catalogue");
            HttpStatePorts::shared(Arc::new(InMemoryCatalog::new()))
        }
    };
    let policy = config.identifier_policy;
    web::Data::new(HttpState::new(
        ports,
        Arc::new(DefaultClock),
        move |resolver| resolver.with_policy(policy),
    ))
}
