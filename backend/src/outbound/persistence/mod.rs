//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the catalogue storage ports backed by
//! PostgreSQL through `diesel-async` and `bb8` connection pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types.
//! - Row structs (`models.rs`) and the schema (`schema.rs`) never leave this
//!   module.
//! - Database errors are mapped to [`CatalogRepositoryError`] with the
//!   violated constraint name preserved.
//!
//! [`CatalogRepositoryError`]: crate::domain::ports::CatalogRepositoryError
//!
//! # Example
//!
//! ```ignore
//! use catalog_backend::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalog")).await?;
//! let products = DieselProductRepository::new(pool);
//! ```

mod diesel_brand_repository;
mod diesel_category_repository;
mod diesel_characteristic_repository;
mod diesel_error_mapping;
mod diesel_identifier_registry;
mod diesel_product_repository;
mod diesel_tag_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_brand_repository::{DieselBrandRepository, DieselFilterRepository};
pub use diesel_category_repository::{DieselCategoryRepository, DieselSubcategoryRepository};
pub use diesel_characteristic_repository::DieselCharacteristicRepository;
pub use diesel_identifier_registry::DieselIdentifierRegistry;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
