//! Port for product storage.

use async_trait::async_trait;

use crate::domain::catalog::{ListWindow, NewProduct, Product, ProductChanges, ProductsByBrand};
use crate::domain::identifiers::{Article, Slug};

use super::CatalogRepositoryError;

/// Storage for products with their images, tag links and characteristic
/// links.
///
/// Adapters write a product and all of its links atomically: a failed write
/// leaves no partial product behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self, window: ListWindow) -> Result<Vec<Product>, CatalogRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, CatalogRepositoryError>;

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Product>, CatalogRepositoryError>;

    async fn find_by_article(
        &self,
        article: Article,
    ) -> Result<Option<Product>, CatalogRepositoryError>;

    /// One window of a brand's products plus the brand's product count.
    async fn list_by_brand(
        &self,
        brand_id: i32,
        window: ListWindow,
    ) -> Result<ProductsByBrand, CatalogRepositoryError>;

    /// Up to `limit` products carrying the tag plus the tag's product count.
    async fn list_by_tag(
        &self,
        tag_id: i32,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), CatalogRepositoryError>;

    /// Insert a product with its links.
    ///
    /// Fails with [`CatalogRepositoryError::UniqueViolation`] when the slug or
    /// article is held, and with [`CatalogRepositoryError::MissingReference`]
    /// when a referenced subcategory, brand or characteristic is unknown.
    async fn create(&self, product: &NewProduct) -> Result<Product, CatalogRepositoryError>;

    async fn update(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, CatalogRepositoryError>;

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError>;
}
