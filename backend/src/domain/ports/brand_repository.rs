//! Port for brand storage.

use async_trait::async_trait;

use crate::domain::catalog::{Brand, BrandDraft, ListWindow};

use super::CatalogRepositoryError;

/// Storage for brands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn list(&self, window: ListWindow) -> Result<Vec<Brand>, CatalogRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Brand>, CatalogRepositoryError>;

    async fn create(&self, brand: &BrandDraft) -> Result<Brand, CatalogRepositoryError>;

    /// Replace every field of the brand.
    async fn update(
        &self,
        id: i32,
        brand: &BrandDraft,
    ) -> Result<Option<Brand>, CatalogRepositoryError>;

    /// Fails with [`CatalogRepositoryError::StillReferenced`] while products
    /// or subcategories point at the brand.
    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError>;
}
