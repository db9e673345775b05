//! Port for category storage.

use async_trait::async_trait;

use crate::domain::catalog::{Category, CategoryPatch, ListWindow, NewCategory};
use crate::domain::identifiers::Slug;

use super::CatalogRepositoryError;

/// Storage for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories ordered by id.
    async fn list(&self, window: ListWindow) -> Result<Vec<Category>, CatalogRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, CatalogRepositoryError>;

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, CatalogRepositoryError>;

    /// Insert a category.
    ///
    /// Fails with [`CatalogRepositoryError::UniqueViolation`] when the slug is
    /// held by another category.
    async fn create(&self, category: &NewCategory) -> Result<Category, CatalogRepositoryError>;

    /// Apply `patch`, returning `None` when no category has `id`.
    async fn update(
        &self,
        id: i32,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CatalogRepositoryError>;

    /// Delete a category, returning `false` when it did not exist.
    ///
    /// Fails with [`CatalogRepositoryError::StillReferenced`] while
    /// subcategories or filters point at it.
    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError>;
}
