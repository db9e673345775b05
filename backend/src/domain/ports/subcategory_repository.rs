//! Port for subcategory storage.

use async_trait::async_trait;

use crate::domain::catalog::{ListWindow, NewSubcategory, Subcategory, SubcategoryPatch};
use crate::domain::identifiers::Slug;

use super::CatalogRepositoryError;

/// Storage for subcategories.
///
/// Writes referencing an unknown category or brand fail with
/// [`CatalogRepositoryError::MissingReference`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubcategoryRepository: Send + Sync {
    async fn list(&self, window: ListWindow) -> Result<Vec<Subcategory>, CatalogRepositoryError>;

    /// Every subcategory of one category, ordered by id.
    async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<Subcategory>, CatalogRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Subcategory>, CatalogRepositoryError>;

    async fn find_by_slug(&self, slug: &Slug)
    -> Result<Option<Subcategory>, CatalogRepositoryError>;

    async fn create(
        &self,
        subcategory: &NewSubcategory,
    ) -> Result<Subcategory, CatalogRepositoryError>;

    async fn update(
        &self,
        id: i32,
        patch: &SubcategoryPatch,
    ) -> Result<Option<Subcategory>, CatalogRepositoryError>;

    /// Fails with [`CatalogRepositoryError::StillReferenced`] while products
    /// point at the subcategory.
    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError>;
}
