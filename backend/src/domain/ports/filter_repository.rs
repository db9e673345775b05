//! Port for filter storage.

use async_trait::async_trait;

use crate::domain::catalog::{Filter, FilterDraft, ListWindow};

use super::CatalogRepositoryError;

/// Storage for category filters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterRepository: Send + Sync {
    async fn list(&self, window: ListWindow) -> Result<Vec<Filter>, CatalogRepositoryError>;

    async fn list_by_category(&self, category_id: i32)
    -> Result<Vec<Filter>, CatalogRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Filter>, CatalogRepositoryError>;

    async fn create(&self, filter: &FilterDraft) -> Result<Filter, CatalogRepositoryError>;

    /// Replace every field of the filter.
    async fn update(
        &self,
        id: i32,
        filter: &FilterDraft,
    ) -> Result<Option<Filter>, CatalogRepositoryError>;

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError>;
}
