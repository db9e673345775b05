//! Port for tag storage.

use async_trait::async_trait;

use crate::domain::catalog::{DisplayText, ListWindow, NewTag, Tag, TagPatch};
use crate::domain::identifiers::TagValue;

use super::CatalogRepositoryError;

/// Storage for tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list(&self, window: ListWindow) -> Result<Vec<Tag>, CatalogRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, CatalogRepositoryError>;

    async fn find_by_name(&self, name: &DisplayText) -> Result<Option<Tag>, CatalogRepositoryError>;

    async fn find_by_value(&self, value: &TagValue) -> Result<Option<Tag>, CatalogRepositoryError>;

    /// Insert a tag.
    ///
    /// Fails with [`CatalogRepositoryError::UniqueViolation`] when the name or
    /// value is already held.
    async fn create(&self, tag: &NewTag) -> Result<Tag, CatalogRepositoryError>;

    async fn update(&self, id: i32, patch: &TagPatch) -> Result<Option<Tag>, CatalogRepositoryError>;

    /// Delete a tag and its product links.
    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError>;
}
