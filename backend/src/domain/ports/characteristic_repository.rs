//! Port for characteristic template storage.

use async_trait::async_trait;

use crate::domain::catalog::{
    CharacteristicTemplate, CharacteristicTemplateDraft, CharacteristicTemplatePatch, DisplayText,
    ListWindow,
};

use super::CatalogRepositoryError;

/// Storage for characteristic templates and their items.
///
/// A template and its items are written atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacteristicRepository: Send + Sync {
    async fn list(
        &self,
        window: ListWindow,
    ) -> Result<Vec<CharacteristicTemplate>, CatalogRepositoryError>;

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError>;

    async fn find_by_name(
        &self,
        name: &DisplayText,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError>;

    async fn create(
        &self,
        template: &CharacteristicTemplateDraft,
    ) -> Result<CharacteristicTemplate, CatalogRepositoryError>;

    /// Apply `patch`; present `items` replace every existing item.
    async fn update(
        &self,
        id: i32,
        patch: &CharacteristicTemplatePatch,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError>;

    /// Delete a template, its items and every product link to those items.
    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError>;
}
