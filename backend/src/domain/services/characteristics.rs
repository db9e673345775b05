//! Characteristic template use-cases.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::catalog::{
    CharacteristicTemplate, CharacteristicTemplateDraft, CharacteristicTemplatePatch, DisplayText,
    ListWindow,
};
use crate::domain::ports::CharacteristicRepository;

use super::{identifier_taken, map_repository_error, not_found};

/// Characteristic template service backed by a [`CharacteristicRepository`].
pub struct CharacteristicService<R: ?Sized = dyn CharacteristicRepository> {
    repo: Arc<R>,
}

impl<R: ?Sized> CharacteristicService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> CharacteristicService<R>
where
    R: CharacteristicRepository + ?Sized,
{
    pub async fn list(&self, window: ListWindow) -> Result<Vec<CharacteristicTemplate>, Error> {
        self.repo.list(window).await.map_err(map_repository_error)
    }

    pub async fn get(&self, id: i32) -> Result<CharacteristicTemplate, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("characteristic template", id))
    }

    pub async fn create(
        &self,
        draft: CharacteristicTemplateDraft,
    ) -> Result<CharacteristicTemplate, Error> {
        self.ensure_name_free(&draft.name, None).await?;
        self.repo.create(&draft).await.map_err(map_repository_error)
    }

    pub async fn update(
        &self,
        id: i32,
        patch: CharacteristicTemplatePatch,
    ) -> Result<CharacteristicTemplate, Error> {
        if let Some(name) = patch.name.as_ref() {
            self.ensure_name_free(name, Some(id)).await?;
        }
        self.repo
            .update(id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("characteristic template", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(map_repository_error)? {
            Ok(())
        } else {
            Err(not_found("characteristic template", id))
        }
    }

    async fn ensure_name_free(&self, name: &DisplayText, exclude_id: Option<i32>) -> Result<(), Error> {
        let existing = self
            .repo
            .find_by_name(name)
            .await
            .map_err(map_repository_error)?;
        match existing {
            Some(template) if Some(template.id) != exclude_id => {
                Err(identifier_taken("name", name.as_str()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::catalog::{CharacteristicItem, CharacteristicItemDraft};
    use crate::domain::ports::{CatalogRepositoryError, MockCharacteristicRepository, constraints};

    fn text(value: &str) -> DisplayText {
        DisplayText::new(value).expect("valid text")
    }

    fn template(id: i32, name: &str) -> CharacteristicTemplate {
        CharacteristicTemplate {
            id,
            name: text(name),
            description: None,
            items: vec![CharacteristicItem {
                id: 10,
                template_id: id,
                name: text("Sole"),
                label: "Sole".into(),
                value: "Rubber".into(),
            }],
        }
    }

    fn draft(name: &str) -> CharacteristicTemplateDraft {
        CharacteristicTemplateDraft {
            name: text(name),
            description: Some("Running shoes".into()),
            items: vec![CharacteristicItemDraft {
                name: text("Sole"),
                label: "Sole".into(),
                value: "Rubber".into(),
            }],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_template_with_items() {
        let mut repo = MockCharacteristicRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|draft| draft.items.len() == 1)
            .times(1)
            .returning(|draft| Ok(template(3, draft.name.as_str())));

        let created = CharacteristicService::new(Arc::new(repo))
            .create(draft("Shoes"))
            .await
            .expect("created");
        assert_eq!(created.id, 3);
        assert_eq!(created.items[0].template_id, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let mut repo = MockCharacteristicRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(template(1, name.as_str()))));
        repo.expect_create().never();

        let error = CharacteristicService::new(Arc::new(repo))
            .create(draft("Shoes"))
            .await
            .expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn renaming_to_own_name_is_allowed() {
        let mut repo = MockCharacteristicRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(template(5, name.as_str()))));
        repo.expect_update()
            .times(1)
            .returning(|id, _| Ok(Some(template(id, "Shoes"))));

        let patch = CharacteristicTemplatePatch {
            name: Some(text("Shoes")),
            ..CharacteristicTemplatePatch::default()
        };
        let updated = CharacteristicService::new(Arc::new(repo))
            .update(5, patch)
            .await
            .expect("updated");
        assert_eq!(updated.id, 5);
    }

    #[rstest]
    #[tokio::test]
    async fn racing_insert_surfaces_as_conflict() {
        let mut repo = MockCharacteristicRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(CatalogRepositoryError::unique_violation(constraints::TEMPLATE_NAME)));

        let error = CharacteristicService::new(Arc::new(repo))
            .create(draft("Shoes"))
            .await
            .expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.details().expect("details")["field"], "name");
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_missing_template_is_not_found() {
        let mut repo = MockCharacteristicRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let error = CharacteristicService::new(Arc::new(repo))
            .delete(42)
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
