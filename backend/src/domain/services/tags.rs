//! Tag use-cases, including creation of tags on first use by products.

use std::sync::Arc;

use tracing::info;

use crate::domain::Error;
use crate::domain::catalog::{DisplayText, ListWindow, NewTag, Tag, TagDraft, TagPatch};
use crate::domain::identifiers::TagValue;
use crate::domain::ports::{CatalogRepositoryError, TagRepository};

use super::{IdentifierResolver, identifier_taken, map_repository_error, not_found, write_with_retry};

/// Tag service backed by a [`TagRepository`].
pub struct TagService<R: ?Sized = dyn TagRepository> {
    repo: Arc<R>,
    identifiers: IdentifierResolver,
}

impl<R: ?Sized> TagService<R> {
    pub fn new(repo: Arc<R>, identifiers: IdentifierResolver) -> Self {
        Self { repo, identifiers }
    }
}

impl<R> TagService<R>
where
    R: TagRepository + ?Sized,
{
    pub async fn list(&self, window: ListWindow) -> Result<Vec<Tag>, Error> {
        self.repo.list(window).await.map_err(map_repository_error)
    }

    pub async fn get(&self, id: i32) -> Result<Tag, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("tag", id))
    }

    pub async fn get_by_value(&self, value: &TagValue) -> Result<Tag, Error> {
        self.repo
            .find_by_value(value)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("tag '{value}' not found")))
    }

    /// Create a tag. Names are unique; the value is derived from the name
    /// unless given.
    pub async fn create(&self, draft: TagDraft) -> Result<Tag, Error> {
        self.ensure_name_free(&draft.name, None).await?;
        let draft = &draft;
        write_with_retry("create tag", || async move {
            let value = self
                .identifiers
                .tag_value_for_create(&draft.name, draft.value.as_ref())
                .await?;
            let tag = NewTag {
                name: draft.name.clone(),
                value,
            };
            Ok::<_, Error>(self.repo.create(&tag).await)
        })
        .await
    }

    pub async fn update(&self, id: i32, patch: TagPatch) -> Result<Tag, Error> {
        let current = &self.get(id).await?;
        if let Some(name) = patch.name.as_ref() {
            self.ensure_name_free(name, Some(id)).await?;
        }
        let patch = &patch;
        write_with_retry("update tag", || async move {
            let value = self
                .identifiers
                .tag_value_for_update(id, &current.name, patch.name.as_ref(), patch.value.as_ref())
                .await?;
            let changes = TagPatch {
                name: patch.name.clone(),
                value,
            };
            Ok::<_, Error>(self.repo.update(id, &changes).await)
        })
        .await?
        .ok_or_else(|| not_found("tag", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(map_repository_error)? {
            Ok(())
        } else {
            Err(not_found("tag", id))
        }
    }

    /// Ids of the tags called `names`, creating missing tags on the way.
    ///
    /// Duplicate names collapse to one id; order follows first occurrence.
    pub async fn ensure_named(&self, names: &[DisplayText]) -> Result<Vec<i32>, Error> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = self.find_or_create(name).await?.id;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    async fn find_or_create(&self, name: &DisplayText) -> Result<Tag, Error> {
        if let Some(tag) = self.find_by_name(name).await? {
            return Ok(tag);
        }
        let value = self.identifiers.tag_value_for_create(name, None).await?;
        let tag = NewTag {
            name: name.clone(),
            value,
        };
        match self.repo.create(&tag).await {
            Ok(tag) => {
                info!(tag_id = tag.id, value = %tag.value, "created tag on first use");
                Ok(tag)
            }
            // A concurrent writer created the same name or value first.
            Err(CatalogRepositoryError::UniqueViolation { .. }) => match self.find_by_name(name).await? {
                Some(tag) => Ok(tag),
                None => {
                    self.create(TagDraft {
                        name: name.clone(),
                        value: None,
                    })
                    .await
                }
            },
            Err(error) => Err(map_repository_error(error)),
        }
    }

    async fn find_by_name(&self, name: &DisplayText) -> Result<Option<Tag>, Error> {
        self.repo.find_by_name(name).await.map_err(map_repository_error)
    }

    async fn ensure_name_free(&self, name: &DisplayText, exclude_id: Option<i32>) -> Result<(), Error> {
        match self.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != exclude_id => {
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
    use crate::domain::ports::{MockIdentifierRegistry, MockTagRepository, constraints};
    use crate::test_support::FixtureClock;

    fn text(value: &str) -> DisplayText {
        DisplayText::new(value).expect("valid text")
    }

    fn tag(id: i32, name: &str, value: &str) -> Tag {
        Tag {
            id,
            name: text(name),
            value: TagValue::parse(value).expect("valid value"),
        }
    }

    fn free_registry() -> MockIdentifierRegistry {
        let mut registry = MockIdentifierRegistry::new();
        registry.expect_tag_value_taken().returning(|_, _| Ok(false));
        registry
    }

    fn service(repo: MockTagRepository, registry: MockIdentifierRegistry) -> TagService<MockTagRepository> {
        TagService::new(
            Arc::new(repo),
            IdentifierResolver::new(Arc::new(registry), Arc::new(FixtureClock::default())),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_name()
            .returning(|_| Ok(Some(tag(1, "Sale", "sale"))));
        repo.expect_create().never();

        let error = service(repo, free_registry())
            .create(TagDraft {
                name: text("Sale"),
                value: None,
            })
            .await
            .expect_err("duplicate name");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.details().expect("details")["field"], "name");
    }

    #[rstest]
    #[tokio::test]
    async fn ensure_named_creates_missing_tags_once() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_name().returning(|name| {
            Ok((name.as_str() == "Sale").then(|| tag(1, "Sale", "sale")))
        });
        repo.expect_create()
            .withf(|new| new.name.as_str() == "New arrivals" && new.value.as_str() == "new_arrivals")
            .times(1)
            .returning(|new| Ok(tag(2, new.name.as_str(), new.value.as_str())));

        let ids = service(repo, free_registry())
            .ensure_named(&[text("Sale"), text("New arrivals"), text("Sale")])
            .await
            .expect("tags resolved");
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn ensure_named_adopts_tag_created_concurrently() {
        let mut repo = MockTagRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_find_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(CatalogRepositoryError::unique_violation(constraints::TAG_NAME)));
        repo.expect_find_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(tag(8, "Trail", "trail"))));

        let ids = service(repo, free_registry())
            .ensure_named(&[text("Trail")])
            .await
            .expect("tag adopted");
        assert_eq!(ids, vec![8]);
    }

    #[rstest]
    #[tokio::test]
    async fn rename_regenerates_value() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(tag(id, "Sale", "sale"))));
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_update()
            .withf(|_, patch| patch.value.as_ref().map(TagValue::as_str) == Some("summer_sale"))
            .times(1)
            .returning(|id, _| Ok(Some(tag(id, "Summer sale", "summer_sale"))));

        let updated = service(repo, free_registry())
            .update(
                4,
                TagPatch {
                    name: Some(text("Summer sale")),
                    value: None,
                },
            )
            .await
            .expect("renamed");
        assert_eq!(updated.value.as_str(), "summer_sale");
    }
}
