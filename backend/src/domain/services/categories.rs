//! Category use-cases.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::catalog::{Category, CategoryDraft, CategoryPatch, ListWindow, NewCategory};
use crate::domain::identifiers::Slug;
use crate::domain::ports::{CategoryRepository, SlugScope};

use super::{IdentifierResolver, map_repository_error, not_found, write_with_retry};

/// Category service backed by a [`CategoryRepository`].
pub struct CategoryService<R: ?Sized = dyn CategoryRepository> {
    repo: Arc<R>,
    identifiers: IdentifierResolver,
}

impl<R: ?Sized> CategoryService<R> {
    pub fn new(repo: Arc<R>, identifiers: IdentifierResolver) -> Self {
        Self { repo, identifiers }
    }
}

impl<R> CategoryService<R>
where
    R: CategoryRepository + ?Sized,
{
    pub async fn list(&self, window: ListWindow) -> Result<Vec<Category>, Error> {
        self.repo.list(window).await.map_err(map_repository_error)
    }

    pub async fn get(&self, id: i32) -> Result<Category, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("category", id))
    }

    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Category, Error> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("category '{slug}' not found")))
    }

    /// Create a category, deriving its slug from the text when none is given.
    pub async fn create(&self, draft: CategoryDraft) -> Result<Category, Error> {
        let draft = &draft;
        write_with_retry("create category", || async move {
            let slug = self
                .identifiers
                .slug_for_create(SlugScope::Category, &draft.text, draft.slug.as_ref())
                .await?;
            let category = NewCategory {
                text: draft.text.clone(),
                slug,
                icon: draft.icon.clone(),
            };
            Ok::<_, Error>(self.repo.create(&category).await)
        })
        .await
    }

    /// Update a category; the slug follows the text unless given explicitly.
    pub async fn update(&self, id: i32, patch: CategoryPatch) -> Result<Category, Error> {
        let current = &self.get(id).await?;
        let patch = &patch;
        write_with_retry("update category", || async move {
            let slug = self
                .identifiers
                .slug_for_update(
                    SlugScope::Category,
                    id,
                    &current.text,
                    patch.text.as_ref(),
                    patch.slug.as_ref(),
                )
                .await?;
            let changes = CategoryPatch {
                slug,
                ..patch.clone()
            };
            Ok::<_, Error>(self.repo.update(id, &changes).await)
        })
        .await?
        .ok_or_else(|| not_found("category", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(map_repository_error)? {
            Ok(())
        } else {
            Err(not_found("category", id))
        }
    }
}
