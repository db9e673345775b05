//! Subcategory use-cases.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::catalog::{
    ListWindow, NewSubcategory, Subcategory, SubcategoryDraft, SubcategoryPatch,
};
use crate::domain::identifiers::Slug;
use crate::domain::ports::{SlugScope, SubcategoryRepository};

use super::{IdentifierResolver, map_repository_error, not_found, write_with_retry};

/// Subcategory service backed by a [`SubcategoryRepository`].
pub struct SubcategoryService<R: ?Sized = dyn SubcategoryRepository> {
    repo: Arc<R>,
    identifiers: IdentifierResolver,
}

impl<R: ?Sized> SubcategoryService<R> {
    pub fn new(repo: Arc<R>, identifiers: IdentifierResolver) -> Self {
        Self { repo, identifiers }
    }
}

impl<R> SubcategoryService<R>
where
    R: SubcategoryRepository + ?Sized,
{
    pub async fn list(&self, window: ListWindow) -> Result<Vec<Subcategory>, Error> {
        self.repo.list(window).await.map_err(map_repository_error)
    }

    pub async fn list_by_category(&self, category_id: i32) -> Result<Vec<Subcategory>, Error> {
        self.repo
            .list_by_category(category_id)
            .await
            .map_err(map_repository_error)
    }

    pub async fn get(&self, id: i32) -> Result<Subcategory, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("subcategory", id))
    }

    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Subcategory, Error> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("subcategory '{slug}' not found")))
    }

    pub async fn create(&self, draft: SubcategoryDraft) -> Result<Subcategory, Error> {
        let draft = &draft;
        write_with_retry("create subcategory", || async move {
            let slug = self
                .identifiers
                .slug_for_create(SlugScope::Subcategory, &draft.text, draft.slug.as_ref())
                .await?;
            let subcategory = NewSubcategory {
                text: draft.text.clone(),
                slug,
                image: draft.image.clone(),
                category_id: draft.category_id,
                brand_id: draft.brand_id,
            };
            Ok::<_, Error>(self.repo.create(&subcategory).await)
        })
        .await
    }

    pub async fn update(&self, id: i32, patch: SubcategoryPatch) -> Result<Subcategory, Error> {
        let current = &self.get(id).await?;
        let patch = &patch;
        write_with_retry("update subcategory", || async move {
            let slug = self
                .identifiers
                .slug_for_update(
                    SlugScope::Subcategory,
                    id,
                    &current.text,
                    patch.text.as_ref(),
                    patch.slug.as_ref(),
                )
                .await?;
            let changes = SubcategoryPatch {
                slug,
                ..patch.clone()
            };
            Ok::<_, Error>(self.repo.update(id, &changes).await)
        })
        .await?
        .ok_or_else(|| not_found("subcategory", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(map_repository_error)? {
            Ok(())
        } else {
            Err(not_found("subcategory", id))
        }
    }
}
