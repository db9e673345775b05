//! Filter use-cases.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::catalog::{Filter, FilterDraft, ListWindow};
use crate::domain::ports::FilterRepository;

use super::{map_repository_error, not_found};

/// Filter service backed by a [`FilterRepository`].
pub struct FilterService<R: ?Sized = dyn FilterRepository> {
    repo: Arc<R>,
}

impl<R: ?Sized> FilterService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> FilterService<R>
where
    R: FilterRepository + ?Sized,
{
    pub async fn list(&self, window: ListWindow) -> Result<Vec<Filter>, Error> {
        self.repo.list(window).await.map_err(map_repository_error)
    }

    pub async fn list_by_category(&self, category_id: i32) -> Result<Vec<Filter>, Error> {
        self.repo
            .list_by_category(category_id)
            .await
            .map_err(map_repository_error)
    }

    pub async fn get(&self, id: i32) -> Result<Filter, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("filter", id))
    }

    pub async fn create(&self, draft: FilterDraft) -> Result<Filter, Error> {
        self.repo.create(&draft).await.map_err(map_repository_error)
    }

    pub async fn update(&self, id: i32, draft: FilterDraft) -> Result<Filter, Error> {
        self.repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("filter", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(map_repository_error)? {
            Ok(())
        } else {
            Err(not_found("filter", id))
        }
    }
}
