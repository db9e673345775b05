//! Brand use-cases.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::catalog::{Brand, BrandDraft, ListWindow};
use crate::domain::ports::BrandRepository;

use super::{map_repository_error, not_found};

/// Brand service backed by a [`BrandRepository`].
pub struct BrandService<R: ?Sized = dyn BrandRepository> {
    repo: Arc<R>,
}

impl<R: ?Sized> BrandService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> BrandService<R>
where
    R: BrandRepository + ?Sized,
{
    pub async fn list(&self, window: ListWindow) -> Result<Vec<Brand>, Error> {
        self.repo.list(window).await.map_err(map_repository_error)
    }

    pub async fn get(&self, id: i32) -> Result<Brand, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("brand", id))
    }

    pub async fn create(&self, draft: BrandDraft) -> Result<Brand, Error> {
        self.repo.create(&draft).await.map_err(map_repository_error)
    }

    pub async fn update(&self, id: i32, draft: BrandDraft) -> Result<Brand, Error> {
        self.repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("brand", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(map_repository_error)? {
            Ok(())
        } else {
            Err(not_found("brand", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{CatalogRepositoryError, MockBrandRepository, constraints};

    #[rstest]
    #[tokio::test]
    async fn referenced_brand_cannot_be_deleted() {
        let mut repo = MockBrandRepository::new();
        repo.expect_delete()
            .times(1)
            .returning(|_| Err(CatalogRepositoryError::still_referenced(constraints::PRODUCT_BRAND)));

        let error = BrandService::new(Arc::new(repo))
            .delete(3)
            .await
            .expect_err("brand in use");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.details().expect("details")["code"], "still_referenced");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_brand_is_not_found() {
        let mut repo = MockBrandRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let error = BrandService::new(Arc::new(repo))
            .get(3)
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
