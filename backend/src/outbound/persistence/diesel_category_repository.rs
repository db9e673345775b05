//! PostgreSQL-backed `CategoryRepository` and `SubcategoryRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::catalog::{
    Category, CategoryPatch, DisplayText, ImageUrl, ListWindow, NewCategory, NewSubcategory,
    Subcategory, SubcategoryPatch,
};
use crate::domain::identifiers::Slug;
use crate::domain::ports::{CatalogRepositoryError, CategoryRepository, SubcategoryRepository};

use super::diesel_error_mapping::{invalid_row, map_delete_error, map_diesel_error, map_pool_error};
use super::models::{
    CategoryChangeset, CategoryRow, NewCategoryRow, NewSubcategoryRow, SubcategoryChangeset,
    SubcategoryRow,
};
use super::pool::DbPool;
use super::schema::{categories, subcategories};

/// Diesel-backed category storage.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_category(row: CategoryRow) -> Result<Category, CatalogRepositoryError> {
    Ok(Category {
        id: row.id,
        text: DisplayText::new(&row.text).map_err(|err| invalid_row("category", err))?,
        slug: Slug::parse(&row.slug).map_err(|err| invalid_row("category", err))?,
        icon: row
            .icon
            .as_deref()
            .map(ImageUrl::parse)
            .transpose()
            .map_err(|err| invalid_row("category", err))?,
    })
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self, window: ListWindow) -> Result<Vec<Category>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order_by(categories::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_category).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_category)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_category)
            .transpose()
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCategoryRow {
            text: category.text.as_str(),
            slug: category.slug.as_str(),
            icon: category.icon.as_ref().map(ImageUrl::as_str),
        };
        let stored: CategoryRow = diesel::insert_into(categories::table)
            .values(&row)
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_category(stored)
    }

    async fn update(
        &self,
        id: i32,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CatalogRepositoryError> {
        let changes = CategoryChangeset {
            text: patch.text.as_ref().map(DisplayText::as_str),
            slug: patch.slug.as_ref().map(Slug::as_str),
            icon: patch.icon.as_ref().map(ImageUrl::as_str),
        };
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(categories::table.find(id))
            .set(&changes)
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_category)
            .transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(categories::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}

/// Diesel-backed subcategory storage.
#[derive(Clone)]
pub struct DieselSubcategoryRepository {
    pool: DbPool,
}

impl DieselSubcategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_subcategory(row: SubcategoryRow) -> Result<Subcategory, CatalogRepositoryError> {
    Ok(Subcategory {
        id: row.id,
        text: DisplayText::new(&row.text).map_err(|err| invalid_row("subcategory", err))?,
        slug: Slug::parse(&row.slug).map_err(|err| invalid_row("subcategory", err))?,
        image: ImageUrl::parse(&row.image).map_err(|err| invalid_row("subcategory", err))?,
        category_id: row.category_id,
        brand_id: row.brand_id,
    })
}

#[async_trait]
impl SubcategoryRepository for DieselSubcategoryRepository {
    async fn list(&self, window: ListWindow) -> Result<Vec<Subcategory>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SubcategoryRow> = subcategories::table
            .select(SubcategoryRow::as_select())
            .order_by(subcategories::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_subcategory).collect()
    }

    async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<Subcategory>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SubcategoryRow> = subcategories::table
            .filter(subcategories::category_id.eq(category_id))
            .select(SubcategoryRow::as_select())
            .order_by(subcategories::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_subcategory).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Subcategory>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        subcategories::table
            .find(id)
            .select(SubcategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_subcategory)
            .transpose()
    }

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Subcategory>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        subcategories::table
            .filter(subcategories::slug.eq(slug.as_str()))
            .select(SubcategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_subcategory)
            .transpose()
    }

    async fn create(
        &self,
        subcategory: &NewSubcategory,
    ) -> Result<Subcategory, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSubcategoryRow {
            text: subcategory.text.as_str(),
            slug: subcategory.slug.as_str(),
            image: subcategory.image.as_str(),
            category_id: subcategory.category_id,
            brand_id: subcategory.brand_id,
        };
        let stored: SubcategoryRow = diesel::insert_into(subcategories::table)
            .values(&row)
            .returning(SubcategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_subcategory(stored)
    }

    async fn update(
        &self,
        id: i32,
        patch: &SubcategoryPatch,
    ) -> Result<Option<Subcategory>, CatalogRepositoryError> {
        let changes = SubcategoryChangeset {
            text: patch.text.as_ref().map(DisplayText::as_str),
            slug: patch.slug.as_ref().map(Slug::as_str),
            image: patch.image.as_ref().map(ImageUrl::as_str),
            category_id: patch.category_id,
            brand_id: patch.brand_id,
        };
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(subcategories::table.find(id))
            .set(&changes)
            .returning(SubcategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_subcategory)
            .transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(subcategories::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
