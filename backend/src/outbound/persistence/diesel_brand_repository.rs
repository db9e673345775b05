//! PostgreSQL-backed `BrandRepository` and `FilterRepository`.
//!
//! Brands and filters carry no generated identifiers, so updates replace
//! every column.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::catalog::{Brand, BrandDraft, DisplayText, Filter, FilterDraft, ImageUrl, ListWindow};
use crate::domain::ports::{BrandRepository, CatalogRepositoryError, FilterRepository};

use super::diesel_error_mapping::{invalid_row, map_delete_error, map_diesel_error, map_pool_error};
use super::models::{BrandRow, BrandValues, FilterRow, FilterValues};
use super::pool::DbPool;
use super::schema::{brands, filters};

#[derive(Clone)]
pub struct DieselBrandRepository {
    pool: DbPool,
}

impl DieselBrandRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_brand(row: BrandRow) -> Result<Brand, CatalogRepositoryError> {
    Ok(Brand {
        id: row.id,
        name: DisplayText::new(&row.name).map_err(|err| invalid_row("brand", err))?,
        image: ImageUrl::parse(&row.image).map_err(|err| invalid_row("brand", err))?,
    })
}

fn brand_values(brand: &BrandDraft) -> BrandValues<'_> {
    BrandValues {
        name: brand.name.as_str(),
        image: brand.image.as_str(),
    }
}

#[async_trait]
impl BrandRepository for DieselBrandRepository {
    async fn list(&self, window: ListWindow) -> Result<Vec<Brand>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BrandRow> = brands::table
            .select(BrandRow::as_select())
            .order_by(brands::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_brand).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Brand>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        brands::table
            .find(id)
            .select(BrandRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_brand)
            .transpose()
    }

    async fn create(&self, brand: &BrandDraft) -> Result<Brand, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: BrandRow = diesel::insert_into(brands::table)
            .values(&brand_values(brand))
            .returning(BrandRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_brand(stored)
    }

    async fn update(
        &self,
        id: i32,
        brand: &BrandDraft,
    ) -> Result<Option<Brand>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(brands::table.find(id))
            .set(&brand_values(brand))
            .returning(BrandRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_brand)
            .transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(brands::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}

#[derive(Clone)]
pub struct DieselFilterRepository {
    pool: DbPool,
}

impl DieselFilterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_filter(row: FilterRow) -> Result<Filter, CatalogRepositoryError> {
    Ok(Filter {
        id: row.id,
        category_id: row.category_id,
        text: DisplayText::new(&row.text).map_err(|err| invalid_row("filter", err))?,
        image: row
            .image
            .as_deref()
            .map(ImageUrl::parse)
            .transpose()
            .map_err(|err| invalid_row("filter", err))?,
        status: row.status,
    })
}

fn filter_values(filter: &FilterDraft) -> FilterValues<'_> {
    FilterValues {
        category_id: filter.category_id,
        text: filter.text.as_str(),
        image: filter.image.as_ref().map(ImageUrl::as_str),
        status: filter.status,
    }
}

#[async_trait]
impl FilterRepository for DieselFilterRepository {
    async fn list(&self, window: ListWindow) -> Result<Vec<Filter>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FilterRow> = filters::table
            .select(FilterRow::as_select())
            .order_by(filters::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_filter).collect()
    }

    async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<Filter>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FilterRow> = filters::table
            .filter(filters::category_id.eq(category_id))
            .select(FilterRow::as_select())
            .order_by(filters::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_filter).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Filter>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        filters::table
            .find(id)
            .select(FilterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_filter)
            .transpose()
    }

    async fn create(&self, filter: &FilterDraft) -> Result<Filter, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: FilterRow = diesel::insert_into(filters::table)
            .values(&filter_values(filter))
            .returning(FilterRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_filter(stored)
    }

    async fn update(
        &self,
        id: i32,
        filter: &FilterDraft,
    ) -> Result<Option<Filter>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(filters::table.find(id))
            .set(&filter_values(filter))
            .returning(FilterRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_filter)
            .transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(filters::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
