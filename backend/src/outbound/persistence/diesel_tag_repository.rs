//! PostgreSQL-backed `TagRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::catalog::{DisplayText, ListWindow, NewTag, Tag, TagPatch};
use crate::domain::identifiers::TagValue;
use crate::domain::ports::{CatalogRepositoryError, TagRepository};

use super::diesel_error_mapping::{invalid_row, map_delete_error, map_diesel_error, map_pool_error};
use super::models::{NewTagRow, TagChangeset, TagRow};
use super::pool::DbPool;
use super::schema::tags;

/// Diesel-backed tag storage.
///
/// Deleting a tag drops its product links through `ON DELETE CASCADE`.
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_tag(row: TagRow) -> Result<Tag, CatalogRepositoryError> {
    Ok(Tag {
        id: row.id,
        name: DisplayText::new(&row.name).map_err(|err| invalid_row("tag", err))?,
        value: TagValue::parse(&row.value).map_err(|err| invalid_row("tag", err))?,
    })
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn list(&self, window: ListWindow) -> Result<Vec<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .select(TagRow::as_select())
            .order_by(tags::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_tag).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        tags::table
            .find(id)
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_tag)
            .transpose()
    }

    async fn find_by_name(&self, name: &DisplayText) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        tags::table
            .filter(tags::name.eq(name.as_str()))
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_tag)
            .transpose()
    }

    async fn find_by_value(&self, value: &TagValue) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        tags::table
            .filter(tags::value.eq(value.as_str()))
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_tag)
            .transpose()
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTagRow {
            name: tag.name.as_str(),
            value: tag.value.as_str(),
        };
        let stored: TagRow = diesel::insert_into(tags::table)
            .values(&row)
            .returning(TagRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_tag(stored)
    }

    async fn update(&self, id: i32, patch: &TagPatch) -> Result<Option<Tag>, CatalogRepositoryError> {
        let changes = TagChangeset {
            name: patch.name.as_ref().map(DisplayText::as_str),
            value: patch.value.as_ref().map(TagValue::as_str),
        };
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(tags::table.find(id))
            .set(&changes)
            .returning(TagRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_tag)
            .transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(tags::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
