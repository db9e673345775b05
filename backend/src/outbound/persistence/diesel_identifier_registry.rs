//! PostgreSQL-backed `IdentifierRegistry`.
//!
//! Each check is an indexed point lookup against the column's unique index.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identifiers::{Article, Slug, TagValue};
use crate::domain::ports::{CatalogRepositoryError, IdentifierRegistry, SlugScope};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{categories, products, subcategories, tags};

#[derive(Clone)]
pub struct DieselIdentifierRegistry {
    pool: DbPool,
}

impl DieselIdentifierRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Build `SELECT id FROM <table> WHERE <column> = value [AND id <> exclude]`
/// and report whether a row matched.
macro_rules! holder_exists {
    ($conn:expr, $table:ident, $column:ident, $value:expr, $exclude:expr) => {{
        let mut query = $table::table
            .filter($table::$column.eq($value))
            .select($table::id)
            .into_boxed();
        if let Some(exclude) = $exclude {
            query = query.filter($table::id.ne(exclude));
        }
        query
            .first::<i32>($conn)
            .await
            .optional()
            .map(|holder| holder.is_some())
            .map_err(map_diesel_error)
    }};
}

#[async_trait]
impl IdentifierRegistry for DieselIdentifierRegistry {
    async fn slug_taken(
        &self,
        scope: SlugScope,
        slug: &Slug,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let value = slug.as_str();
        match scope {
            SlugScope::Category => holder_exists!(&mut conn, categories, slug, value, exclude_id),
            SlugScope::Subcategory => {
                holder_exists!(&mut conn, subcategories, slug, value, exclude_id)
            }
            SlugScope::Product => holder_exists!(&mut conn, products, slug, value, exclude_id),
        }
    }

    async fn article_taken(
        &self,
        article: Article,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        holder_exists!(&mut conn, products, article, article.get(), exclude_id)
    }

    async fn tag_value_taken(
        &self,
        value: &TagValue,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        holder_exists!(&mut conn, tags, value, value.as_str(), exclude_id)
    }
}
