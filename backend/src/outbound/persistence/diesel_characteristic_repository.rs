//! PostgreSQL-backed `CharacteristicRepository`.
//!
//! A template and its items are written in one transaction. Replacing the
//! items deletes the old rows; product links to them go with them through
//! `ON DELETE CASCADE`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::catalog::{
    CharacteristicItem, CharacteristicItemDraft, CharacteristicTemplate,
    CharacteristicTemplateDraft, CharacteristicTemplatePatch, DisplayText, ListWindow,
};
use crate::domain::ports::{CatalogRepositoryError, CharacteristicRepository};

use super::diesel_error_mapping::{invalid_row, map_delete_error, map_diesel_error, map_pool_error};
use super::models::{ItemRow, NewItemRow, NewTemplateRow, TemplateChangeset, TemplateRow};
use super::pool::DbPool;
use super::schema::{characteristic_items, characteristic_templates};

#[derive(Clone)]
pub struct DieselCharacteristicRepository {
    pool: DbPool,
}

impl DieselCharacteristicRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_items(
    conn: &mut AsyncPgConnection,
    template_ids: &[i32],
) -> Result<Vec<ItemRow>, DieselError> {
    characteristic_items::table
        .filter(characteristic_items::template_id.eq_any(template_ids))
        .select(ItemRow::as_select())
        .order_by(characteristic_items::id)
        .load(conn)
        .await
}

async fn insert_items(
    conn: &mut AsyncPgConnection,
    template_id: i32,
    items: &[CharacteristicItemDraft],
) -> Result<(), DieselError> {
    if items.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewItemRow<'_>> = items
        .iter()
        .map(|item| NewItemRow {
            template_id,
            name: item.name.as_str(),
            label: item.label.as_str(),
            value: item.value.as_str(),
        })
        .collect();
    diesel::insert_into(characteristic_items::table)
        .values(&rows)
        .execute(conn)
        .await?;
    Ok(())
}

fn row_to_item(row: ItemRow) -> Result<CharacteristicItem, CatalogRepositoryError> {
    Ok(CharacteristicItem {
        id: row.id,
        template_id: row.template_id,
        name: DisplayText::new(&row.name).map_err(|err| invalid_row("characteristic item", err))?,
        label: row.label,
        value: row.value,
    })
}

/// Attach items to their templates, keeping template order.
fn assemble(
    templates: Vec<TemplateRow>,
    items: Vec<ItemRow>,
) -> Result<Vec<CharacteristicTemplate>, CatalogRepositoryError> {
    let mut grouped: HashMap<i32, Vec<CharacteristicItem>> = HashMap::new();
    for item in items {
        grouped
            .entry(item.template_id)
            .or_default()
            .push(row_to_item(item)?);
    }
    templates
        .into_iter()
        .map(|row| {
            Ok(CharacteristicTemplate {
                id: row.id,
                name: DisplayText::new(&row.name)
                    .map_err(|err| invalid_row("characteristic template", err))?,
                description: row.description,
                items: grouped.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}

fn single(
    template: Option<(TemplateRow, Vec<ItemRow>)>,
) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
    let Some((row, items)) = template else {
        return Ok(None);
    };
    Ok(assemble(vec![row], items)?.pop())
}

impl DieselCharacteristicRepository {
    async fn find_where(
        &self,
        id: Option<i32>,
        name: Option<&str>,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = characteristic_templates::table
            .select(TemplateRow::as_select())
            .into_boxed();
        if let Some(id) = id {
            query = query.filter(characteristic_templates::id.eq(id));
        }
        if let Some(name) = name {
            query = query.filter(characteristic_templates::name.eq(name));
        }
        let Some(row) = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };
        let items = load_items(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;
        single(Some((row, items)))
    }
}

#[async_trait]
impl CharacteristicRepository for DieselCharacteristicRepository {
    async fn list(
        &self,
        window: ListWindow,
    ) -> Result<Vec<CharacteristicTemplate>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let templates: Vec<TemplateRow> = characteristic_templates::table
            .select(TemplateRow::as_select())
            .order_by(characteristic_templates::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let ids: Vec<i32> = templates.iter().map(|row| row.id).collect();
        let items = load_items(&mut conn, &ids)
            .await
            .map_err(map_diesel_error)?;
        assemble(templates, items)
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
        self.find_where(Some(id), None).await
    }

    async fn find_by_name(
        &self,
        name: &DisplayText,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
        self.find_where(None, Some(name.as_str())).await
    }

    async fn create(
        &self,
        template: &CharacteristicTemplateDraft,
    ) -> Result<CharacteristicTemplate, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTemplateRow {
            name: template.name.as_str(),
            description: template.description.as_deref(),
        };
        let items = template.items.as_slice();
        let (stored, item_rows) = conn
            .transaction(|conn| {
                async move {
                    let stored: TemplateRow = diesel::insert_into(characteristic_templates::table)
                        .values(&row)
                        .returning(TemplateRow::as_returning())
                        .get_result(conn)
                        .await?;
                    insert_items(conn, stored.id, items).await?;
                    let item_rows = load_items(conn, &[stored.id]).await?;
                    Ok::<_, DieselError>((stored, item_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        assemble(vec![stored], item_rows)?
            .pop()
            .ok_or_else(|| CatalogRepositoryError::query("inserted template was not returned"))
    }

    async fn update(
        &self,
        id: i32,
        patch: &CharacteristicTemplatePatch,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = TemplateChangeset {
            name: patch.name.as_ref().map(DisplayText::as_str),
            description: patch.description.as_deref(),
        };
        let items = patch.items.as_deref();
        let updated = conn
            .transaction(|conn| {
                async move {
                    let row: Option<TemplateRow> = if changes.is_empty() {
                        characteristic_templates::table
                            .find(id)
                            .select(TemplateRow::as_select())
                            .first(conn)
                            .await
                            .optional()?
                    } else {
                        diesel::update(characteristic_templates::table.find(id))
                            .set(&changes)
                            .returning(TemplateRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?
                    };
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    if let Some(items) = items {
                        diesel::delete(
                            characteristic_items::table
                                .filter(characteristic_items::template_id.eq(id)),
                        )
                        .execute(conn)
                        .await?;
                        insert_items(conn, id, items).await?;
                    }
                    let item_rows = load_items(conn, &[id]).await?;
                    Ok::<_, DieselError>(Some((row, item_rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        single(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(characteristic_templates::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
