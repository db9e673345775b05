//! In-memory catalogue storage.
//!
//! Used when no database is configured and by HTTP tests. The store enforces
//! the same unique constraints, foreign keys and delete rules as the
//! PostgreSQL schema and reports violations under the same constraint names.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::catalog::{
    Brand, Category, CharacteristicTemplate, Filter, ListWindow, NewProduct, Product, Subcategory,
    Tag,
};
use crate::domain::identifiers::{Article, Slug, TagValue};
use crate::domain::ports::{CatalogRepositoryError, IdentifierRegistry, SlugScope};

mod products;
mod taxonomy;

#[cfg(test)]
mod tests;

/// Catalogue held in process memory behind a mutex.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, CatalogState>, CatalogRepositoryError> {
        self.state
            .lock()
            .map_err(|_| CatalogRepositoryError::query("in-memory catalogue lock poisoned"))
    }
}

#[derive(Default)]
struct Sequences {
    categories: i32,
    subcategories: i32,
    brands: i32,
    filters: i32,
    tags: i32,
    templates: i32,
    items: i32,
    products: i32,
}

fn next(sequence: &mut i32) -> i32 {
    *sequence += 1;
    *sequence
}

#[derive(Default)]
struct CatalogState {
    sequences: Sequences,
    categories: BTreeMap<i32, Category>,
    subcategories: BTreeMap<i32, Subcategory>,
    brands: BTreeMap<i32, Brand>,
    filters: BTreeMap<i32, Filter>,
    tags: BTreeMap<i32, Tag>,
    templates: BTreeMap<i32, CharacteristicTemplate>,
    products: BTreeMap<i32, NewProduct>,
}

impl CatalogState {
    fn characteristic_item_exists(&self, item_id: i32) -> bool {
        self.templates
            .values()
            .flat_map(|template| template.items.iter())
            .any(|item| item.id == item_id)
    }

    fn hydrate(&self, id: i32, row: &NewProduct) -> Product {
        Product {
            id,
            text: row.text.clone(),
            slug: row.slug.clone(),
            article: row.article,
            price: row.price,
            discount: row.discount,
            in_stock: row.in_stock,
            small_description: row.small_description.clone(),
            full_description: row.full_description.clone(),
            subcategory_id: row.subcategory_id,
            brand_id: row.brand_id,
            images: row.images.clone(),
            tags: row
                .tag_ids
                .iter()
                .filter_map(|tag_id| self.tags.get(tag_id).cloned())
                .collect(),
            characteristic_ids: row.characteristic_ids.clone(),
        }
    }

    fn slug_holder(&self, scope: SlugScope, slug: &Slug) -> Option<i32> {
        match scope {
            SlugScope::Category => holder(&self.categories, |row| &row.slug == slug),
            SlugScope::Subcategory => holder(&self.subcategories, |row| &row.slug == slug),
            SlugScope::Product => holder(&self.products, |row| &row.slug == slug),
        }
    }
}

/// Id of the first row matching `predicate`.
fn holder<T>(rows: &BTreeMap<i32, T>, predicate: impl Fn(&T) -> bool) -> Option<i32> {
    rows.iter()
        .find_map(|(id, row)| predicate(row).then_some(*id))
}

/// Fail with a unique violation when a row other than `exclude_id` matches.
fn ensure_unique<T>(
    rows: &BTreeMap<i32, T>,
    exclude_id: Option<i32>,
    constraint: &str,
    predicate: impl Fn(&T) -> bool,
) -> Result<(), CatalogRepositoryError> {
    match holder(rows, predicate) {
        Some(id) if Some(id) != exclude_id => {
            Err(CatalogRepositoryError::unique_violation(constraint))
        }
        _ => Ok(()),
    }
}

fn ensure_exists<T>(
    rows: &BTreeMap<i32, T>,
    id: i32,
    constraint: &str,
) -> Result<(), CatalogRepositoryError> {
    if rows.contains_key(&id) {
        Ok(())
    } else {
        Err(CatalogRepositoryError::missing_reference(constraint))
    }
}

fn window_of<T: Clone>(rows: &BTreeMap<i32, T>, window: ListWindow) -> Vec<T> {
    rows.values()
        .skip(to_usize(window.offset()))
        .take(to_usize(window.limit()))
        .cloned()
        .collect()
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn taken(holder: Option<i32>, exclude_id: Option<i32>) -> bool {
    matches!(holder, Some(id) if Some(id) != exclude_id)
}

#[async_trait]
impl IdentifierRegistry for InMemoryCatalog {
    async fn slug_taken(
        &self,
        scope: SlugScope,
        slug: &Slug,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(taken(state.slug_holder(scope, slug), exclude_id))
    }

    async fn article_taken(
        &self,
        article: Article,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError> {
        let state = self.state()?;
        let holder = holder(&state.products, |row| row.article == article);
        Ok(taken(holder, exclude_id))
    }

    async fn tag_value_taken(
        &self,
        value: &TagValue,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError> {
        let state = self.state()?;
        let holder = holder(&state.tags, |row| &row.value == value);
        Ok(taken(holder, exclude_id))
    }
}
