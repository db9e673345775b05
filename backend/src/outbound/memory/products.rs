//! Products, tags and characteristic templates.

use async_trait::async_trait;

use crate::domain::catalog::{
    CharacteristicItem, CharacteristicItemDraft, CharacteristicTemplate,
    CharacteristicTemplateDraft, CharacteristicTemplatePatch, DisplayText, ListWindow, NewProduct,
    NewTag, Product, ProductChanges, ProductsByBrand, Tag, TagPatch,
};
use crate::domain::identifiers::{Article, Slug, TagValue};
use crate::domain::ports::{
    CatalogRepositoryError, CharacteristicRepository, ProductRepository, TagRepository,
    constraints,
};

use super::{
    CatalogState, InMemoryCatalog, ensure_exists, ensure_unique, next, to_usize, window_of,
};

impl CatalogState {
    fn check_product_references(
        &self,
        subcategory_id: Option<i32>,
        brand_id: Option<i32>,
        tag_ids: Option<&[i32]>,
        characteristic_ids: Option<&[i32]>,
    ) -> Result<(), CatalogRepositoryError> {
        if let Some(subcategory_id) = subcategory_id {
            ensure_exists(
                &self.subcategories,
                subcategory_id,
                constraints::PRODUCT_SUBCATEGORY,
            )?;
        }
        if let Some(brand_id) = brand_id {
            ensure_exists(&self.brands, brand_id, constraints::PRODUCT_BRAND)?;
        }
        for tag_id in tag_ids.unwrap_or_default() {
            ensure_exists(&self.tags, *tag_id, constraints::PRODUCT_TAG)?;
        }
        for item_id in characteristic_ids.unwrap_or_default() {
            if !self.characteristic_item_exists(*item_id) {
                return Err(CatalogRepositoryError::missing_reference(
                    constraints::PRODUCT_CHARACTERISTIC_ITEM,
                ));
            }
        }
        Ok(())
    }

    fn products_where(&self, predicate: impl Fn(&NewProduct) -> bool) -> Vec<(i32, &NewProduct)> {
        self.products
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(id, row)| (*id, row))
            .collect()
    }

    fn build_items(
        &mut self,
        template_id: i32,
        drafts: &[CharacteristicItemDraft],
    ) -> Vec<CharacteristicItem> {
        drafts
            .iter()
            .map(|draft| CharacteristicItem {
                id: next(&mut self.sequences.items),
                template_id,
                name: draft.name.clone(),
                label: draft.label.clone(),
                value: draft.value.clone(),
            })
            .collect()
    }

    fn unlink_items(&mut self, item_ids: &[i32]) {
        for row in self.products.values_mut() {
            row.characteristic_ids.retain(|id| !item_ids.contains(id));
        }
    }
}

fn as_vec(rows: Vec<(i32, &NewProduct)>, state: &CatalogState) -> Vec<Product> {
    rows.into_iter()
        .map(|(id, row)| state.hydrate(id, row))
        .collect()
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn list(&self, window: ListWindow) -> Result<Vec<Product>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state
            .products
            .iter()
            .skip(to_usize(window.offset()))
            .take(to_usize(window.limit()))
            .map(|(id, row)| state.hydrate(*id, row))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state.products.get(&id).map(|row| state.hydrate(id, row)))
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Product>, CatalogRepositoryError> {
        let state = self.state()?;
        let found = state.products_where(|row| &row.slug == slug);
        Ok(as_vec(found, &state).into_iter().next())
    }

    async fn find_by_article(
        &self,
        article: Article,
    ) -> Result<Option<Product>, CatalogRepositoryError> {
        let state = self.state()?;
        let found = state.products_where(|row| row.article == article);
        Ok(as_vec(found, &state).into_iter().next())
    }

    async fn list_by_brand(
        &self,
        brand_id: i32,
        window: ListWindow,
    ) -> Result<ProductsByBrand, CatalogRepositoryError> {
        let state = self.state()?;
        let matching = state.products_where(|row| row.brand_id == Some(brand_id));
        let total = i64::try_from(matching.len()).unwrap_or(i64::MAX);
        let page = matching
            .into_iter()
            .skip(to_usize(window.offset()))
            .take(to_usize(window.limit()))
            .collect();
        Ok(ProductsByBrand {
            products: as_vec(page, &state),
            total,
        })
    }

    async fn list_by_tag(
        &self,
        tag_id: i32,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), CatalogRepositoryError> {
        let state = self.state()?;
        let matching = state.products_where(|row| row.tag_ids.contains(&tag_id));
        let total = i64::try_from(matching.len()).unwrap_or(i64::MAX);
        let page = matching.into_iter().take(to_usize(limit)).collect();
        Ok((as_vec(page, &state), total))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, CatalogRepositoryError> {
        let mut state = self.state()?;
        ensure_unique(&state.products, None, constraints::PRODUCT_SLUG, |row| {
            row.slug == product.slug
        })?;
        ensure_unique(&state.products, None, constraints::PRODUCT_ARTICLE, |row| {
            row.article == product.article
        })?;
        state.check_product_references(
            Some(product.subcategory_id),
            product.brand_id,
            Some(product.tag_ids.as_slice()),
            Some(product.characteristic_ids.as_slice()),
        )?;
        let id = next(&mut state.sequences.products);
        state.products.insert(id, product.clone());
        Ok(state.hydrate(id, product))
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, CatalogRepositoryError> {
        let mut state = self.state()?;
        if let Some(slug) = changes.slug.as_ref() {
            ensure_unique(&state.products, Some(id), constraints::PRODUCT_SLUG, |row| {
                &row.slug == slug
            })?;
        }
        if let Some(article) = changes.article {
            ensure_unique(&state.products, Some(id), constraints::PRODUCT_ARTICLE, |row| {
                row.article == article
            })?;
        }
        state.check_product_references(
            changes.subcategory_id,
            changes.brand_id,
            changes.tag_ids.as_deref(),
            changes.characteristic_ids.as_deref(),
        )?;
        let Some(row) = state.products.get_mut(&id) else {
            return Ok(None);
        };
        apply_changes(row, changes);
        let row = row.clone();
        Ok(Some(state.hydrate(id, &row)))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        Ok(self.state()?.products.remove(&id).is_some())
    }
}

fn apply_changes(row: &mut NewProduct, changes: &ProductChanges) {
    if let Some(text) = changes.text.as_ref() {
        row.text = text.clone();
    }
    if let Some(slug) = changes.slug.as_ref() {
        row.slug = slug.clone();
    }
    if let Some(article) = changes.article {
        row.article = article;
    }
    if let Some(price) = changes.price {
        row.price = price;
    }
    if let Some(discount) = changes.discount {
        row.discount = discount;
    }
    if let Some(in_stock) = changes.in_stock {
        row.in_stock = in_stock;
    }
    if let Some(small) = changes.small_description.as_ref() {
        row.small_description = Some(small.clone());
    }
    if let Some(full) = changes.full_description.as_ref() {
        row.full_description = Some(full.clone());
    }
    if let Some(subcategory_id) = changes.subcategory_id {
        row.subcategory_id = subcategory_id;
    }
    if let Some(brand_id) = changes.brand_id {
        row.brand_id = Some(brand_id);
    }
    if let Some(images) = changes.images.as_ref() {
        row.images = images.clone();
    }
    if let Some(tag_ids) = changes.tag_ids.as_ref() {
        row.tag_ids = tag_ids.clone();
    }
    if let Some(characteristic_ids) = changes.characteristic_ids.as_ref() {
        row.characteristic_ids = characteristic_ids.clone();
    }
}

#[async_trait]
impl TagRepository for InMemoryCatalog {
    async fn list(&self, window: ListWindow) -> Result<Vec<Tag>, CatalogRepositoryError> {
        Ok(window_of(&self.state()?.tags, window))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, CatalogRepositoryError> {
        Ok(self.state()?.tags.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &DisplayText) -> Result<Option<Tag>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state.tags.values().find(|row| &row.name == name).cloned())
    }

    async fn find_by_value(&self, value: &TagValue) -> Result<Option<Tag>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state.tags.values().find(|row| &row.value == value).cloned())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, CatalogRepositoryError> {
        let mut state = self.state()?;
        ensure_unique(&state.tags, None, constraints::TAG_NAME, |row| row.name == tag.name)?;
        ensure_unique(&state.tags, None, constraints::TAG_VALUE, |row| row.value == tag.value)?;
        let id = next(&mut state.sequences.tags);
        let row = Tag {
            id,
            name: tag.name.clone(),
            value: tag.value.clone(),
        };
        state.tags.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, patch: &TagPatch) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut state = self.state()?;
        if let Some(name) = patch.name.as_ref() {
            ensure_unique(&state.tags, Some(id), constraints::TAG_NAME, |row| &row.name == name)?;
        }
        if let Some(value) = patch.value.as_ref() {
            ensure_unique(&state.tags, Some(id), constraints::TAG_VALUE, |row| {
                &row.value == value
            })?;
        }
        Ok(state.tags.get_mut(&id).map(|row| {
            if let Some(name) = patch.name.as_ref() {
                row.name = name.clone();
            }
            if let Some(value) = patch.value.as_ref() {
                row.value = value.clone();
            }
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut state = self.state()?;
        if state.tags.remove(&id).is_none() {
            return Ok(false);
        }
        for row in state.products.values_mut() {
            row.tag_ids.retain(|tag_id| *tag_id != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl CharacteristicRepository for InMemoryCatalog {
    async fn list(
        &self,
        window: ListWindow,
    ) -> Result<Vec<CharacteristicTemplate>, CatalogRepositoryError> {
        Ok(window_of(&self.state()?.templates, window))
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
        Ok(self.state()?.templates.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &DisplayText,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state.templates.values().find(|row| &row.name == name).cloned())
    }

    async fn create(
        &self,
        template: &CharacteristicTemplateDraft,
    ) -> Result<CharacteristicTemplate, CatalogRepositoryError> {
        let mut state = self.state()?;
        ensure_unique(&state.templates, None, constraints::TEMPLATE_NAME, |row| {
            row.name == template.name
        })?;
        let id = next(&mut state.sequences.templates);
        let items = state.build_items(id, &template.items);
        let row = CharacteristicTemplate {
            id,
            name: template.name.clone(),
            description: template.description.clone(),
            items,
        };
        state.templates.insert(id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        patch: &CharacteristicTemplatePatch,
    ) -> Result<Option<CharacteristicTemplate>, CatalogRepositoryError> {
        let mut state = self.state()?;
        if let Some(name) = patch.name.as_ref() {
            ensure_unique(&state.templates, Some(id), constraints::TEMPLATE_NAME, |row| {
                &row.name == name
            })?;
        }
        let Some(mut row) = state.templates.get(&id).cloned() else {
            return Ok(None);
        };
        if let Some(name) = patch.name.as_ref() {
            row.name = name.clone();
        }
        if let Some(description) = patch.description.as_ref() {
            row.description = Some(description.clone());
        }
        if let Some(drafts) = patch.items.as_ref() {
            let replaced: Vec<i32> = row.items.iter().map(|item| item.id).collect();
            state.unlink_items(&replaced);
            row.items = state.build_items(id, drafts);
        }
        state.templates.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut state = self.state()?;
        let Some(template) = state.templates.remove(&id) else {
            return Ok(false);
        };
        let removed: Vec<i32> = template.items.iter().map(|item| item.id).collect();
        state.unlink_items(&removed);
        Ok(true)
    }
}
