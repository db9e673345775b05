//! Categories, subcategories, brands and filters.

use async_trait::async_trait;

use crate::domain::catalog::{
    Brand, BrandDraft, Category, CategoryPatch, Filter, FilterDraft, ListWindow, NewCategory,
    NewSubcategory, Subcategory, SubcategoryPatch,
};
use crate::domain::identifiers::Slug;
use crate::domain::ports::{
    BrandRepository, CatalogRepositoryError, CategoryRepository, FilterRepository,
    SubcategoryRepository, constraints,
};

use super::{InMemoryCatalog, ensure_exists, ensure_unique, next, window_of};

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn list(&self, window: ListWindow) -> Result<Vec<Category>, CatalogRepositoryError> {
        Ok(window_of(&self.state()?.categories, window))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, CatalogRepositoryError> {
        Ok(self.state()?.categories.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state.categories.values().find(|row| &row.slug == slug).cloned())
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, CatalogRepositoryError> {
        let mut state = self.state()?;
        ensure_unique(&state.categories, None, constraints::CATEGORY_SLUG, |row| {
            row.slug == category.slug
        })?;
        let id = next(&mut state.sequences.categories);
        let row = Category {
            id,
            text: category.text.clone(),
            slug: category.slug.clone(),
            icon: category.icon.clone(),
        };
        state.categories.insert(id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CatalogRepositoryError> {
        let mut state = self.state()?;
        if let Some(slug) = patch.slug.as_ref() {
            ensure_unique(&state.categories, Some(id), constraints::CATEGORY_SLUG, |row| {
                &row.slug == slug
            })?;
        }
        let Some(row) = state.categories.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(text) = patch.text.as_ref() {
            row.text = text.clone();
        }
        if let Some(slug) = patch.slug.as_ref() {
            row.slug = slug.clone();
        }
        if let Some(icon) = patch.icon.as_ref() {
            row.icon = Some(icon.clone());
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut state = self.state()?;
        if state.subcategories.values().any(|row| row.category_id == id) {
            return Err(CatalogRepositoryError::still_referenced(
                constraints::SUBCATEGORY_CATEGORY,
            ));
        }
        if state.filters.values().any(|row| row.category_id == id) {
            return Err(CatalogRepositoryError::still_referenced(
                constraints::FILTER_CATEGORY,
            ));
        }
        Ok(state.categories.remove(&id).is_some())
    }
}

#[async_trait]
impl SubcategoryRepository for InMemoryCatalog {
    async fn list(&self, window: ListWindow) -> Result<Vec<Subcategory>, CatalogRepositoryError> {
        Ok(window_of(&self.state()?.subcategories, window))
    }

    async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<Subcategory>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state
            .subcategories
            .values()
            .filter(|row| row.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Subcategory>, CatalogRepositoryError> {
        Ok(self.state()?.subcategories.get(&id).cloned())
    }

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Subcategory>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state
            .subcategories
            .values()
            .find(|row| &row.slug == slug)
            .cloned())
    }

    async fn create(
        &self,
        subcategory: &NewSubcategory,
    ) -> Result<Subcategory, CatalogRepositoryError> {
        let mut state = self.state()?;
        ensure_unique(&state.subcategories, None, constraints::SUBCATEGORY_SLUG, |row| {
            row.slug == subcategory.slug
        })?;
        ensure_exists(
            &state.categories,
            subcategory.category_id,
            constraints::SUBCATEGORY_CATEGORY,
        )?;
        if let Some(brand_id) = subcategory.brand_id {
            ensure_exists(&state.brands, brand_id, constraints::SUBCATEGORY_BRAND)?;
        }
        let id = next(&mut state.sequences.subcategories);
        let row = Subcategory {
            id,
            text: subcategory.text.clone(),
            slug: subcategory.slug.clone(),
            image: subcategory.image.clone(),
            category_id: subcategory.category_id,
            brand_id: subcategory.brand_id,
        };
        state.subcategories.insert(id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        patch: &SubcategoryPatch,
    ) -> Result<Option<Subcategory>, CatalogRepositoryError> {
        let mut state = self.state()?;
        if let Some(slug) = patch.slug.as_ref() {
            ensure_unique(&state.subcategories, Some(id), constraints::SUBCATEGORY_SLUG, |row| {
                &row.slug == slug
            })?;
        }
        if let Some(category_id) = patch.category_id {
            ensure_exists(&state.categories, category_id, constraints::SUBCATEGORY_CATEGORY)?;
        }
        if let Some(brand_id) = patch.brand_id {
            ensure_exists(&state.brands, brand_id, constraints::SUBCATEGORY_BRAND)?;
        }
        let Some(row) = state.subcategories.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(text) = patch.text.as_ref() {
            row.text = text.clone();
        }
        if let Some(slug) = patch.slug.as_ref() {
            row.slug = slug.clone();
        }
        if let Some(image) = patch.image.as_ref() {
            row.image = image.clone();
        }
        if let Some(category_id) = patch.category_id {
            row.category_id = category_id;
        }
        if let Some(brand_id) = patch.brand_id {
            row.brand_id = Some(brand_id);
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut state = self.state()?;
        if state.products.values().any(|row| row.subcategory_id == id) {
            return Err(CatalogRepositoryError::still_referenced(
                constraints::PRODUCT_SUBCATEGORY,
            ));
        }
        Ok(state.subcategories.remove(&id).is_some())
    }
}

#[async_trait]
impl BrandRepository for InMemoryCatalog {
    async fn list(&self, window: ListWindow) -> Result<Vec<Brand>, CatalogRepositoryError> {
        Ok(window_of(&self.state()?.brands, window))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Brand>, CatalogRepositoryError> {
        Ok(self.state()?.brands.get(&id).cloned())
    }

    async fn create(&self, brand: &BrandDraft) -> Result<Brand, CatalogRepositoryError> {
        let mut state = self.state()?;
        let id = next(&mut state.sequences.brands);
        let row = Brand {
            id,
            name: brand.name.clone(),
            image: brand.image.clone(),
        };
        state.brands.insert(id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        brand: &BrandDraft,
    ) -> Result<Option<Brand>, CatalogRepositoryError> {
        let mut state = self.state()?;
        Ok(state.brands.get_mut(&id).map(|row| {
            row.name = brand.name.clone();
            row.image = brand.image.clone();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut state = self.state()?;
        if state.subcategories.values().any(|row| row.brand_id == Some(id)) {
            return Err(CatalogRepositoryError::still_referenced(
                constraints::SUBCATEGORY_BRAND,
            ));
        }
        if state.products.values().any(|row| row.brand_id == Some(id)) {
            return Err(CatalogRepositoryError::still_referenced(
                constraints::PRODUCT_BRAND,
            ));
        }
        Ok(state.brands.remove(&id).is_some())
    }
}

#[async_trait]
impl FilterRepository for InMemoryCatalog {
    async fn list(&self, window: ListWindow) -> Result<Vec<Filter>, CatalogRepositoryError> {
        Ok(window_of(&self.state()?.filters, window))
    }

    async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<Filter>, CatalogRepositoryError> {
        let state = self.state()?;
        Ok(state
            .filters
            .values()
            .filter(|row| row.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Filter>, CatalogRepositoryError> {
        Ok(self.state()?.filters.get(&id).cloned())
    }

    async fn create(&self, filter: &FilterDraft) -> Result<Filter, CatalogRepositoryError> {
        let mut state = self.state()?;
        ensure_exists(&state.categories, filter.category_id, constraints::FILTER_CATEGORY)?;
        let id = next(&mut state.sequences.filters);
        let row = Filter {
            id,
            category_id: filter.category_id,
            text: filter.text.clone(),
            image: filter.image.clone(),
            status: filter.status,
        };
        state.filters.insert(id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        filter: &FilterDraft,
    ) -> Result<Option<Filter>, CatalogRepositoryError> {
        let mut state = self.state()?;
        ensure_exists(&state.categories, filter.category_id, constraints::FILTER_CATEGORY)?;
        Ok(state.filters.get_mut(&id).map(|row| {
            row.category_id = filter.category_id;
            row.text = filter.text.clone();
            row.image = filter.image.clone();
            row.status = filter.status;
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        Ok(self.state()?.filters.remove(&id).is_some())
    }
}
