//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on catalogue services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BrandRepository, CategoryRepository, CharacteristicRepository, FilterRepository,
    IdentifierRegistry, ProductRepository, SubcategoryRepository, TagRepository,
};
use crate::domain::services::{
    BrandService, CategoryService, CharacteristicService, FilterService, IdentifierResolver,
    ProductService, SubcategoryService, TagService,
};

/// Parameter object bundling every storage port the services need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub categories: Arc<dyn CategoryRepository>,
    pub subcategories: Arc<dyn SubcategoryRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub filters: Arc<dyn FilterRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub characteristics: Arc<dyn CharacteristicRepository>,
    pub identifiers: Arc<dyn IdentifierRegistry>,
}

impl HttpStatePorts {
    /// Use one adapter for every port.
    pub fn shared<A>(adapter: Arc<A>) -> Self
    where
        A: CategoryRepository
            + SubcategoryRepository
            + BrandRepository
            + FilterRepository
            + TagRepository
            + ProductRepository
            + CharacteristicRepository
            + IdentifierRegistry
            + 'static,
    {
        Self {
            categories: adapter.clone(),
            subcategories: adapter.clone(),
            brands: adapter.clone(),
            filters: adapter.clone(),
            tags: adapter.clone(),
            products: adapter.clone(),
            characteristics: adapter.clone(),
            identifiers: adapter,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<CategoryService>,
    pub subcategories: Arc<SubcategoryService>,
    pub brands: Arc<BrandService>,
    pub filters: Arc<FilterService>,
    pub tags: Arc<TagService>,
    pub products: Arc<ProductService>,
    pub characteristics: Arc<CharacteristicService>,
}

impl HttpState {
    /// Wire services over `ports`.
    ///
    /// `configure` adjusts the identifier resolver built over the
    /// registry port, for example to set its retry policy.
    pub fn new(
        ports: HttpStatePorts,
        clock: Arc<dyn mockable::Clock>,
        configure: impl FnOnce(IdentifierResolver) -> IdentifierResolver,
    ) -> Self {
        let identifiers = configure(IdentifierResolver::new(ports.identifiers, clock));
        let tags = Arc::new(TagService::new(ports.tags, identifiers.clone()));
        Self {
            categories: Arc::new(CategoryService::new(ports.categories, identifiers.clone())),
            subcategories: Arc::new(SubcategoryService::new(
                ports.subcategories,
                identifiers.clone(),
            )),
            brands: Arc::new(BrandService::new(ports.brands)),
            filters: Arc::new(FilterService::new(ports.filters)),
            products: Arc::new(ProductService::new(ports.products, tags.clone(), identifiers)),
            tags,
            characteristics: Arc::new(CharacteristicService::new(ports.characteristics)),
        }
    }
}
