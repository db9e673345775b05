//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod brand_repository;
mod category_repository;
mod characteristic_repository;
mod filter_repository;
mod identifier_registry;
mod product_repository;
mod repository_error;
mod subcategory_repository;
mod tag_repository;

pub use brand_repository::BrandRepository;
#[cfg(test)]
pub use brand_repository::MockBrandRepository;
pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use characteristic_repository::CharacteristicRepository;
#[cfg(test)]
pub use characteristic_repository::MockCharacteristicRepository;
pub use filter_repository::FilterRepository;
#[cfg(test)]
pub use filter_repository::MockFilterRepository;
#[cfg(test)]
pub use identifier_registry::MockIdentifierRegistry;
pub use identifier_registry::{IdentifierRegistry, SlugScope};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::ProductRepository;
pub use repository_error::{CatalogRepositoryError, constraints};
#[cfg(test)]
pub use subcategory_repository::MockSubcategoryRepository;
pub use subcategory_repository::SubcategoryRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::TagRepository;
