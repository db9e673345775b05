//! Catalogue entities and the value types shared between them.
//!
//! Each entity comes in three shapes:
//! - the stored entity (`Category`),
//! - a creation draft whose identifiers may be absent (`CategoryDraft`),
//! - a partial update (`CategoryPatch`) where `None` leaves a field as is.
//!
//! Storage ports receive `New*` records whose identifiers are already
//! resolved.

mod brand;
mod category;
mod characteristic;
mod filter;
mod product;
mod subcategory;
mod tag;
mod values;

pub use brand::{Brand, BrandDraft};
pub use category::{Category, CategoryDraft, CategoryPatch, NewCategory};
pub use characteristic::{
    CharacteristicItem, CharacteristicItemDraft, CharacteristicTemplate,
    CharacteristicTemplateDraft, CharacteristicTemplatePatch,
};
pub use filter::{Filter, FilterDraft};
pub use product::{
    NewProduct, Product, ProductChanges, ProductDraft, ProductPatch, ProductsByBrand, ProductsByTag,
};
pub use subcategory::{NewSubcategory, Subcategory, SubcategoryDraft, SubcategoryPatch};
pub use tag::{NewTag, Tag, TagDraft, TagPatch};
pub use values::{
    CatalogValidationError, Discount, DisplayText, ImageUrl, ListWindow, MAX_PRODUCT_IMAGES,
    Price, ProductImages,
};
