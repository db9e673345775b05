//! Identifier resolution: slugs, tag values and product articles.
//!
//! Pure derivation lives in [`slug`], [`tag_value`] and [`article`];
//! uniqueness resolution against an existence check lives in [`resolver`];
//! the update-time rule for slugs lives in [`slug_policy`].

pub mod article;
pub mod resolver;
pub mod slug;
pub mod slug_policy;
pub mod tag_value;
pub mod transliteration;

pub use article::{Article, ArticleValidationError, article_candidate, article_date_component};
pub use resolver::{
    DEFAULT_MAX_ATTEMPTS, ResolveError, RetryPolicy, generate_unique_article, placeholder_slug,
    placeholder_tag_value, resolve_unique_slug, resolve_unique_tag_value,
};
pub use slug::{DerivedToken, Slug, SlugValidationError, slugify, slugify_with};
pub use slug_policy::{SlugChange, explicit_slug, plan_slug_update};
pub use tag_value::{TagValue, TagValueValidationError, tag_value_from_name, tag_value_from_name_with};
pub use transliteration::{
    DeunicodeTransliterator, TransliterationError, TransliterationOutcome, Transliterated,
    Transliterator, transliterate_best_effort,
};
#[cfg(test)]
pub use transliteration::MockTransliterator;
