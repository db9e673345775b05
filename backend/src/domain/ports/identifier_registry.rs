//! Port answering "is this identifier already held?".
//!
//! The identifier resolver consults this port while it walks candidate
//! slugs, articles and tag values. Answers are advisory: a concurrent writer
//! may claim a free identifier before the caller inserts it, in which case
//! the store's unique constraint rejects the write.

use async_trait::async_trait;

use crate::domain::identifiers::{Article, Slug, TagValue};

use super::CatalogRepositoryError;

/// Table whose slug namespace a check targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlugScope {
    Category,
    Subcategory,
    Product,
}

impl SlugScope {
    /// Entity label used in placeholder slugs and error details.
    pub fn entity(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Product => "product",
        }
    }
}

/// Existence checks for generated identifiers.
///
/// Each check returns `true` when a record other than `exclude_id` holds
/// the identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentifierRegistry: Send + Sync {
    async fn slug_taken(
        &self,
        scope: SlugScope,
        slug: &Slug,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError>;

    async fn article_taken(
        &self,
        article: Article,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError>;

    async fn tag_value_taken(
        &self,
        value: &TagValue,
        exclude_id: Option<i32>,
    ) -> Result<bool, CatalogRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SlugScope::Category, "category")]
    #[case(SlugScope::Subcategory, "subcategory")]
    #[case(SlugScope::Product, "product")]
    fn scope_entity_labels_are_slug_fragments(#[case] scope: SlugScope, #[case] label: &str) {
        assert_eq!(scope.entity(), label);
        assert!(Slug::parse(scope.entity()).is_ok());
    }
}
