//! Identifier resolution wired to the [`IdentifierRegistry`] port.
//!
//! [`IdentifierResolver`] is the single place where services obtain slugs,
//! articles and tag values for create and update operations.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use crate::domain::Error;
use crate::domain::catalog::DisplayText;
use crate::domain::identifiers::{
    Article, DeunicodeTransliterator, RetryPolicy, Slug, SlugChange, TagValue, Transliterator,
    generate_unique_article, placeholder_slug, placeholder_tag_value, plan_slug_update,
    resolve_unique_slug, resolve_unique_tag_value, slugify_with, tag_value_from_name_with,
};
use crate::domain::ports::{IdentifierRegistry, SlugScope};

use super::{identifier_taken, map_repository_error, map_resolve_error};

/// Resolves unique identifiers for catalogue writes.
#[derive(Clone)]
pub struct IdentifierResolver {
    registry: Arc<dyn IdentifierRegistry>,
    transliterator: Arc<dyn Transliterator>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,
}

impl IdentifierResolver {
    /// Create a resolver with the default transliterator and retry policy.
    pub fn new(registry: Arc<dyn IdentifierRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            transliterator: Arc::new(DeunicodeTransliterator),
            clock,
            policy: RetryPolicy::default(),
        }
    }

    /// Override the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the transliterator.
    pub fn with_transliterator(mut self, transliterator: Arc<dyn Transliterator>) -> Self {
        self.transliterator = transliterator;
        self
    }

    /// Slug for a new entity: the explicit slug if free, otherwise one
    /// derived from `text`.
    pub async fn slug_for_create(
        &self,
        scope: SlugScope,
        text: &DisplayText,
        explicit: Option<&Slug>,
    ) -> Result<Slug, Error> {
        match explicit {
            Some(slug) => self.claim_slug(scope, slug, None).await,
            None => self.derive_slug(scope, text.as_str(), None).await,
        }
    }

    /// Slug change for an update, or `None` when the slug stays as is.
    pub async fn slug_for_update(
        &self,
        scope: SlugScope,
        id: i32,
        current_text: &DisplayText,
        new_text: Option<&DisplayText>,
        explicit: Option<&Slug>,
    ) -> Result<Option<Slug>, Error> {
        let change = plan_slug_update(
            explicit.cloned(),
            new_text.map(DisplayText::as_str),
            current_text.as_str(),
        );
        match change {
            SlugChange::Explicit(slug) => self.claim_slug(scope, &slug, Some(id)).await.map(Some),
            SlugChange::Regenerate(text) => {
                let slug = self.derive_slug(scope, &text, Some(id)).await?;
                info!(entity = scope.entity(), id, slug = %slug, "regenerated slug after text change");
                Ok(Some(slug))
            }
            SlugChange::Keep => Ok(None),
        }
    }

    /// Article for a new product.
    ///
    /// An explicit article is kept when free and replaced by a generated one
    /// when another product already holds it.
    pub async fn article_for_create(&self, explicit: Option<Article>) -> Result<Article, Error> {
        if let Some(article) = explicit {
            if !self.article_taken(article, None).await? {
                return Ok(article);
            }
            info!(%article, "requested article is taken; generating a new one");
        }
        let registry = self.registry.as_ref();
        generate_unique_article(self.clock.as_ref(), self.policy, |candidate| async move {
            registry.article_taken(candidate, None).await
        })
        .await
        .map_err(|err| map_resolve_error("article", err))
    }

    /// Article change for an update. Articles change only when given
    /// explicitly, and the new value must be free.
    pub async fn article_for_update(
        &self,
        id: i32,
        explicit: Option<Article>,
    ) -> Result<Option<Article>, Error> {
        let Some(article) = explicit else {
            return Ok(None);
        };
        if self.article_taken(article, Some(id)).await? {
            return Err(identifier_taken("article", &article.to_string()));
        }
        Ok(Some(article))
    }

    /// Tag value for a new tag: the explicit value if free, otherwise one
    /// derived from `name`.
    pub async fn tag_value_for_create(
        &self,
        name: &DisplayText,
        explicit: Option<&TagValue>,
    ) -> Result<TagValue, Error> {
        match explicit {
            Some(value) => self.claim_tag_value(value, None).await,
            None => self.derive_tag_value(name.as_str(), None).await,
        }
    }

    /// Tag value change for an update, following the slug policy.
    pub async fn tag_value_for_update(
        &self,
        id: i32,
        current_name: &DisplayText,
        new_name: Option<&DisplayText>,
        explicit: Option<&TagValue>,
    ) -> Result<Option<TagValue>, Error> {
        if let Some(value) = explicit {
            return self.claim_tag_value(value, Some(id)).await.map(Some);
        }
        match new_name {
            Some(name) if name != current_name => {
                self.derive_tag_value(name.as_str(), Some(id)).await.map(Some)
            }
            _ => Ok(None),
        }
    }

    async fn claim_slug(
        &self,
        scope: SlugScope,
        slug: &Slug,
        exclude_id: Option<i32>,
    ) -> Result<Slug, Error> {
        let taken = self
            .registry
            .slug_taken(scope, slug, exclude_id)
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(identifier_taken("slug", slug.as_str()));
        }
        Ok(slug.clone())
    }

    async fn derive_slug(
        &self,
        scope: SlugScope,
        text: &str,
        exclude_id: Option<i32>,
    ) -> Result<Slug, Error> {
        let derived = slugify_with(self.transliterator.as_ref(), text);
        let base = match Slug::parse(&derived.text) {
            Ok(slug) => slug,
            Err(_) => {
                let placeholder = placeholder_slug(scope.entity());
                debug!(entity = scope.entity(), slug = %placeholder, "text yields no slug; using placeholder");
                placeholder
            }
        };
        let registry = self.registry.as_ref();
        resolve_unique_slug(&base, self.policy, |candidate| async move {
            registry.slug_taken(scope, &candidate, exclude_id).await
        })
        .await
        .map_err(|err| map_resolve_error("slug", err))
    }

    async fn claim_tag_value(
        &self,
        value: &TagValue,
        exclude_id: Option<i32>,
    ) -> Result<TagValue, Error> {
        let taken = self
            .registry
            .tag_value_taken(value, exclude_id)
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(identifier_taken("value", value.as_str()));
        }
        Ok(value.clone())
    }

    async fn derive_tag_value(&self, name: &str, exclude_id: Option<i32>) -> Result<TagValue, Error> {
        let derived = tag_value_from_name_with(self.transliterator.as_ref(), name);
        let base = TagValue::parse(&derived.text).unwrap_or_else(|_| placeholder_tag_value());
        let registry = self.registry.as_ref();
        resolve_unique_tag_value(&base, self.policy, |candidate| async move {
            registry.tag_value_taken(&candidate, exclude_id).await
        })
        .await
        .map_err(|err| map_resolve_error("value", err))
    }

    async fn article_taken(&self, article: Article, exclude_id: Option<i32>) -> Result<bool, Error> {
        self.registry
            .article_taken(article, exclude_id)
            .await
            .map_err(map_repository_error)
    }
}
