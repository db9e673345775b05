//! Bounded uniqueness resolution for slugs, tag values and articles.
//!
//! Each resolver walks a deterministic (slugs, tag values) or random
//! (articles) sequence of candidates, asking an existence check whether each
//! candidate is already held. The first free candidate wins. The walk is
//! bounded by a [`RetryPolicy`]; a saturated namespace yields
//! [`ResolveError::Exhausted`] instead of looping.
//!
//! The existence check is advisory. Callers exclude the record being updated
//! inside the check itself, and the store's unique constraints remain the
//! final arbiter.

use std::future::Future;

use chrono::{DateTime, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::article::{Article, article_candidate};
use super::slug::Slug;
use super::tag_value::TagValue;

/// Default bound on existence checks per resolution.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 256;

/// Number of hex characters in generated placeholder identifiers.
const PLACEHOLDER_HEX_LEN: usize = 8;

/// Upper bound on the number of candidates a resolver may check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Build a policy allowing `max_attempts` checks. Zero is raised to one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Maximum number of existence checks.
    pub fn max_attempts(self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Failure of a uniqueness resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError<E> {
    /// Every candidate allowed by the policy was taken.
    #[error("no free identifier after {attempts} attempts")]
    Exhausted { attempts: u32 },
    /// The existence check itself failed.
    #[error("identifier lookup failed: {0}")]
    Lookup(#[source] E),
}

/// `base`, then `base{separator}1`, `base{separator}2`, and so on.
fn suffixed_candidates(base: &str, separator: char) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_owned()).chain((1_u32..).map(move |n| format!("{base}{separator}{n}")))
}

/// Return the first candidate for which `taken` reports `false`.
async fn first_free<T, I, F, Fut, E>(
    candidates: I,
    policy: RetryPolicy,
    mut taken: F,
) -> Result<T, ResolveError<E>>
where
    T: Clone,
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let limit = usize::try_from(policy.max_attempts()).unwrap_or(usize::MAX);
    let mut attempts = 0;
    for candidate in candidates.into_iter().take(limit) {
        attempts += 1;
        if !taken(candidate.clone()).await.map_err(ResolveError::Lookup)? {
            return Ok(candidate);
        }
    }
    Err(ResolveError::Exhausted { attempts })
}

/// Resolve `candidate` into a slug no other record holds.
///
/// Returns `candidate` when free, otherwise the first free of
/// `candidate-1`, `candidate-2`, ... within the policy's bound.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use catalog_backend::domain::identifiers::{resolve_unique_slug, RetryPolicy, Slug};
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
/// # runtime.block_on(async {
/// let taken: HashSet<&str> = ["shoes", "shoes-1"].into();
/// let base = Slug::parse("shoes").expect("valid slug");
/// let slug = resolve_unique_slug(&base, RetryPolicy::default(), |candidate| {
///     let held = taken.contains(candidate.as_str());
///     async move { Ok::<_, std::convert::Infallible>(held) }
/// })
/// .await
/// .expect("namespace has room");
/// assert_eq!(slug.as_str(), "shoes-2");
/// # });
/// ```
pub async fn resolve_unique_slug<F, Fut, E>(
    candidate: &Slug,
    policy: RetryPolicy,
    taken: F,
) -> Result<Slug, ResolveError<E>>
where
    F: FnMut(Slug) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let candidates = suffixed_candidates(candidate.as_str(), '-').map(Slug::from_normalised);
    first_free(candidates, policy, taken).await
}

/// Resolve `candidate` into a tag value no other tag holds, suffixing `_N`.
pub async fn resolve_unique_tag_value<F, Fut, E>(
    candidate: &TagValue,
    policy: RetryPolicy,
    taken: F,
) -> Result<TagValue, ResolveError<E>>
where
    F: FnMut(TagValue) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let candidates = suffixed_candidates(candidate.as_str(), '_').map(TagValue::from_normalised);
    first_free(candidates, policy, taken).await
}

/// Generate an article no product holds.
///
/// Each attempt draws a fresh random component for the current date taken
/// from `clock`.
pub async fn generate_unique_article<F, Fut, E>(
    clock: &dyn Clock,
    policy: RetryPolicy,
    taken: F,
) -> Result<Article, ResolveError<E>>
where
    F: FnMut(Article) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let now = clock.utc();
    let candidates = std::iter::repeat_with(move || draw_article(now));
    first_free(candidates, policy, taken).await
}

// The thread-local rng is not `Send`, so it never lives across an await.
fn draw_article(now: DateTime<Utc>) -> Article {
    article_candidate(now, &mut rand::thread_rng())
}

fn random_hex() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(PLACEHOLDER_HEX_LEN)
        .collect()
}

/// Placeholder slug `<entity>-<8 hex>` used when a text yields no slug.
///
/// `entity` must itself be a valid slug fragment such as `"category"`.
pub fn placeholder_slug(entity: &str) -> Slug {
    Slug::from_normalised(format!("{entity}-{}", random_hex()))
}

/// Placeholder tag value `tag_<8 hex>` used when a name yields no value.
pub fn placeholder_tag_value() -> TagValue {
    TagValue::from_normalised(format!("tag_{}", random_hex()))
}
