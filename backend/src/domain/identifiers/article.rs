//! Numeric product articles.
//!
//! An article is a positive 64-bit integer identifying a product
//! independently of its slug. Generated articles combine the creation date
//! with a random component: `YYMMDD * 10^9 + r` where `r` is drawn uniformly
//! from `0..10^9`.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Exclusive upper bound of the random component.
pub const ARTICLE_RANDOM_SPAN: i64 = 1_000_000_000;

/// Validation failure for caller-supplied articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("article must be a positive number, got {value}")]
pub struct ArticleValidationError {
    value: i64,
}

/// Validated product article.
///
/// # Examples
/// ```
/// use catalog_backend::domain::identifiers::Article;
///
/// assert!(Article::new(42).is_ok());
/// assert!(Article::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Article(i64);

impl Article {
    /// Validate that `value` is positive.
    pub fn new(value: i64) -> Result<Self, ArticleValidationError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(ArticleValidationError { value })
        }
    }

    /// The raw article number.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Article {
    type Error = ArticleValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Article> for i64 {
    fn from(value: Article) -> Self {
        value.0
    }
}

/// `YYMMDD` date component for an article generated at `now`.
pub fn article_date_component(now: DateTime<Utc>) -> i64 {
    let yy = i64::from(now.year().rem_euclid(100));
    let mm = i64::from(now.month());
    let dd = i64::from(now.day());
    yy * 10_000 + mm * 100 + dd
}

/// Draw one article candidate for `now`.
///
/// The date component is at least `000101`, so every candidate is positive.
pub fn article_candidate<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Article {
    let random = rng.gen_range(0..ARTICLE_RANDOM_SPAN);
    Article(article_date_component(now) * ARTICLE_RANDOM_SPAN + random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[rstest]
    #[case(1, true)]
    #[case(i64::MAX, true)]
    #[case(0, false)]
    #[case(-5, false)]
    fn new_requires_positive_values(#[case] value: i64, #[case] valid: bool) {
        assert_eq!(Article::new(value).is_ok(), valid);
    }

    #[rstest]
    fn date_component_is_yymmdd(now: DateTime<Utc>) {
        assert_eq!(article_date_component(now), 260_309);
    }

    #[rstest]
    fn candidate_embeds_date_component(now: DateTime<Utc>) {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let article = article_candidate(now, &mut rng).get();
            assert_eq!(article / ARTICLE_RANDOM_SPAN, 260_309);
            assert!(article > 0);
        }
    }

    #[rstest]
    fn article_rejects_non_positive_json() {
        assert!(serde_json::from_str::<Article>("0").is_err());
        let article: Article = serde_json::from_str("123").expect("positive article");
        assert_eq!(article.get(), 123);
    }
}
