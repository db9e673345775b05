//! Validated value types shared by catalogue entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of images attached to a product.
pub const MAX_PRODUCT_IMAGES: usize = 15;

/// Largest page a list query may request.
const MAX_LIST_LIMIT: i64 = 100;

/// Validation failures for catalogue values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogValidationError {
    /// A display text is empty after trimming.
    #[error("text must not be blank")]
    BlankText,
    /// An image reference is not an absolute http(s) URL.
    #[error("image must be an http:// or https:// URL")]
    ImageUrl,
    /// A product has too few or too many images.
    #[error("a product needs between 1 and {max} images, got {count}", max = MAX_PRODUCT_IMAGES)]
    ImageCount { count: usize },
    /// A price is negative or not finite.
    #[error("price must be a non-negative number")]
    Price,
    /// A discount lies outside 0..=100.
    #[error("discount must be between 0 and 100")]
    Discount,
}

/// Non-blank display text such as a category title or tag name.
///
/// Surrounding whitespace is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayText(String);

impl DisplayText {
    /// Trim `value` and reject it when nothing remains.
    pub fn new(value: &str) -> Result<Self, CatalogValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::BlankText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DisplayText {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<DisplayText> for String {
    fn from(value: DisplayText) -> Self {
        value.0
    }
}

/// Absolute `http://` or `https://` image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Validate the URL scheme.
    pub fn parse(value: &str) -> Result<Self, CatalogValidationError> {
        let has_host = |rest: &str| !rest.is_empty() && !rest.chars().any(char::is_whitespace);
        match value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"))
        {
            Some(rest) if has_host(rest) => Ok(Self(value.to_owned())),
            _ => Err(CatalogValidationError::ImageUrl),
        }
    }

    /// Borrow the URL.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.0
    }
}

/// Ordered product gallery holding between 1 and [`MAX_PRODUCT_IMAGES`] URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImages(Vec<ImageUrl>);

impl ProductImages {
    /// Check the image count.
    pub fn new(images: Vec<ImageUrl>) -> Result<Self, CatalogValidationError> {
        let count = images.len();
        if count == 0 || count > MAX_PRODUCT_IMAGES {
            return Err(CatalogValidationError::ImageCount { count });
        }
        Ok(Self(images))
    }

    /// Images in display order.
    pub fn as_slice(&self) -> &[ImageUrl] {
        &self.0
    }

    /// Consume into the underlying list.
    pub fn into_inner(self) -> Vec<ImageUrl> {
        self.0
    }
}

/// Non-negative, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Validate `value`.
    pub fn new(value: f64) -> Result<Self, CatalogValidationError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(CatalogValidationError::Price)
        }
    }

    /// The raw amount.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Discount percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Discount(f64);

impl Discount {
    /// Validate `value`.
    pub fn new(value: f64) -> Result<Self, CatalogValidationError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CatalogValidationError::Discount)
        }
    }

    /// The raw percentage.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Offset/limit window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    offset: i64,
    limit: i64,
}

impl ListWindow {
    /// Clamp `offset` to be non-negative and `limit` to `1..=100`.
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(MAX_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT),
        }
    }

    /// Window with a custom ceiling on `limit`.
    pub fn capped(offset: Option<i64>, limit: Option<i64>, default: i64, max: i64) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(default).clamp(1, max),
        }
    }

    /// Rows to skip.
    pub fn offset(self) -> i64 {
        self.offset
    }

    /// Rows to return.
    pub fn limit(self) -> i64 {
        self.limit
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self::new(None, None)
    }
}
