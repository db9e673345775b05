//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs carry raw strings and numbers; these helpers turn them into
//! validated domain values and report failures as `invalid_request` errors
//! whose details name the offending field.

use serde_json::json;

use crate::domain::Error;
use crate::domain::catalog::{Discount, DisplayText, ImageUrl, Price, ProductImages};
use crate::domain::identifiers::{Article, Slug, TagValue, explicit_slug};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    BlankText,
    InvalidSlug,
    InvalidTagValue,
    InvalidArticle,
    InvalidImage,
    InvalidImageCount,
    InvalidPrice,
    InvalidDiscount,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BlankText => "blank_text",
            ErrorCode::InvalidSlug => "invalid_slug",
            ErrorCode::InvalidTagValue => "invalid_tag_value",
            ErrorCode::InvalidArticle => "invalid_article",
            ErrorCode::InvalidImage => "invalid_image",
            ErrorCode::InvalidImageCount => "invalid_image_count",
            ErrorCode::InvalidPrice => "invalid_price",
            ErrorCode::InvalidDiscount => "invalid_discount",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str().to_owned(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<serde_json::Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn parse_text(value: &str, field: FieldName) -> Result<DisplayText, Error> {
    DisplayText::new(value).map_err(|err| {
        ValidationError::new(field, format!("{}: {err}", field.as_str()))
            .with_code(ErrorCode::BlankText)
    })
}

pub(crate) fn parse_optional_text(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DisplayText>, Error> {
    value.map(|raw| parse_text(&raw, field)).transpose()
}

/// Parse a list of names, reporting the index of the first blank entry.
pub(crate) fn parse_text_list(values: Vec<String>, field: FieldName) -> Result<Vec<DisplayText>, Error> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            DisplayText::new(value).map_err(|err| {
                ValidationError::new(field, format!("{}: {err}", field.as_str()))
                    .with_index(ErrorCode::BlankText, index)
            })
        })
        .collect()
}

/// Parse a caller-supplied slug override; empty and absent both mean none.
pub(crate) fn parse_slug_override(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Slug>, Error> {
    explicit_slug(value.as_deref()).map_err(|err| {
        ValidationError::new(field, err.to_string())
            .with_value(ErrorCode::InvalidSlug, value.unwrap_or_default())
    })
}

pub(crate) fn parse_slug(value: &str, field: FieldName) -> Result<Slug, Error> {
    Slug::parse(value).map_err(|err| {
        ValidationError::new(field, err.to_string()).with_value(ErrorCode::InvalidSlug, value)
    })
}

pub(crate) fn parse_tag_value(value: &str, field: FieldName) -> Result<TagValue, Error> {
    TagValue::parse(value).map_err(|err| {
        ValidationError::new(field, err.to_string()).with_value(ErrorCode::InvalidTagValue, value)
    })
}

/// Parse a caller-supplied tag value override; empty and absent both mean
/// none.
pub(crate) fn parse_tag_value_override(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<TagValue>, Error> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => parse_tag_value(raw, field).map(Some),
    }
}

pub(crate) fn parse_article(value: i64, field: FieldName) -> Result<Article, Error> {
    Article::new(value).map_err(|err| {
        ValidationError::new(field, err.to_string()).with_value(ErrorCode::InvalidArticle, value)
    })
}

pub(crate) fn parse_optional_article(
    value: Option<i64>,
    field: FieldName,
) -> Result<Option<Article>, Error> {
    value.map(|raw| parse_article(raw, field)).transpose()
}

pub(crate) fn parse_image(value: &str, field: FieldName) -> Result<ImageUrl, Error> {
    ImageUrl::parse(value).map_err(|err| {
        ValidationError::new(field, err.to_string()).with_value(ErrorCode::InvalidImage, value)
    })
}

pub(crate) fn parse_optional_image(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<ImageUrl>, Error> {
    value.map(|raw| parse_image(&raw, field)).transpose()
}

/// Parse an ordered product image list.
pub(crate) fn parse_images(values: Vec<String>, field: FieldName) -> Result<ProductImages, Error> {
    let images = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            ImageUrl::parse(value).map_err(|err| {
                ValidationError::new(field, err.to_string())
                    .with_index(ErrorCode::InvalidImage, index)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    ProductImages::new(images).map_err(|err| {
        ValidationError::new(field, err.to_string()).with_code(ErrorCode::InvalidImageCount)
    })
}

pub(crate) fn parse_price(value: f64, field: FieldName) -> Result<Price, Error> {
    Price::new(value).map_err(|err| {
        ValidationError::new(field, err.to_string()).with_value(ErrorCode::InvalidPrice, value)
    })
}

pub(crate) fn parse_discount(value: f64, field: FieldName) -> Result<Discount, Error> {
    Discount::new(value).map_err(|err| {
        ValidationError::new(field, err.to_string()).with_value(ErrorCode::InvalidDiscount, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const TEXT: FieldName = FieldName::new("text");
    const SLUG: FieldName = FieldName::new("slug");
    const IMAGES: FieldName = FieldName::new("images");

    fn detail(error: &Error, key: &str) -> serde_json::Value {
        error.details().expect("details present")[key].clone()
    }

    #[rstest]
    fn blank_text_names_the_field() {
        let error = parse_text("   ", TEXT).expect_err("blank");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), "text");
        assert_eq!(detail(&error, "code"), "blank_text");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("trail-shoes"), Some("trail-shoes"))]
    fn slug_override_treats_empty_as_absent(
        #[case] raw: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let slug = parse_slug_override(raw.map(str::to_owned), SLUG).expect("valid");
        assert_eq!(slug.as_ref().map(Slug::as_str), expected);
    }

    #[rstest]
    fn malformed_slug_override_reports_value() {
        let error = parse_slug_override(Some("Trail Shoes".to_owned()), SLUG).expect_err("malformed");
        assert_eq!(detail(&error, "code"), "invalid_slug");
        assert_eq!(detail(&error, "value"), "Trail Shoes");
    }

    #[rstest]
    fn bad_image_reports_its_index() {
        let images = vec![
            "https://cdn.example.com/1.png".to_owned(),
            "not-a-url".to_owned(),
        ];
        let error = parse_images(images, IMAGES).expect_err("second image invalid");
        assert_eq!(detail(&error, "index"), 1);
        assert_eq!(detail(&error, "code"), "invalid_image");
    }

    #[rstest]
    fn empty_image_list_is_rejected() {
        let error = parse_images(Vec::new(), IMAGES).expect_err("no images");
        assert_eq!(detail(&error, "code"), "invalid_image_count");
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn non_positive_articles_are_rejected(#[case] value: i64) {
        let error = parse_article(value, FieldName::new("article")).expect_err("invalid");
        assert_eq!(detail(&error, "code"), "invalid_article");
    }

    #[rstest]
    fn tag_value_override_accepts_underscored_tokens() {
        let value = parse_tag_value_override(Some("new_arrivals".to_owned()), FieldName::new("value"))
            .expect("valid");
        assert_eq!(value.map(|v| v.as_str().to_owned()), Some("new_arrivals".to_owned()));
    }
}
