//! End-to-end identifier resolution through the catalogue services over the
//! in-memory store.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::Value;

use catalog_backend::domain::ErrorCode;
use catalog_backend::domain::catalog::{
    CategoryDraft, CategoryPatch, DisplayText, ImageUrl, Price, ProductDraft, ProductImages,
    SubcategoryDraft, TagDraft,
};
use catalog_backend::domain::identifiers::{RetryPolicy, Slug, slugify, tag_value_from_name};
use catalog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use catalog_backend::outbound::memory::InMemoryCatalog;

struct March2026;

impl Clock for March2026 {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0)
            .single()
            .expect("valid instant")
    }
}

fn state_with(policy: RetryPolicy) -> HttpState {
    let ports = HttpStatePorts::shared(Arc::new(InMemoryCatalog::new()));
    HttpState::new(ports, Arc::new(March2026), move |resolver| {
        resolver.with_policy(policy)
    })
}

#[fixture]
fn state() -> HttpState {
    state_with(RetryPolicy::default())
}

fn text(value: &str) -> DisplayText {
    DisplayText::new(value).expect("valid text")
}

fn category(value: &str) -> CategoryDraft {
    CategoryDraft {
        text: text(value),
        slug: None,
        icon: None,
    }
}

#[rstest]
#[case("Беговые кроссовки")]
#[case("  Zoë's Café & Bar!! ")]
#[case("東京 2026")]
#[case("🙂🙂")]
#[case("---")]
fn derived_slugs_are_hyphenated_ascii(#[case] input: &str) {
    let slug = slugify(input);
    assert!(
        slug.is_empty() || Slug::parse(&slug).is_ok(),
        "{input:?} produced {slug:?}"
    );
}

#[rstest]
fn tag_values_use_underscores() {
    assert_eq!(tag_value_from_name("Беговые кроссовки"), "begovye_krossovki");
}

#[rstest]
#[tokio::test]
async fn repeated_texts_receive_numbered_slugs(state: HttpState) {
    let mut slugs = Vec::new();
    for _ in 0..3 {
        let created = state
            .categories
            .create(category("Shoes"))
            .await
            .expect("category created");
        slugs.push(created.slug.as_str().to_owned());
    }
    assert_eq!(slugs, ["shoes", "shoes-1", "shoes-2"]);
}

#[rstest]
#[tokio::test]
async fn saturated_namespace_is_a_conflict() {
    let state = state_with(RetryPolicy::new(2));
    state.categories.create(category("Shoes")).await.expect("first");
    state.categories.create(category("Shoes")).await.expect("second");

    let err = state
        .categories
        .create(category("Shoes"))
        .await
        .expect_err("namespace exhausted");
    assert_eq!(err.code(), ErrorCode::Conflict);
    let details: &Value = err.details().expect("details present");
    assert_eq!(details["code"], "identifier_exhausted");
    assert_eq!(details["attempts"], 2);
}

#[rstest]
#[tokio::test]
async fn symbol_only_text_gets_placeholder_slug(state: HttpState) {
    let created = state
        .categories
        .create(category("!!!"))
        .await
        .expect("category created");
    let slug = created.slug.as_str();
    let suffix = slug.strip_prefix("category-").expect("placeholder prefix");
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
}

#[rstest]
#[tokio::test]
async fn rename_regenerates_slug_unless_given(state: HttpState) {
    let created = state.categories.create(category("Shoes")).await.expect("created");

    let renamed = state
        .categories
        .update(
            created.id,
            CategoryPatch {
                text: Some(text("Trail Shoes")),
                ..CategoryPatch::default()
            },
        )
        .await
        .expect("renamed");
    assert_eq!(renamed.slug.as_str(), "trail-shoes");

    let pinned = state
        .categories
        .update(
            created.id,
            CategoryPatch {
                text: Some(text("Road Shoes")),
                slug: Some(Slug::parse("classic").expect("valid slug")),
                ..CategoryPatch::default()
            },
        )
        .await
        .expect("pinned");
    assert_eq!(pinned.slug.as_str(), "classic");
}

#[rstest]
#[tokio::test]
async fn concurrent_creates_never_share_a_slug(state: HttpState) {
    let (first, second) = tokio::join!(
        state.categories.create(category("Shoes")),
        state.categories.create(category("Shoes")),
    );
    let first = first.expect("first created");
    let second = second.expect("second created");
    assert_ne!(first.slug, second.slug);
}

#[rstest]
#[tokio::test]
async fn product_articles_carry_the_creation_date(state: HttpState) {
    let parent = state.categories.create(category("Shoes")).await.expect("category");
    let subcategory = state
        .subcategories
        .create(SubcategoryDraft {
            text: text("Running"),
            slug: None,
            image: ImageUrl::parse("https://cdn.example.com/r.png").expect("url"),
            category_id: parent.id,
            brand_id: None,
        })
        .await
        .expect("subcategory");
    state
        .tags
        .create(TagDraft {
            name: text("Sale"),
            value: None,
        })
        .await
        .expect("tag");

    let product = state
        .products
        .create(ProductDraft {
            text: text("Air Runner"),
            slug: None,
            article: None,
            price: Price::new(99.0).expect("price"),
            discount: Default::default(),
            in_stock: true,
            small_description: None,
            full_description: None,
            subcategory_id: subcategory.id,
            brand_id: None,
            images: ProductImages::new(vec![
                ImageUrl::parse("https://cdn.example.com/p.png").expect("url"),
            ])
            .expect("images"),
            tag_names: vec![text("Sale"), text("New Arrivals")],
            characteristic_ids: Vec::new(),
        })
        .await
        .expect("product");

    assert_eq!(product.article.get() / 1_000_000_000, 260_315);
    let values: Vec<&str> = product.tags.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, ["sale", "new_arrivals"]);
}
