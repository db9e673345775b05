//! Constraint behaviour of the in-memory catalogue.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::catalog::{
    BrandDraft, CategoryPatch, CharacteristicItemDraft, CharacteristicTemplateDraft,
    CharacteristicTemplatePatch, Discount, DisplayText, ImageUrl, NewCategory, NewSubcategory,
    NewTag, Price, ProductImages,
};
use crate::domain::ports::{
    BrandRepository, CategoryRepository, CharacteristicRepository, ProductRepository,
    SubcategoryRepository, TagRepository, constraints,
};

fn text(value: &str) -> DisplayText {
    DisplayText::new(value).expect("valid text")
}

fn slug(value: &str) -> Slug {
    Slug::parse(value).expect("valid slug")
}

fn image() -> ImageUrl {
    ImageUrl::parse("https://cdn.example.com/a.png").expect("valid url")
}

fn new_category(slug_value: &str) -> NewCategory {
    NewCategory {
        text: text("Shoes"),
        slug: slug(slug_value),
        icon: None,
    }
}

fn new_product(subcategory_id: i32, slug_value: &str, article: i64) -> NewProduct {
    NewProduct {
        text: text("Nimbus"),
        slug: slug(slug_value),
        article: Article::new(article).expect("valid article"),
        price: Price::new(100.0).expect("valid price"),
        discount: Discount::default(),
        in_stock: true,
        small_description: None,
        full_description: None,
        subcategory_id,
        brand_id: None,
        images: ProductImages::new(vec![image()]).expect("one image"),
        tag_ids: Vec::new(),
        characteristic_ids: Vec::new(),
    }
}

/// Catalogue holding one category (id 1) and one subcategory (id 1).
#[fixture]
async fn seeded() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    CategoryRepository::create(&catalog, &new_category("shoes"))
        .await
        .expect("category");
    SubcategoryRepository::create(
        &catalog,
        &NewSubcategory {
            text: text("Running"),
            slug: slug("running"),
            image: image(),
            category_id: 1,
            brand_id: None,
        },
    )
    .await
    .expect("subcategory");
    catalog
}

#[rstest]
#[tokio::test]
async fn duplicate_slug_reports_its_constraint(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let error = CategoryRepository::create(&catalog, &new_category("shoes"))
        .await
        .expect_err("duplicate");
    assert_eq!(
        error,
        CatalogRepositoryError::unique_violation(constraints::CATEGORY_SLUG)
    );
}

#[rstest]
#[tokio::test]
async fn update_may_keep_own_slug(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let patch = CategoryPatch {
        slug: Some(slug("shoes")),
        ..CategoryPatch::default()
    };
    let updated = CategoryRepository::update(&catalog, 1, &patch)
        .await
        .expect("update")
        .expect("row exists");
    assert_eq!(updated.slug.as_str(), "shoes");
}

#[rstest]
#[tokio::test]
async fn registry_excludes_the_record_being_updated(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let held = slug("shoes");
    assert!(catalog.slug_taken(SlugScope::Category, &held, None).await.expect("lookup"));
    assert!(!catalog.slug_taken(SlugScope::Category, &held, Some(1)).await.expect("lookup"));
    assert!(!catalog.slug_taken(SlugScope::Product, &held, None).await.expect("lookup"));
}

#[rstest]
#[tokio::test]
async fn referenced_category_cannot_be_deleted(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let error = CategoryRepository::delete(&catalog, 1)
        .await
        .expect_err("still referenced");
    assert_eq!(
        error,
        CatalogRepositoryError::still_referenced(constraints::SUBCATEGORY_CATEGORY)
    );
}

#[rstest]
#[tokio::test]
async fn product_requires_existing_subcategory(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let error = ProductRepository::create(&catalog, &new_product(99, "nimbus", 1))
        .await
        .expect_err("missing subcategory");
    assert_eq!(
        error,
        CatalogRepositoryError::missing_reference(constraints::PRODUCT_SUBCATEGORY)
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_article_reports_its_constraint(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    ProductRepository::create(&catalog, &new_product(1, "nimbus", 7))
        .await
        .expect("first product");
    let error = ProductRepository::create(&catalog, &new_product(1, "kayano", 7))
        .await
        .expect_err("duplicate article");
    assert_eq!(
        error,
        CatalogRepositoryError::unique_violation(constraints::PRODUCT_ARTICLE)
    );
    assert!(catalog
        .article_taken(Article::new(7).expect("valid"), None)
        .await
        .expect("lookup"));
}

#[rstest]
#[tokio::test]
async fn deleting_a_tag_unlinks_products(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let tag = TagRepository::create(
        &catalog,
        &NewTag {
            name: text("Sale"),
            value: TagValue::parse("sale").expect("valid value"),
        },
    )
    .await
    .expect("tag");
    let mut product = new_product(1, "nimbus", 1);
    product.tag_ids = vec![tag.id];
    ProductRepository::create(&catalog, &product).await.expect("product");

    let (tagged, total) = catalog.list_by_tag(tag.id, 10).await.expect("list");
    assert_eq!((tagged.len(), total), (1, 1));
    assert_eq!(tagged[0].tags[0].name.as_str(), "Sale");

    assert!(TagRepository::delete(&catalog, tag.id).await.expect("delete"));
    let stored = ProductRepository::find_by_id(&catalog, 1)
        .await
        .expect("lookup")
        .expect("product kept");
    assert!(stored.tags.is_empty());
}

#[rstest]
#[tokio::test]
async fn replacing_template_items_drops_product_links(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let item = |name: &str| CharacteristicItemDraft {
        name: text(name),
        label: name.to_owned(),
        value: "x".to_owned(),
    };
    let template = CharacteristicRepository::create(
        &catalog,
        &CharacteristicTemplateDraft {
            name: text("Shoes"),
            description: None,
            items: vec![item("Sole"), item("Upper")],
        },
    )
    .await
    .expect("template");
    let mut product = new_product(1, "nimbus", 1);
    product.characteristic_ids = vec![template.items[0].id];
    ProductRepository::create(&catalog, &product).await.expect("product");

    let patch = CharacteristicTemplatePatch {
        items: Some(vec![item("Lining")]),
        ..CharacteristicTemplatePatch::default()
    };
    let updated = CharacteristicRepository::update(&catalog, template.id, &patch)
        .await
        .expect("update")
        .expect("template exists");
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].id, 3);

    let stored = ProductRepository::find_by_id(&catalog, 1)
        .await
        .expect("lookup")
        .expect("product kept");
    assert!(stored.characteristic_ids.is_empty());
}

#[rstest]
#[tokio::test]
async fn brand_products_report_total_beyond_window(#[future] seeded: InMemoryCatalog) {
    let catalog = seeded.await;
    let brand = BrandRepository::create(
        &catalog,
        &BrandDraft {
            name: text("Asics"),
            image: image(),
        },
    )
    .await
    .expect("brand");
    for n in 1..=3 {
        let mut product = new_product(1, &format!("nimbus-{n}"), i64::from(n));
        product.brand_id = Some(brand.id);
        ProductRepository::create(&catalog, &product).await.expect("product");
    }

    let page = catalog
        .list_by_brand(brand.id, ListWindow::new(Some(1), Some(1)))
        .await
        .expect("list");
    assert_eq!(page.total, 3);
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].slug.as_str(), "nimbus-2");
}
