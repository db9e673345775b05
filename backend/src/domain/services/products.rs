//! Product use-cases.
//!
//! Products resolve two identifiers (slug and article) and turn tag names
//! into tag ids before storage sees them.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::catalog::{
    ListWindow, NewProduct, Product, ProductChanges, ProductDraft, ProductPatch, ProductsByBrand,
    ProductsByTag, Tag,
};
use crate::domain::identifiers::{Article, Slug, TagValue};
use crate::domain::ports::{ProductRepository, SlugScope};

use super::{IdentifierResolver, TagService, map_repository_error, not_found, write_with_retry};

/// Products returned per tag when no limit is given.
pub const DEFAULT_TAG_PRODUCTS: i64 = 20;
/// Upper bound on products returned per tag.
pub const MAX_TAG_PRODUCTS: i64 = 50;

/// Product service backed by a [`ProductRepository`].
pub struct ProductService<R: ?Sized = dyn ProductRepository> {
    repo: Arc<R>,
    tags: Arc<TagService>,
    identifiers: IdentifierResolver,
}

impl<R: ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>, tags: Arc<TagService>, identifiers: IdentifierResolver) -> Self {
        Self {
            repo,
            tags,
            identifiers,
        }
    }
}

impl<R> ProductService<R>
where
    R: ProductRepository + ?Sized,
{
    pub async fn list(&self, window: ListWindow) -> Result<Vec<Product>, Error> {
        self.repo.list(window).await.map_err(map_repository_error)
    }

    pub async fn get(&self, id: i32) -> Result<Product, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("product", id))
    }

    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Product, Error> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product '{slug}' not found")))
    }

    pub async fn get_by_article(&self, article: Article) -> Result<Product, Error> {
        self.repo
            .find_by_article(article)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product with article {article} not found")))
    }

    pub async fn list_by_brand(
        &self,
        brand_id: i32,
        window: ListWindow,
    ) -> Result<ProductsByBrand, Error> {
        self.repo
            .list_by_brand(brand_id, window)
            .await
            .map_err(map_repository_error)
    }

    /// Products carrying tag `tag_id`, at most [`MAX_TAG_PRODUCTS`].
    pub async fn products_for_tag_id(
        &self,
        tag_id: i32,
        limit: Option<i64>,
    ) -> Result<ProductsByTag, Error> {
        let tag = self.tags.get(tag_id).await?;
        self.products_for_tag(tag, limit).await
    }

    /// Products carrying the tag with `value`, at most [`MAX_TAG_PRODUCTS`].
    pub async fn products_for_tag_value(
        &self,
        value: &TagValue,
        limit: Option<i64>,
    ) -> Result<ProductsByTag, Error> {
        let tag = self.tags.get_by_value(value).await?;
        self.products_for_tag(tag, limit).await
    }

    async fn products_for_tag(&self, tag: Tag, limit: Option<i64>) -> Result<ProductsByTag, Error> {
        let window = ListWindow::capped(None, limit, DEFAULT_TAG_PRODUCTS, MAX_TAG_PRODUCTS);
        let (products, total) = self
            .repo
            .list_by_tag(tag.id, window.limit())
            .await
            .map_err(map_repository_error)?;
        Ok(ProductsByTag {
            tag,
            products,
            total,
        })
    }

    /// Create a product.
    ///
    /// The slug is derived from the text unless given; the article is
    /// generated unless given and free. Tags named in the draft are created
    /// when missing.
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, Error> {
        let tag_ids = &self.tags.ensure_named(&draft.tag_names).await?;
        let draft = &draft;
        write_with_retry("create product", || async move {
            let slug = self
                .identifiers
                .slug_for_create(SlugScope::Product, &draft.text, draft.slug.as_ref())
                .await?;
            let article = self.identifiers.article_for_create(draft.article).await?;
            let product = NewProduct {
                text: draft.text.clone(),
                slug,
                article,
                price: draft.price,
                discount: draft.discount,
                in_stock: draft.in_stock,
                small_description: draft.small_description.clone(),
                full_description: draft.full_description.clone(),
                subcategory_id: draft.subcategory_id,
                brand_id: draft.brand_id,
                images: draft.images.clone(),
                tag_ids: tag_ids.clone(),
                characteristic_ids: draft.characteristic_ids.clone(),
            };
            Ok::<_, Error>(self.repo.create(&product).await)
        })
        .await
    }

    /// Update a product. The slug follows the text unless given; an explicit
    /// article must be free.
    pub async fn update(&self, id: i32, patch: ProductPatch) -> Result<Product, Error> {
        let current = &self.get(id).await?;
        let tag_ids = &match patch.tag_names.as_deref() {
            Some(names) => Some(self.tags.ensure_named(names).await?),
            None => None,
        };
        let patch = &patch;
        write_with_retry("update product", || async move {
            let slug = self
                .identifiers
                .slug_for_update(
                    SlugScope::Product,
                    id,
                    &current.text,
                    patch.text.as_ref(),
                    patch.slug.as_ref(),
                )
                .await?;
            let article = self.identifiers.article_for_update(id, patch.article).await?;
            let changes = ProductChanges {
                text: patch.text.clone(),
                slug,
                article,
                price: patch.price,
                discount: patch.discount,
                in_stock: patch.in_stock,
                small_description: patch.small_description.clone(),
                full_description: patch.full_description.clone(),
                subcategory_id: patch.subcategory_id,
                brand_id: patch.brand_id,
                images: patch.images.clone(),
                tag_ids: tag_ids.clone(),
                characteristic_ids: patch.characteristic_ids.clone(),
            };
            Ok::<_, Error>(self.repo.update(id, &changes).await)
        })
        .await?
        .ok_or_else(|| not_found("product", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(map_repository_error)? {
            Ok(())
        } else {
            Err(not_found("product", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::catalog::{Discount, DisplayText, ImageUrl, Price, ProductImages};
    use crate::domain::ports::{
        CatalogRepositoryError, MockIdentifierRegistry, MockProductRepository, MockTagRepository,
        TagRepository, constraints,
    };
    use crate::test_support::FixtureClock;

    fn text(value: &str) -> DisplayText {
        DisplayText::new(value).expect("valid text")
    }

    fn images() -> ProductImages {
        ProductImages::new(vec![
            ImageUrl::parse("https://cdn.example.com/p/1.jpg").expect("valid url"),
        ])
        .expect("one image")
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            text: text(name),
            slug: None,
            article: None,
            price: Price::new(4990.0).expect("valid price"),
            discount: Discount::default(),
            in_stock: true,
            small_description: None,
            full_description: None,
            subcategory_id: 2,
            brand_id: Some(1),
            images: images(),
            tag_names: Vec::new(),
            characteristic_ids: Vec::new(),
        }
    }

    fn stored(id: i32, product: &NewProduct) -> Product {
        Product {
            id,
            text: product.text.clone(),
            slug: product.slug.clone(),
            article: product.article,
            price: product.price,
            discount: product.discount,
            in_stock: product.in_stock,
            small_description: product.small_description.clone(),
            full_description: product.full_description.clone(),
            subcategory_id: product.subcategory_id,
            brand_id: product.brand_id,
            images: product.images.clone(),
            tags: Vec::new(),
            characteristic_ids: product.characteristic_ids.clone(),
        }
    }

    fn existing(id: i32, name: &str, slug: &str) -> Product {
        stored(
            id,
            &NewProduct {
                text: text(name),
                slug: Slug::parse(slug).expect("valid slug"),
                article: Article::new(260_101_000_000_001).expect("valid article"),
                price: Price::new(100.0).expect("valid price"),
                discount: Discount::default(),
                in_stock: true,
                small_description: None,
                full_description: None,
                subcategory_id: 2,
                brand_id: None,
                images: images(),
                tag_ids: Vec::new(),
                characteristic_ids: Vec::new(),
            },
        )
    }

    fn free_registry() -> MockIdentifierRegistry {
        let mut registry = MockIdentifierRegistry::new();
        registry.expect_slug_taken().returning(|_, _, _| Ok(false));
        registry.expect_article_taken().returning(|_, _| Ok(false));
        registry.expect_tag_value_taken().returning(|_, _| Ok(false));
        registry
    }

    fn service_with(
        repo: MockProductRepository,
        tags: MockTagRepository,
        registry: MockIdentifierRegistry,
    ) -> ProductService<MockProductRepository> {
        let clock = FixtureClock::on(2026, 10, 15);
        let identifiers = IdentifierResolver::new(Arc::new(registry), Arc::new(clock));
        let tag_repo: Arc<dyn TagRepository> = Arc::new(tags);
        let tags = Arc::new(TagService::new(tag_repo, identifiers.clone()));
        ProductService::new(Arc::new(repo), tags, identifiers)
    }

    #[rstest]
    #[tokio::test]
    async fn create_derives_slug_and_dated_article() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|product| {
                product.slug.as_str() == "krossovki-nimbus"
                    && product.article.get() / 1_000_000_000 == 261_015
            })
            .times(1)
            .returning(|product| Ok(stored(1, product)));

        let created = service_with(repo, MockTagRepository::new(), free_registry())
            .create(draft("Кроссовки Nimbus"))
            .await
            .expect("created");
        assert_eq!(created.slug.as_str(), "krossovki-nimbus");
    }

    #[rstest]
    #[tokio::test]
    async fn create_links_tags_by_name() {
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_name().returning(|name| {
            Ok(Some(Tag {
                id: 7,
                name: name.clone(),
                value: TagValue::parse("sale").expect("valid value"),
            }))
        });
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|product| product.tag_ids == vec![7])
            .times(1)
            .returning(|product| Ok(stored(1, product)));

        let mut request = draft("Nimbus");
        request.tag_names = vec![text("Sale")];
        service_with(repo, tags, free_registry())
            .create(request)
            .await
            .expect("created");
    }

    #[rstest]
    #[tokio::test]
    async fn article_collision_on_insert_is_retried_with_new_identifiers() {
        let mut repo = MockProductRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(CatalogRepositoryError::unique_violation(constraints::PRODUCT_ARTICLE)));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|product| Ok(stored(3, product)));

        let created = service_with(repo, MockTagRepository::new(), free_registry())
            .create(draft("Nimbus"))
            .await
            .expect("second attempt succeeds");
        assert_eq!(created.id, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_subcategory_is_invalid_request() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().returning(|_| {
            Err(CatalogRepositoryError::missing_reference(
                constraints::PRODUCT_SUBCATEGORY,
            ))
        });

        let error = service_with(repo, MockTagRepository::new(), free_registry())
            .create(draft("Nimbus"))
            .await
            .expect_err("missing subcategory");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.details().expect("details")["field"], "subcategoryId");
    }

    #[rstest]
    #[tokio::test]
    async fn update_with_taken_article_is_conflict() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(existing(id, "Nimbus", "nimbus"))));
        repo.expect_update().never();
        let mut registry = MockIdentifierRegistry::new();
        registry
            .expect_article_taken()
            .withf(|_, exclude| *exclude == Some(9))
            .returning(|_, _| Ok(true));

        let patch = ProductPatch {
            article: Some(Article::new(261_015_000_000_042).expect("valid article")),
            ..ProductPatch::default()
        };
        let error = service_with(repo, MockTagRepository::new(), registry)
            .update(9, patch)
            .await
            .expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.details().expect("details")["field"], "article");
    }

    #[rstest]
    #[tokio::test]
    async fn price_only_update_keeps_identifiers() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(existing(id, "Nimbus", "nimbus"))));
        repo.expect_update()
            .withf(|_, changes| {
                changes.slug.is_none() && changes.article.is_none() && changes.tag_ids.is_none()
            })
            .times(1)
            .returning(|id, _| Ok(Some(existing(id, "Nimbus", "nimbus"))));

        let patch = ProductPatch {
            price: Some(Price::new(3990.0).expect("valid price")),
            ..ProductPatch::default()
        };
        service_with(repo, MockTagRepository::new(), MockIdentifierRegistry::new())
            .update(9, patch)
            .await
            .expect("updated");
    }

    #[rstest]
    #[case(None, DEFAULT_TAG_PRODUCTS)]
    #[case(Some(5), 5)]
    #[case(Some(500), MAX_TAG_PRODUCTS)]
    #[tokio::test]
    async fn tag_product_limit_is_capped(#[case] requested: Option<i64>, #[case] expected: i64) {
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_id().returning(|id| {
            Ok(Some(Tag {
                id,
                name: text("Sale"),
                value: TagValue::parse("sale").expect("valid value"),
            }))
        });
        let mut repo = MockProductRepository::new();
        repo.expect_list_by_tag()
            .withf(move |tag_id, limit| *tag_id == 7 && *limit == expected)
            .times(1)
            .returning(|_, _| Ok((Vec::new(), 12)));

        let result = service_with(repo, tags, MockIdentifierRegistry::new())
            .products_for_tag_id(7, requested)
            .await
            .expect("listed");
        assert_eq!(result.total, 12);
        assert_eq!(result.tag.id, 7);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_tag_value_is_not_found() {
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_value().returning(|_| Ok(None));

        let error = service_with(MockProductRepository::new(), tags, MockIdentifierRegistry::new())
            .products_for_tag_value(&TagValue::parse("sale").expect("valid value"), None)
            .await
            .expect_err("missing tag");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
