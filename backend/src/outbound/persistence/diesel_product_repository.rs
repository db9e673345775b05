//! PostgreSQL-backed `ProductRepository`.
//!
//! A product row is stored together with its ordered images, tag links and
//! characteristic links. Writes touch all of them inside one transaction;
//! reads hydrate a page of products with three batched queries.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::catalog::{
    Discount, DisplayText, ImageUrl, ListWindow, NewProduct, Price, Product, ProductChanges,
    ProductImages, ProductsByBrand, Tag,
};
use crate::domain::identifiers::{Article, Slug};
use crate::domain::ports::{CatalogRepositoryError, ProductRepository};

use super::diesel_error_mapping::{invalid_row, map_delete_error, map_diesel_error, map_pool_error};
use super::diesel_tag_repository::row_to_tag;
use super::models::{
    NewProductRow, ProductChangeset, ProductCharacteristicRow, ProductImageRow, ProductRow,
    ProductTagRow, TagRow,
};
use super::pool::DbPool;
use super::schema::{product_characteristics, product_images, product_tags, products, tags};

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Product rows with every link row needed to build domain products.
struct ProductParts {
    rows: Vec<ProductRow>,
    images: Vec<ProductImageRow>,
    tags: Vec<(i32, TagRow)>,
    characteristics: Vec<ProductCharacteristicRow>,
}

async fn load_parts(
    conn: &mut AsyncPgConnection,
    rows: Vec<ProductRow>,
) -> Result<ProductParts, DieselError> {
    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    if ids.is_empty() {
        return Ok(ProductParts {
            rows,
            images: Vec::new(),
            tags: Vec::new(),
            characteristics: Vec::new(),
        });
    }
    let images = product_images::table
        .filter(product_images::product_id.eq_any(&ids))
        .select(ProductImageRow::as_select())
        .order_by((product_images::product_id, product_images::position))
        .load(conn)
        .await?;
    let tags = product_tags::table
        .inner_join(tags::table)
        .filter(product_tags::product_id.eq_any(&ids))
        .select((product_tags::product_id, TagRow::as_select()))
        .order_by((product_tags::product_id, tags::id))
        .load(conn)
        .await?;
    let characteristics = product_characteristics::table
        .filter(product_characteristics::product_id.eq_any(&ids))
        .select(ProductCharacteristicRow::as_select())
        .order_by((
            product_characteristics::product_id,
            product_characteristics::characteristic_id,
        ))
        .load(conn)
        .await?;
    Ok(ProductParts {
        rows,
        images,
        tags,
        characteristics,
    })
}

fn invalid_product(err: impl std::fmt::Display) -> CatalogRepositoryError {
    invalid_row("product", err)
}

fn assemble(parts: ProductParts) -> Result<Vec<Product>, CatalogRepositoryError> {
    let mut images: HashMap<i32, Vec<ImageUrl>> = HashMap::new();
    for image in parts.images {
        let url = ImageUrl::parse(&image.url).map_err(invalid_product)?;
        images.entry(image.product_id).or_default().push(url);
    }
    let mut tags: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (product_id, row) in parts.tags {
        tags.entry(product_id).or_default().push(row_to_tag(row)?);
    }
    let mut characteristics: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in parts.characteristics {
        characteristics
            .entry(link.product_id)
            .or_default()
            .push(link.characteristic_id);
    }

    parts
        .rows
        .into_iter()
        .map(|row| {
            Ok(Product {
                id: row.id,
                text: DisplayText::new(&row.text).map_err(invalid_product)?,
                slug: Slug::parse(&row.slug).map_err(invalid_product)?,
                article: Article::new(row.article).map_err(invalid_product)?,
                price: Price::new(row.price).map_err(invalid_product)?,
                discount: Discount::new(row.discount).map_err(invalid_product)?,
                in_stock: row.in_stock,
                small_description: row.small_description,
                full_description: row.full_description,
                subcategory_id: row.subcategory_id,
                brand_id: row.brand_id,
                images: ProductImages::new(images.remove(&row.id).unwrap_or_default())
                    .map_err(invalid_product)?,
                tags: tags.remove(&row.id).unwrap_or_default(),
                characteristic_ids: characteristics.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}

fn first_product(parts: ProductParts) -> Result<Option<Product>, CatalogRepositoryError> {
    Ok(assemble(parts)?.into_iter().next())
}

async fn replace_images(
    conn: &mut AsyncPgConnection,
    product_id: i32,
    images: &ProductImages,
) -> Result<(), DieselError> {
    diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
        .execute(conn)
        .await?;
    let rows: Vec<ProductImageRow> = images
        .as_slice()
        .iter()
        .zip(0_i16..)
        .map(|(url, position)| ProductImageRow {
            product_id,
            position,
            url: url.as_str().to_owned(),
        })
        .collect();
    diesel::insert_into(product_images::table)
        .values(&rows)
        .execute(conn)
        .await?;
    Ok(())
}

async fn replace_tags(
    conn: &mut AsyncPgConnection,
    product_id: i32,
    tag_ids: &[i32],
) -> Result<(), DieselError> {
    diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
        .execute(conn)
        .await?;
    if tag_ids.is_empty() {
        return Ok(());
    }
    let rows: Vec<ProductTagRow> = tag_ids
        .iter()
        .map(|&tag_id| ProductTagRow { product_id, tag_id })
        .collect();
    diesel::insert_into(product_tags::table)
        .values(&rows)
        .execute(conn)
        .await?;
    Ok(())
}

async fn replace_characteristics(
    conn: &mut AsyncPgConnection,
    product_id: i32,
    characteristic_ids: &[i32],
) -> Result<(), DieselError> {
    diesel::delete(
        product_characteristics::table
            .filter(product_characteristics::product_id.eq(product_id)),
    )
    .execute(conn)
    .await?;
    if characteristic_ids.is_empty() {
        return Ok(());
    }
    let rows: Vec<ProductCharacteristicRow> = characteristic_ids
        .iter()
        .map(|&characteristic_id| ProductCharacteristicRow {
            product_id,
            characteristic_id,
        })
        .collect();
    diesel::insert_into(product_characteristics::table)
        .values(&rows)
        .execute(conn)
        .await?;
    Ok(())
}

/// Unique key a single product is looked up by.
enum ProductKey<'a> {
    Id(i32),
    Slug(&'a str),
    Article(i64),
}

impl DieselProductRepository {
    async fn find_one(&self, key: ProductKey<'_>) -> Result<Option<Product>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = products::table.select(ProductRow::as_select()).into_boxed();
        let query = match key {
            ProductKey::Id(id) => query.filter(products::id.eq(id)),
            ProductKey::Slug(slug) => query.filter(products::slug.eq(slug)),
            ProductKey::Article(article) => query.filter(products::article.eq(article)),
        };
        let rows: Vec<ProductRow> = query
            .limit(1)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let parts = load_parts(&mut conn, rows)
            .await
            .map_err(map_diesel_error)?;
        first_product(parts)
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(&self, window: ListWindow) -> Result<Vec<Product>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .select(ProductRow::as_select())
            .order_by(products::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let parts = load_parts(&mut conn, rows)
            .await
            .map_err(map_diesel_error)?;
        assemble(parts)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, CatalogRepositoryError> {
        self.find_one(ProductKey::Id(id)).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Product>, CatalogRepositoryError> {
        self.find_one(ProductKey::Slug(slug.as_str())).await
    }

    async fn find_by_article(
        &self,
        article: Article,
    ) -> Result<Option<Product>, CatalogRepositoryError> {
        self.find_one(ProductKey::Article(article.get())).await
    }

    async fn list_by_brand(
        &self,
        brand_id: i32,
        window: ListWindow,
    ) -> Result<ProductsByBrand, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = products::table
            .filter(products::brand_id.eq(brand_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<ProductRow> = products::table
            .filter(products::brand_id.eq(brand_id))
            .select(ProductRow::as_select())
            .order_by(products::id)
            .offset(window.offset())
            .limit(window.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let parts = load_parts(&mut conn, rows)
            .await
            .map_err(map_diesel_error)?;
        Ok(ProductsByBrand {
            products: assemble(parts)?,
            total,
        })
    }

    async fn list_by_tag(
        &self,
        tag_id: i32,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = product_tags::table
            .filter(product_tags::tag_id.eq(tag_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<ProductRow> = products::table
            .inner_join(product_tags::table)
            .filter(product_tags::tag_id.eq(tag_id))
            .select(ProductRow::as_select())
            .order_by(products::id)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let parts = load_parts(&mut conn, rows)
            .await
            .map_err(map_diesel_error)?;
        Ok((assemble(parts)?, total))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProductRow {
            text: product.text.as_str(),
            slug: product.slug.as_str(),
            article: product.article.get(),
            price: product.price.get(),
            discount: product.discount.get(),
            in_stock: product.in_stock,
            small_description: product.small_description.as_deref(),
            full_description: product.full_description.as_deref(),
            subcategory_id: product.subcategory_id,
            brand_id: product.brand_id,
        };
        let parts = conn
            .transaction(|conn| {
                async move {
                    let stored: ProductRow = diesel::insert_into(products::table)
                        .values(&row)
                        .returning(ProductRow::as_returning())
                        .get_result(conn)
                        .await?;
                    replace_images(conn, stored.id, &product.images).await?;
                    replace_tags(conn, stored.id, &product.tag_ids).await?;
                    replace_characteristics(conn, stored.id, &product.characteristic_ids)
                        .await?;
                    load_parts(conn, vec![stored]).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        first_product(parts)?
            .ok_or_else(|| CatalogRepositoryError::query("inserted product was not returned"))
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let columns = ProductChangeset {
            text: changes.text.as_ref().map(DisplayText::as_str),
            slug: changes.slug.as_ref().map(Slug::as_str),
            article: changes.article.map(Article::get),
            price: changes.price.map(Price::get),
            discount: changes.discount.map(Discount::get),
            in_stock: changes.in_stock,
            small_description: changes.small_description.as_deref(),
            full_description: changes.full_description.as_deref(),
            subcategory_id: changes.subcategory_id,
            brand_id: changes.brand_id,
        };
        let parts = conn
            .transaction(|conn| {
                async move {
                    let row: Option<ProductRow> = if columns.is_empty() {
                        products::table
                            .find(id)
                            .select(ProductRow::as_select())
                            .first(conn)
                            .await
                            .optional()?
                    } else {
                        diesel::update(products::table.find(id))
                            .set(&columns)
                            .returning(ProductRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?
                    };
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    if let Some(images) = &changes.images {
                        replace_images(conn, id, images).await?;
                    }
                    if let Some(tag_ids) = &changes.tag_ids {
                        replace_tags(conn, id, tag_ids).await?;
                    }
                    if let Some(characteristic_ids) = &changes.characteristic_ids {
                        replace_characteristics(conn, id, characteristic_ids).await?;
                    }
                    load_parts(conn, vec![row]).await.map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        match parts {
            Some(parts) => first_product(parts),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(products::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
