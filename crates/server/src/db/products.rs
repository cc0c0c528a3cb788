//! Product repository for database operations.
//!
//! Products own their image rows. Creates and updates write the product
//! and its full image set in one transaction, so readers never observe a
//! product with a half-replaced gallery.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use shopkeeper_core::{CategoryId, ColourId, ProductId, SizeId, StoreId};

use super::RepositoryError;
use crate::models::{Category, Colour, Image, Product, ProductDetail, Size};

// =============================================================================
// Parameters
// =============================================================================

/// Parameters for creating or replacing a product.
#[derive(Debug)]
pub struct ProductChange<'a> {
    /// Category the product belongs to.
    pub category_id: CategoryId,
    /// Size option.
    pub size_id: SizeId,
    /// Colour option.
    pub colour_id: ColourId,
    /// Display name.
    pub name: &'a str,
    /// Unit price.
    pub price: Decimal,
    /// Whether the product is featured on the landing page.
    pub is_featured: bool,
    /// Whether the product is hidden from the storefront.
    pub is_archived: bool,
    /// Full image set; replaces any existing images.
    pub image_urls: &'a [String],
}

/// Filter for product listings. `None` fields don't constrain the
/// result.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductFilter {
    /// Only products in this category.
    pub category_id: Option<CategoryId>,
    /// Only products with this size.
    pub size_id: Option<SizeId>,
    /// Only products with this colour.
    pub colour_id: Option<ColourId>,
    /// Only featured products.
    pub is_featured: bool,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List storefront-visible products of a store, newest first, with
    /// images and related catalog entities attached.
    ///
    /// Archived products are never returned here; they remain reachable
    /// through [`find_detail`](Self::find_detail) for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a product references
    /// a missing category, size or colour.
    pub async fn list_for_store(
        &self,
        store_id: StoreId,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, store_id, category_id, size_id, colour_id, name, price, \
             is_featured, is_archived, created_at, updated_at \
             FROM products WHERE store_id = ",
        );
        query.push_bind(store_id);

        if let Some(category_id) = filter.category_id {
            query.push(" AND category_id = ");
            query.push_bind(category_id);
        }
        if let Some(size_id) = filter.size_id {
            query.push(" AND size_id = ");
            query.push_bind(size_id);
        }
        if let Some(colour_id) = filter.colour_id {
            query.push(" AND colour_id = ");
            query.push_bind(colour_id);
        }
        if filter.is_featured {
            query.push(" AND is_featured = TRUE");
        }
        query.push(" AND is_archived = FALSE ORDER BY created_at DESC");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        self.assemble(products).await
    }

    /// Get a product by ID, with images and related catalog entities
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if the product references
    /// a missing category, size or colour.
    pub async fn find_detail(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductDetail>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, store_id, category_id, size_id, colour_id, name, price,
                   is_featured, is_archived, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(product) = product else {
            return Ok(None);
        };

        Ok(self.assemble(vec![product]).await?.pop())
    }

    /// Create a product with its images, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails,
    /// including when a referenced category, size or colour doesn't exist.
    pub async fn create(
        &self,
        store_id: StoreId,
        change: ProductChange<'_>,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products
                (store_id, category_id, size_id, colour_id, name, price, is_featured, is_archived)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, store_id, category_id, size_id, colour_id, name, price,
                      is_featured, is_archived, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(change.category_id)
        .bind(change.size_id)
        .bind(change.colour_id)
        .bind(change.name)
        .bind(change.price)
        .bind(change.is_featured)
        .bind(change.is_archived)
        .fetch_one(&mut *tx)
        .await?;

        for url in change.image_urls {
            sqlx::query(
                r"
                INSERT INTO images (product_id, url)
                VALUES ($1, $2)
                ",
            )
            .bind(product.id)
            .bind(url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(product)
    }

    /// Replace a product's fields and its whole image set, atomically.
    ///
    /// The transaction rolls back if any step fails, so the old image set
    /// survives a failed update intact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist
    /// in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        store_id: StoreId,
        change: ProductChange<'_>,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET category_id = $3, size_id = $4, colour_id = $5, name = $6,
                price = $7, is_featured = $8, is_archived = $9
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, category_id, size_id, colour_id, name, price,
                      is_featured, is_archived, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(store_id)
        .bind(change.category_id)
        .bind(change.size_id)
        .bind(change.colour_id)
        .bind(change.name)
        .bind(change.price)
        .bind(change.is_featured)
        .bind(change.is_archived)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query(
            r"
            DELETE FROM images
            WHERE product_id = $1
            ",
        )
        .bind(product.id)
        .execute(&mut *tx)
        .await?;

        for url in change.image_urls {
            sqlx::query(
                r"
                INSERT INTO images (product_id, url)
                VALUES ($1, $2)
                ",
            )
            .bind(product.id)
            .bind(url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(product)
    }

    /// Delete a product. Its images go with it via cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist
    /// in this store.
    /// Returns `RepositoryError::Conflict` while order items still point
    /// at it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(
        &self,
        id: ProductId,
        store_id: StoreId,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            DELETE FROM products
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, category_id, size_id, colour_id, name, price,
                      is_featured, is_archived, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(store_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict(
                    "product is still referenced by orders".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(product)
    }

    /// Count a store's products that aren't archived.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_in_stock(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM products
            WHERE store_id = $1 AND is_archived = FALSE
            ",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Attach images, categories, sizes and colours to a page of
    /// products, batching one query per relation.
    async fn assemble(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<Uuid> = products.iter().map(|p| p.id.as_uuid()).collect();
        let category_ids: Vec<Uuid> = products.iter().map(|p| p.category_id.as_uuid()).collect();
        let size_ids: Vec<Uuid> = products.iter().map(|p| p.size_id.as_uuid()).collect();
        let colour_ids: Vec<Uuid> = products.iter().map(|p| p.colour_id.as_uuid()).collect();

        let images = sqlx::query_as::<_, Image>(
            r"
            SELECT id, product_id, url, created_at, updated_at
            FROM images
            WHERE product_id = ANY($1)
            ORDER BY created_at ASC
            ",
        )
        .bind(product_ids)
        .fetch_all(self.pool)
        .await?;

        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, store_id, billboard_id, name, created_at, updated_at
            FROM categories
            WHERE id = ANY($1)
            ",
        )
        .bind(category_ids)
        .fetch_all(self.pool)
        .await?;

        let sizes = sqlx::query_as::<_, Size>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM sizes
            WHERE id = ANY($1)
            ",
        )
        .bind(size_ids)
        .fetch_all(self.pool)
        .await?;

        let colours = sqlx::query_as::<_, Colour>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM colours
            WHERE id = ANY($1)
            ",
        )
        .bind(colour_ids)
        .fetch_all(self.pool)
        .await?;

        let mut images_by_product: HashMap<ProductId, Vec<Image>> = HashMap::new();
        for image in images {
            images_by_product
                .entry(image.product_id)
                .or_default()
                .push(image);
        }
        let categories_by_id: HashMap<CategoryId, Category> =
            categories.into_iter().map(|c| (c.id, c)).collect();
        let sizes_by_id: HashMap<SizeId, Size> = sizes.into_iter().map(|s| (s.id, s)).collect();
        let colours_by_id: HashMap<ColourId, Colour> =
            colours.into_iter().map(|c| (c.id, c)).collect();

        products
            .into_iter()
            .map(|product| {
                let images = images_by_product.remove(&product.id).unwrap_or_default();
                let category =
                    categories_by_id
                        .get(&product.category_id)
                        .cloned()
                        .ok_or_else(|| {
                            RepositoryError::DataCorruption(format!(
                                "product {} references missing category {}",
                                product.id, product.category_id
                            ))
                        })?;
                let size = sizes_by_id.get(&product.size_id).cloned().ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "product {} references missing size {}",
                        product.id, product.size_id
                    ))
                })?;
                let colour = colours_by_id
                    .get(&product.colour_id)
                    .cloned()
                    .ok_or_else(|| {
                        RepositoryError::DataCorruption(format!(
                            "product {} references missing colour {}",
                            product.id, product.colour_id
                        ))
                    })?;

                Ok(ProductDetail {
                    product,
                    images,
                    category,
                    size,
                    colour,
                })
            })
            .collect()
    }
}
