//! Order repository for database operations.
//!
//! Orders are written by the storefront checkout, which lives outside
//! this service. The dashboard only reads them, so this repository is
//! mostly aggregate queries; `create` exists for seeding demo data.

use rust_decimal::Decimal;
use sqlx::PgPool;

use shopkeeper_core::{OrderId, ProductId, StoreId};

use super::RepositoryError;
use crate::models::OrderSummary;

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders of a store, newest first, with product names and
    /// the order total aggregated in.
    ///
    /// Totals use current catalog prices; there is no price snapshot on
    /// the line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r"
            SELECT
                o.id, o.store_id, o.phone, o.address, o.is_paid,
                COALESCE(
                    ARRAY_AGG(p.name ORDER BY p.name) FILTER (WHERE p.name IS NOT NULL),
                    '{}'
                ) AS products,
                COALESCE(SUM(p.price), 0) AS total,
                o.created_at, o.updated_at
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            LEFT JOIN products p ON p.id = oi.product_id
            WHERE o.store_id = $1
            GROUP BY o.id
            ORDER BY o.created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Create an order with its line items, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails,
    /// including when a product ID doesn't reference a product.
    pub async fn create(
        &self,
        store_id: StoreId,
        phone: &str,
        address: &str,
        is_paid: bool,
        product_ids: &[ProductId],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders (store_id, phone, address, is_paid)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(store_id)
        .bind(phone)
        .bind(address)
        .bind(is_paid)
        .fetch_one(&mut *tx)
        .await?;

        for product_id in product_ids {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id)
                VALUES ($1, $2)
                ",
            )
            .bind(order_id)
            .bind(*product_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order_id)
    }

    /// Sum the prices of every product sold in paid orders of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn total_revenue(&self, store_id: StoreId) -> Result<Decimal, RepositoryError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r"
            SELECT COALESCE(SUM(p.price), 0)
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            JOIN products p ON p.id = oi.product_id
            WHERE o.store_id = $1 AND o.is_paid = TRUE
            ",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(total)
    }

    /// Count a store's paid orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_paid(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM orders
            WHERE store_id = $1 AND is_paid = TRUE
            ",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Paid revenue of a store grouped by month of `year`, as 1-based
    /// month numbers. Months without revenue are absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_revenue(
        &self,
        store_id: StoreId,
        year: i32,
    ) -> Result<Vec<(i32, Decimal)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (i32, Decimal)>(
            r"
            SELECT EXTRACT(MONTH FROM o.created_at)::int4 AS month, SUM(p.price) AS total
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            JOIN products p ON p.id = oi.product_id
            WHERE o.store_id = $1
              AND o.is_paid = TRUE
              AND EXTRACT(YEAR FROM o.created_at)::int4 = $2
            GROUP BY month
            ORDER BY month
            ",
        )
        .bind(store_id)
        .bind(year)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
