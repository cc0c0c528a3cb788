//! Billboard repository for database operations.

use sqlx::PgPool;

use shopkeeper_core::{BillboardId, StoreId};

use super::RepositoryError;
use crate::models::Billboard;

/// Repository for billboard database operations.
pub struct BillboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BillboardRepository<'a> {
    /// Create a new billboard repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all billboards of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<Billboard>, RepositoryError> {
        let billboards = sqlx::query_as::<_, Billboard>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM billboards
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(billboards)
    }

    /// Get a billboard by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(
        &self,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM billboards
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(billboard)
    }

    /// Create a billboard in a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(
            r"
            INSERT INTO billboards (store_id, label, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(label)
        .bind(image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(billboard)
    }

    /// Update a billboard's label and image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the billboard doesn't exist
    /// in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: BillboardId,
        store_id: StoreId,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(
            r"
            UPDATE billboards
            SET label = $3, image_url = $4
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(store_id)
        .bind(label)
        .bind(image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(billboard)
    }

    /// Delete a billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the billboard doesn't exist
    /// in this store.
    /// Returns `RepositoryError::Conflict` while categories still point at
    /// it; the categories must be moved or removed first.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(
        &self,
        id: BillboardId,
        store_id: StoreId,
    ) -> Result<Billboard, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(
            r"
            DELETE FROM billboards
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, label, image_url, created_at, updated_at
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
                    "billboard is still used by categories".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(billboard)
    }
}
