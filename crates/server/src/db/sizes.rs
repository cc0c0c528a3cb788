//! Size repository for database operations.

use sqlx::PgPool;

use shopkeeper_core::{SizeId, StoreId};

use super::RepositoryError;
use crate::models::Size;

/// Repository for size database operations.
pub struct SizeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SizeRepository<'a> {
    /// Create a new size repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all sizes of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let sizes = sqlx::query_as::<_, Size>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM sizes
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sizes)
    }

    /// Get a size by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: SizeId) -> Result<Option<Size>, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM sizes
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(size)
    }

    /// Create a size in a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        name: &str,
        value: &str,
    ) -> Result<Size, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(
            r"
            INSERT INTO sizes (store_id, name, value)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(name)
        .bind(value)
        .fetch_one(self.pool)
        .await?;

        Ok(size)
    }

    /// Update a size's name and value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the size doesn't exist in
    /// this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: SizeId,
        store_id: StoreId,
        name: &str,
        value: &str,
    ) -> Result<Size, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(
            r"
            UPDATE sizes
            SET name = $3, value = $4
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(store_id)
        .bind(name)
        .bind(value)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(size)
    }

    /// Delete a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the size doesn't exist in
    /// this store.
    /// Returns `RepositoryError::Conflict` while products still point at
    /// it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: SizeId, store_id: StoreId) -> Result<Size, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(
            r"
            DELETE FROM sizes
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
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
                return RepositoryError::Conflict("size is still used by products".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(size)
    }
}
