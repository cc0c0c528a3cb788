//! Store repository for database operations.
//!
//! Stores are the tenant boundary. Every query here is scoped by
//! `user_id` so a store can only ever be read or changed by its owner.

use sqlx::PgPool;

use shopkeeper_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::Store;

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a store owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: &UserId, name: &str) -> Result<Store, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(
            r"
            INSERT INTO stores (user_id, name)
            VALUES ($1, $2)
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(store)
    }

    /// List all stores owned by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_owner(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        let stores = sqlx::query_as::<_, Store>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM stores
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(stores)
    }

    /// Get a store by ID, but only if `user_id` owns it.
    ///
    /// Returns `None` both for a missing store and for a store owned by
    /// someone else, so callers cannot probe for other tenants' stores.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_for_owner(
        &self,
        id: StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM stores
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Rename a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist or
    /// isn't owned by `user_id`.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn rename(
        &self,
        id: StoreId,
        user_id: &UserId,
        name: &str,
    ) -> Result<Store, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(
            r"
            UPDATE stores
            SET name = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(store)
    }

    /// Delete a store and, via cascade, everything in it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist or
    /// isn't owned by `user_id`.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: StoreId, user_id: &UserId) -> Result<Store, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(
            r"
            DELETE FROM stores
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(store)
    }
}
