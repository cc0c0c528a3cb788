//! Colour repository for database operations.

use sqlx::PgPool;

use shopkeeper_core::{ColourId, StoreId};

use super::RepositoryError;
use crate::models::Colour;

/// Repository for colour database operations.
pub struct ColourRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ColourRepository<'a> {
    /// Create a new colour repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all colours of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Colour>, RepositoryError> {
        let colours = sqlx::query_as::<_, Colour>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM colours
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(colours)
    }

    /// Get a colour by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ColourId) -> Result<Option<Colour>, RepositoryError> {
        let colour = sqlx::query_as::<_, Colour>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM colours
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(colour)
    }

    /// Create a colour in a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        name: &str,
        value: &str,
    ) -> Result<Colour, RepositoryError> {
        let colour = sqlx::query_as::<_, Colour>(
            r"
            INSERT INTO colours (store_id, name, value)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(name)
        .bind(value)
        .fetch_one(self.pool)
        .await?;

        Ok(colour)
    }

    /// Update a colour's name and value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the colour doesn't exist in
    /// this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ColourId,
        store_id: StoreId,
        name: &str,
        value: &str,
    ) -> Result<Colour, RepositoryError> {
        let colour = sqlx::query_as::<_, Colour>(
            r"
            UPDATE colours
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

        Ok(colour)
    }

    /// Delete a colour.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the colour doesn't exist in
    /// this store.
    /// Returns `RepositoryError::Conflict` while products still point at
    /// it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ColourId, store_id: StoreId) -> Result<Colour, RepositoryError> {
        let colour = sqlx::query_as::<_, Colour>(
            r"
            DELETE FROM colours
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
                return RepositoryError::Conflict("colour is still used by products".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(colour)
    }
}
