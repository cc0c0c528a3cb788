//! Category repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shopkeeper_core::{BillboardId, CategoryId, StoreId};

use super::RepositoryError;
use crate::models::{Billboard, Category, CategoryDetail};

/// Internal row type for the category detail join.
#[derive(Debug, sqlx::FromRow)]
struct CategoryDetailRow {
    id: CategoryId,
    store_id: StoreId,
    billboard_id: BillboardId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    billboard_label: String,
    billboard_image_url: String,
    billboard_created_at: DateTime<Utc>,
    billboard_updated_at: DateTime<Utc>,
}

impl From<CategoryDetailRow> for CategoryDetail {
    fn from(row: CategoryDetailRow) -> Self {
        Self {
            category: Category {
                id: row.id,
                store_id: row.store_id,
                billboard_id: row.billboard_id,
                name: row.name,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            billboard: Billboard {
                id: row.billboard_id,
                store_id: row.store_id,
                label: row.billboard_label,
                image_url: row.billboard_image_url,
                created_at: row.billboard_created_at,
                updated_at: row.billboard_updated_at,
            },
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, store_id, billboard_id, name, created_at, updated_at
            FROM categories
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get a category by ID, with its billboard joined in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_detail(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryDetailRow>(
            r"
            SELECT
                c.id, c.store_id, c.billboard_id, c.name,
                c.created_at, c.updated_at,
                b.label AS billboard_label,
                b.image_url AS billboard_image_url,
                b.created_at AS billboard_created_at,
                b.updated_at AS billboard_updated_at
            FROM categories c
            JOIN billboards b ON b.id = c.billboard_id
            WHERE c.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a category in a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including
    /// when `billboard_id` doesn't reference a billboard.
    pub async fn create(
        &self,
        store_id: StoreId,
        billboard_id: BillboardId,
        name: &str,
    ) -> Result<Category, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            INSERT INTO categories (store_id, billboard_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, billboard_id, name, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(billboard_id)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(category)
    }

    /// Update a category's name and billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist
    /// in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CategoryId,
        store_id: StoreId,
        billboard_id: BillboardId,
        name: &str,
    ) -> Result<Category, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            UPDATE categories
            SET billboard_id = $3, name = $4
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, billboard_id, name, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(store_id)
        .bind(billboard_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(category)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist
    /// in this store.
    /// Returns `RepositoryError::Conflict` while products still point at
    /// it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(
        &self,
        id: CategoryId,
        store_id: StoreId,
    ) -> Result<Category, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            DELETE FROM categories
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, billboard_id, name, created_at, updated_at
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
                    "category is still used by products".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(category)
    }
}
