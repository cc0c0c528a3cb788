//! Database operations for the shopkeeper `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `stores` - Tenant roots, one owner per store
//! - `billboards` - Promotional banners
//! - `categories` - Product categories, each linked to a billboard
//! - `colours` - Colour options
//! - `sizes` - Size options
//! - `products` - Catalog products
//! - `images` - Product images, replaced wholesale on product update
//! - `orders` / `order_items` - Checkout records written by the storefront
//!
//! All queries are store-scoped: child rows are only ever updated or
//! deleted with their `store_id` in the `WHERE` clause, so a verified
//! owner check on the store covers the whole subtree.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shopkeeper-cli -- migrate
//! ```

pub mod billboards;
pub mod categories;
pub mod colours;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use billboards::BillboardRepository;
pub use categories::CategoryRepository;
pub use colours::ColourRepository;
pub use orders::OrderRepository;
pub use products::{ProductChange, ProductFilter, ProductRepository};
pub use sizes::SizeRepository;
pub use stores::StoreRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., a row still referenced elsewhere).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
