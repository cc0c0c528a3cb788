//! Store management commands.
//!
//! # Usage
//!
//! ```bash
//! shopkeeper stores create -o user_2abc123 -n "Sneaker Outlet"
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPKEEPER_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use secrecy::SecretString;
use thiserror::Error;

use shopkeeper_core::{StoreId, UserId, UserIdError};
use shopkeeper_server::db::{self, RepositoryError, StoreRepository};

/// Errors that can occur during store management.
#[derive(Debug, Error)]
pub enum StoresError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The owner argument is not a usable identity.
    #[error("Invalid owner identity: {0}")]
    InvalidOwner(#[from] UserIdError),

    /// The store name is empty.
    #[error("Store name must not be empty")]
    EmptyName,

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create a new store for an owner.
///
/// # Errors
///
/// Returns an error if the owner identity is invalid, the name is empty,
/// or the insert fails.
pub async fn create(owner: &str, name: &str) -> Result<StoreId, StoresError> {
    dotenvy::dotenv().ok();

    let owner = UserId::parse(owner)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(StoresError::EmptyName);
    }

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let store = StoreRepository::new(&pool).create(&owner, name).await?;

    tracing::info!("Store created successfully!");
    tracing::info!("  ID: {}", store.id);
    tracing::info!("  Name: {}", store.name);
    tracing::info!("  Owner: {}", store.user_id);

    pool.close().await;
    Ok(store.id)
}

/// Resolve the database URL, falling back to the generic `DATABASE_URL`
/// (set by Fly.io postgres attach).
fn database_url() -> Result<SecretString, StoresError> {
    if let Ok(url) = std::env::var("SHOPKEEPER_DATABASE_URL") {
        return Ok(SecretString::from(url));
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(url));
    }
    Err(StoresError::MissingEnvVar("SHOPKEEPER_DATABASE_URL"))
}
