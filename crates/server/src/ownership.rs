//! Store ownership guard and read-access policy.
//!
//! Mutations all funnel through [`authorize`]: prove the caller owns
//! the store before anything is written. Reads consult a declared
//! per-entity policy instead of ad hoc per-handler checks, so it is
//! visible in one place which collections a storefront may fetch
//! anonymously.

use sqlx::PgPool;

use shopkeeper_core::{StoreId, UserId};

use crate::db::StoreRepository;
use crate::error::AppError;
use crate::models::Store;

/// Who may read an entity collection without owning its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAccess {
    /// Anyone, with or without an identity. Storefronts read these.
    Public,
    /// The store owner only.
    Owner,
}

/// The entities the read policy is declared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Store,
    Billboard,
    Category,
    Colour,
    Size,
    Product,
    Order,
    Overview,
}

impl Entity {
    /// The declared read policy. Catalog data is public so storefronts
    /// can render it; stores, orders and the overview stay private.
    #[must_use]
    pub const fn read_access(self) -> ReadAccess {
        match self {
            Self::Billboard | Self::Category | Self::Colour | Self::Size | Self::Product => {
                ReadAccess::Public
            }
            Self::Store | Self::Order | Self::Overview => ReadAccess::Owner,
        }
    }
}

/// Check that `caller` owns `store_id` and return the store.
///
/// A missing store and a store owned by someone else both come back as
/// Unauthorized, so callers can't probe which store IDs exist.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the store doesn't exist or belongs
/// to someone else.
/// Returns `AppError::Database` if the lookup fails.
pub async fn authorize(
    pool: &PgPool,
    caller: &UserId,
    store_id: StoreId,
) -> Result<Store, AppError> {
    StoreRepository::new(pool)
        .find_for_owner(store_id, caller)
        .await?
        .ok_or(AppError::Forbidden)
}

/// Enforce the read policy for `entity` before a store-scoped read.
///
/// Public entities pass with or without an identity. Owner entities
/// need a resolved identity and the ownership check.
///
/// # Errors
///
/// Returns `AppError::Unauthenticated` if an owner-only collection is
/// read without identity, `AppError::Forbidden` if the caller doesn't
/// own the store, and `AppError::Database` if the lookup fails.
pub async fn authorize_read(
    pool: &PgPool,
    entity: Entity,
    identity: Option<&UserId>,
    store_id: StoreId,
) -> Result<(), AppError> {
    match entity.read_access() {
        ReadAccess::Public => Ok(()),
        ReadAccess::Owner => {
            let caller = identity.ok_or(AppError::Unauthenticated)?;
            authorize(pool, caller, store_id).await?;
            Ok(())
        }
    }
}
