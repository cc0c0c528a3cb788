//! Size route handlers.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shopkeeper_core::{SizeId, StoreId};

use crate::{
    db::SizeRepository,
    error::Result,
    middleware::{OptionalAuth, RequireAuth},
    models::Size,
    ownership::{self, Entity},
    state::AppState,
    validate,
};

/// Build the size routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{size_id}", get(detail).patch(update).delete(remove))
}

/// List a store's sizes.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Size>>> {
    ownership::authorize_read(state.pool(), Entity::Size, identity.as_ref(), store_id).await?;

    let sizes = SizeRepository::new(state.pool())
        .list_for_store(store_id)
        .await?;

    Ok(Json(sizes))
}

/// Get a size by ID. Answers JSON `null` when it doesn't exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
) -> Result<Json<Option<Size>>> {
    ownership::authorize_read(state.pool(), Entity::Size, identity.as_ref(), store_id).await?;

    let size = SizeRepository::new(state.pool())
        .find_by_id(size_id)
        .await?;

    Ok(Json(size))
}

/// Create a size.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the insert fails.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(store_id): Path<StoreId>,
    body: Bytes,
) -> Result<Json<Size>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::size(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let size = SizeRepository::new(state.pool())
        .create(store_id, &input.name, &input.value)
        .await?;

    Ok(Json(size))
}

/// Update a size.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the update fails.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
    body: Bytes,
) -> Result<Json<Size>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::size(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let size = SizeRepository::new(state.pool())
        .update(size_id, store_id, &input.name, &input.value)
        .await?;

    Ok(Json(size))
}

/// Delete a size.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the store isn't
/// owned by the caller, or the delete fails. Deleting a size a product
/// still uses surfaces as an internal error.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
) -> Result<Json<Size>> {
    ownership::authorize(state.pool(), &caller, store_id).await?;

    let size = SizeRepository::new(state.pool())
        .delete(size_id, store_id)
        .await?;

    Ok(Json(size))
}
