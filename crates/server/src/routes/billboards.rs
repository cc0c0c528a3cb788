//! Billboard route handlers.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shopkeeper_core::{BillboardId, StoreId};

use crate::{
    db::BillboardRepository,
    error::Result,
    middleware::{OptionalAuth, RequireAuth},
    models::Billboard,
    ownership::{self, Entity},
    state::AppState,
    validate,
};

/// Build the billboard routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{billboard_id}", get(detail).patch(update).delete(remove))
}

/// List a store's billboards.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Billboard>>> {
    ownership::authorize_read(state.pool(), Entity::Billboard, identity.as_ref(), store_id).await?;

    let billboards = BillboardRepository::new(state.pool())
        .list_for_store(store_id)
        .await?;

    Ok(Json(billboards))
}

/// Get a billboard by ID. Answers JSON `null` when it doesn't exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
) -> Result<Json<Option<Billboard>>> {
    ownership::authorize_read(state.pool(), Entity::Billboard, identity.as_ref(), store_id).await?;

    let billboard = BillboardRepository::new(state.pool())
        .find_by_id(billboard_id)
        .await?;

    Ok(Json(billboard))
}

/// Create a billboard.
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
) -> Result<Json<Billboard>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::billboard(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let billboard = BillboardRepository::new(state.pool())
        .create(store_id, &input.label, &input.image_url)
        .await?;

    Ok(Json(billboard))
}

/// Update a billboard.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the update fails.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
    body: Bytes,
) -> Result<Json<Billboard>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::billboard(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let billboard = BillboardRepository::new(state.pool())
        .update(billboard_id, store_id, &input.label, &input.image_url)
        .await?;

    Ok(Json(billboard))
}

/// Delete a billboard.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the store isn't
/// owned by the caller, or the delete fails. Deleting a billboard a
/// category still uses surfaces as an internal error.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
) -> Result<Json<Billboard>> {
    ownership::authorize(state.pool(), &caller, store_id).await?;

    let billboard = BillboardRepository::new(state.pool())
        .delete(billboard_id, store_id)
        .await?;

    Ok(Json(billboard))
}
