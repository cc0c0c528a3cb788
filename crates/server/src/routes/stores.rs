//! Store route handlers.
//!
//! Stores are owner-only in both directions: every route resolves the
//! caller identity, and detail routes answer Unauthorized for foreign
//! and missing stores alike rather than revealing which IDs exist.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shopkeeper_core::StoreId;

use crate::{
    db::StoreRepository,
    error::Result,
    middleware::RequireAuth,
    models::Store,
    ownership,
    state::AppState,
    validate,
};

/// Build the store routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{store_id}", get(detail).patch(update).delete(remove))
}

/// List the caller's stores.
///
/// # Errors
///
/// Returns an error if the caller has no identity or the query fails.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<Vec<Store>>> {
    let stores = StoreRepository::new(state.pool())
        .list_for_owner(&caller)
        .await?;

    Ok(Json(stores))
}

/// Create a store owned by the caller.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, or the insert fails.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    body: Bytes,
) -> Result<Json<Store>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::store(&payload)?;

    let store = StoreRepository::new(state.pool())
        .create(&caller, &input.name)
        .await?;

    Ok(Json(store))
}

/// Get one of the caller's stores.
///
/// # Errors
///
/// Returns an error if the caller has no identity or doesn't own the
/// store.
pub async fn detail(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Store>> {
    let store = ownership::authorize(state.pool(), &caller, store_id).await?;

    Ok(Json(store))
}

/// Rename one of the caller's stores.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the update fails.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(store_id): Path<StoreId>,
    body: Bytes,
) -> Result<Json<Store>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::store(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let store = StoreRepository::new(state.pool())
        .rename(store_id, &caller, &input.name)
        .await?;

    Ok(Json(store))
}

/// Delete one of the caller's stores. Billboards, categories, colours,
/// sizes, products and orders in it go too.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the store isn't
/// owned by the caller, or the delete fails.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Store>> {
    ownership::authorize(state.pool(), &caller, store_id).await?;

    let store = StoreRepository::new(state.pool())
        .delete(store_id, &caller)
        .await?;

    Ok(Json(store))
}
