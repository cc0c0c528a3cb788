//! Colour route handlers.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shopkeeper_core::{ColourId, StoreId};

use crate::{
    db::ColourRepository,
    error::Result,
    middleware::{OptionalAuth, RequireAuth},
    models::Colour,
    ownership::{self, Entity},
    state::AppState,
    validate,
};

/// Build the colour routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{colour_id}", get(detail).patch(update).delete(remove))
}

/// List a store's colours.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Colour>>> {
    ownership::authorize_read(state.pool(), Entity::Colour, identity.as_ref(), store_id).await?;

    let colours = ColourRepository::new(state.pool())
        .list_for_store(store_id)
        .await?;

    Ok(Json(colours))
}

/// Get a colour by ID. Answers JSON `null` when it doesn't exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path((store_id, colour_id)): Path<(StoreId, ColourId)>,
) -> Result<Json<Option<Colour>>> {
    ownership::authorize_read(state.pool(), Entity::Colour, identity.as_ref(), store_id).await?;

    let colour = ColourRepository::new(state.pool())
        .find_by_id(colour_id)
        .await?;

    Ok(Json(colour))
}

/// Create a colour.
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
) -> Result<Json<Colour>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::colour(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let colour = ColourRepository::new(state.pool())
        .create(store_id, &input.name, &input.value)
        .await?;

    Ok(Json(colour))
}

/// Update a colour.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the update fails.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, colour_id)): Path<(StoreId, ColourId)>,
    body: Bytes,
) -> Result<Json<Colour>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::colour(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let colour = ColourRepository::new(state.pool())
        .update(colour_id, store_id, &input.name, &input.value)
        .await?;

    Ok(Json(colour))
}

/// Delete a colour.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the store isn't
/// owned by the caller, or the delete fails. Deleting a colour a
/// product still uses surfaces as an internal error.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, colour_id)): Path<(StoreId, ColourId)>,
) -> Result<Json<Colour>> {
    ownership::authorize(state.pool(), &caller, store_id).await?;

    let colour = ColourRepository::new(state.pool())
        .delete(colour_id, store_id)
        .await?;

    Ok(Json(colour))
}
