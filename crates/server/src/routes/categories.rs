//! Category route handlers.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use shopkeeper_core::{CategoryId, StoreId};

use crate::{
    db::CategoryRepository,
    error::Result,
    middleware::{OptionalAuth, RequireAuth},
    models::{Category, CategoryDetail},
    ownership::{self, Entity},
    state::AppState,
    validate,
};

/// Build the category routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{category_id}", get(detail).patch(update).delete(remove))
}

/// List a store's categories.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Category>>> {
    ownership::authorize_read(state.pool(), Entity::Category, identity.as_ref(), store_id).await?;

    let categories = CategoryRepository::new(state.pool())
        .list_for_store(store_id)
        .await?;

    Ok(Json(categories))
}

/// Get a category by ID with its billboard joined in. Answers JSON
/// `null` when it doesn't exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
) -> Result<Json<Option<CategoryDetail>>> {
    ownership::authorize_read(state.pool(), Entity::Category, identity.as_ref(), store_id).await?;

    let category = CategoryRepository::new(state.pool())
        .find_detail(category_id)
        .await?;

    Ok(Json(category))
}

/// Create a category.
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
) -> Result<Json<Category>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::category(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let category = CategoryRepository::new(state.pool())
        .create(store_id, input.billboard_id, &input.name)
        .await?;

    Ok(Json(category))
}

/// Update a category.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the update fails.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
    body: Bytes,
) -> Result<Json<Category>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::category(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let category = CategoryRepository::new(state.pool())
        .update(category_id, store_id, input.billboard_id, &input.name)
        .await?;

    Ok(Json(category))
}

/// Delete a category.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the store isn't
/// owned by the caller, or the delete fails. Deleting a category a
/// product still uses surfaces as an internal error.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
) -> Result<Json<Category>> {
    ownership::authorize(state.pool(), &caller, store_id).await?;

    let category = CategoryRepository::new(state.pool())
        .delete(category_id, store_id)
        .await?;

    Ok(Json(category))
}
