//! Order route handlers.
//!
//! Orders are written by the storefront checkout; the dashboard only
//! reads them, so there is just the one listing route.

use axum::{
    Json,
    extract::{Path, State},
};

use shopkeeper_core::StoreId;

use crate::{
    db::OrderRepository,
    error::Result,
    middleware::OptionalAuth,
    models::OrderSummary,
    ownership::{self, Entity},
    state::AppState,
};

/// List a store's orders, newest first, with product names and totals
/// aggregated in. Owner only.
///
/// # Errors
///
/// Returns an error if the caller has no identity, doesn't own the
/// store, or the query fails.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<OrderSummary>>> {
    ownership::authorize_read(state.pool(), Entity::Order, identity.as_ref(), store_id).await?;

    let orders = OrderRepository::new(state.pool())
        .list_for_store(store_id)
        .await?;

    Ok(Json(orders))
}
