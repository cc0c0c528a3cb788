//! Dashboard overview route handler.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{Datelike, Utc};

use shopkeeper_core::StoreId;

use crate::{
    db::{OrderRepository, ProductRepository},
    error::Result,
    middleware::OptionalAuth,
    models::{OverviewSummary, overview::graph_from_monthly_totals},
    ownership::{self, Entity},
    state::AppState,
};

/// The numbers behind the dashboard landing page: paid revenue, paid
/// order count, in-stock product count, and revenue per month of the
/// current year. Owner only.
///
/// # Errors
///
/// Returns an error if the caller has no identity, doesn't own the
/// store, or a query fails.
pub async fn summary(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path(store_id): Path<StoreId>,
) -> Result<Json<OverviewSummary>> {
    ownership::authorize_read(state.pool(), Entity::Overview, identity.as_ref(), store_id).await?;

    let orders = OrderRepository::new(state.pool());
    let products = ProductRepository::new(state.pool());

    let total_revenue = orders.total_revenue(store_id).await?;
    let total_orders = orders.count_paid(store_id).await?;
    let products_in_stock = products.count_in_stock(store_id).await?;
    let monthly = orders.monthly_revenue(store_id, Utc::now().year()).await?;

    Ok(Json(OverviewSummary {
        total_revenue,
        total_orders,
        products_in_stock,
        graph_revenue: graph_from_monthly_totals(&monthly),
    }))
}
