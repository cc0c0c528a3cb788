//! Order summary model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopkeeper_core::{OrderId, StoreId};

/// One row of the dashboard order table: the order plus the names of
/// the products in it and the total price, aggregated in SQL.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub store_id: StoreId,
    pub phone: String,
    pub address: String,
    pub is_paid: bool,
    /// Product names joined from the order's line items.
    pub products: Vec<String>,
    /// Sum of the line item prices at current catalog prices.
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
