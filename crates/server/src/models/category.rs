//! Category model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkeeper_core::{BillboardId, CategoryId, StoreId};

use super::Billboard;

/// A product category, linked to the billboard shown on its landing page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category with its billboard joined in, as served by the detail
/// endpoint so storefront pages can render both in one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub billboard: Billboard,
}
