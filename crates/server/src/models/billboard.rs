//! Billboard model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkeeper_core::{BillboardId, StoreId};

/// A promotional banner displayed at the top of a storefront page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    /// Headline text rendered over the image.
    pub label: String,
    /// Background image location, uploaded out of band.
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
