//! Colour model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkeeper_core::{ColourId, StoreId};

/// A colour option products can be tagged with. `value` holds the CSS
/// colour the dashboard swatch renders, typically a hex code.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Colour {
    pub id: ColourId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
