//! Store model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkeeper_core::{StoreId, UserId};

/// A store: the tenant boundary all catalog entities are scoped to.
///
/// Each store is owned by exactly one user; the ownership guard checks
/// every mutation against `user_id` before anything else is touched.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Display name shown in the dashboard.
    pub name: String,
    /// Owning user, as issued by the authentication provider.
    pub user_id: UserId,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopkeeper_core::StoreId;

    #[test]
    fn test_serializes_camel_case() {
        let store = Store {
            id: StoreId::generate(),
            name: "Demo Store".to_string(),
            user_id: UserId::parse("user_2Nq3bT9kX").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&store).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("user_id").is_none());
    }
}
