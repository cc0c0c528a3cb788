//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! # Stores (owner only)
//! GET    /api/stores                             - List the caller's stores
//! POST   /api/stores                             - Create a store
//! GET    /api/stores/{store_id}                  - Store detail
//! PATCH  /api/stores/{store_id}                  - Rename a store
//! DELETE /api/stores/{store_id}                  - Delete a store and its contents
//!
//! # Catalog (reads public, writes owner only)
//! GET    /api/{store_id}/billboards              - List billboards
//! POST   /api/{store_id}/billboards              - Create a billboard
//! GET    /api/{store_id}/billboards/{id}         - Billboard detail
//! PATCH  /api/{store_id}/billboards/{id}         - Update a billboard
//! DELETE /api/{store_id}/billboards/{id}         - Delete a billboard
//!
//! ... and the same five routes for /categories, /colours, /sizes and
//! /products. The product listing additionally accepts ?categoryId=,
//! ?sizeId=, ?colourId= and ?isFeatured= filters.
//!
//! # Orders and overview (owner only)
//! GET    /api/{store_id}/orders                  - List orders with totals
//! GET    /api/{store_id}/overview                - Dashboard summary figures
//! ```
//!
//! The literal `/api/stores` prefix takes priority over the
//! `/api/{store_id}` capture, so a store can never be named into
//! shadowing the store collection.

pub mod billboards;
pub mod categories;
pub mod colours;
pub mod orders;
pub mod overview;
pub mod products;
pub mod sizes;
pub mod stores;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the store-scoped routes router, mounted under
/// `/api/{store_id}`.
pub fn store_scoped_routes() -> Router<AppState> {
    Router::new()
        .nest("/billboards", billboards::router())
        .nest("/categories", categories::router())
        .nest("/colours", colours::router())
        .nest("/sizes", sizes::router())
        .nest("/products", products::router())
        .route("/orders", get(orders::list))
        .route("/overview", get(overview::summary))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/stores", stores::router())
        .nest("/api/{store_id}", store_scoped_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::middleware::USER_ID_HEADER;
    use crate::state::AppState;

    use super::routes;

    const STORE: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    const COLOUR: &str = "9f2c7e55-3b48-4f11-8a30-6f3a0cbb8b01";

    /// State over a lazy pool: no connection is made until a query runs,
    /// so routing, identity and validation outcomes can be asserted
    /// without a database.
    fn test_state() -> AppState {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/shopkeeper_test")
            .expect("lazy pool");
        AppState::new(pool)
    }

    async fn send(
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, String) {
        let app = routes().with_state(test_state());

        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user);
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_mutations_without_identity_are_unauthenticated() {
        // Payload validity doesn't matter: the identity check comes first.
        let cases = [
            ("POST", "/api/stores".to_string()),
            ("POST", format!("/api/{STORE}/colours")),
            ("PATCH", format!("/api/{STORE}/colours/{COLOUR}")),
            ("DELETE", format!("/api/{STORE}/colours/{COLOUR}")),
            ("POST", format!("/api/{STORE}/products")),
        ];
        for (method, uri) in cases {
            let (status, text) = send(
                method,
                &uri,
                None,
                Some(json!({ "name": "Red", "value": "#FF0000" })),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(text, "Unauthenticated", "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_identity_check_wins_over_malformed_path() {
        let (status, text) = send("POST", "/api/not-a-uuid/colours", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(text, "Unauthenticated");
    }

    #[tokio::test]
    async fn test_malformed_store_id_with_identity_is_bad_request() {
        let (status, _) = send(
            "POST",
            "/api/not-a-uuid/colours",
            Some("user_a"),
            Some(json!({ "name": "Red", "value": "#FF0000" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validation_runs_before_ownership() {
        // An invalid payload fails before the ownership lookup, so no
        // database access happens and the field message comes back.
        let (status, text) = send(
            "POST",
            &format!("/api/{STORE}/colours"),
            Some("user_a"),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Name is required");
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let app = routes().with_state(test_state());
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/{STORE}/colours"))
            .header(USER_ID_HEADER, "user_a")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Invalid JSON body");
    }

    #[tokio::test]
    async fn test_product_validation_order_over_http() {
        let (_, text) = send(
            "POST",
            &format!("/api/{STORE}/products"),
            Some("user_a"),
            Some(json!({})),
        )
        .await;
        assert_eq!(text, "Category ID is required");

        let (_, text) = send(
            "POST",
            &format!("/api/{STORE}/products"),
            Some("user_a"),
            Some(json!({ "categoryId": COLOUR })),
        )
        .await;
        assert_eq!(text, "Size ID is required");
    }

    #[tokio::test]
    async fn test_store_create_validates_name() {
        let (status, text) = send("POST", "/api/stores", Some("user_a"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Name is required");
    }

    #[tokio::test]
    async fn test_owner_only_reads_require_identity() {
        for uri in [
            format!("/api/{STORE}/orders"),
            format!("/api/{STORE}/overview"),
            "/api/stores".to_string(),
            format!("/api/stores/{STORE}"),
        ] {
            let (status, text) = send("GET", &uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(text, "Unauthenticated", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = send("GET", "/api", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_product_list_rejects_malformed_filter() {
        let (status, text) = send(
            "GET",
            &format!("/api/{STORE}/products?categoryId=garbage"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Category ID must be a valid ID");
    }
}
