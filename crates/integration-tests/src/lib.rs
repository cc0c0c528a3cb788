//! Integration tests for Shopkeeper.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations to a fresh database
//! cargo run -p shopkeeper-cli -- migrate
//!
//! # Start the server
//! cargo run -p shopkeeper-server
//!
//! # Run integration tests
//! cargo test -p shopkeeper-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they need a running
//! server and database. Each test mints its own owner identity and
//! creates its own store, so tests do not interfere with each other and
//! can run against a shared database.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Header carrying the caller identity, as forwarded by the dashboard proxy.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Base URL for the server API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOPKEEPER_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A fresh owner identity no other test run has used.
#[must_use]
pub fn unique_owner() -> String {
    format!("it-user-{}", Uuid::new_v4())
}

/// A plain client that sends no identity header.
#[must_use]
pub fn anonymous_client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// HTTP client that sends every request as the same owner.
pub struct OwnerClient {
    client: Client,
    base_url: String,
    owner: String,
}

impl OwnerClient {
    /// Create a client for a freshly minted owner identity.
    #[must_use]
    pub fn new() -> Self {
        Self::for_owner(unique_owner())
    }

    /// Create a client that acts as the given owner.
    #[must_use]
    pub fn for_owner(owner: String) -> Self {
        Self {
            client: anonymous_client(),
            base_url: base_url(),
            owner,
        }
    }

    /// The owner identity this client sends.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .header(USER_ID_HEADER, &self.owner)
    }

    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .header(USER_ID_HEADER, &self.owner)
    }

    #[must_use]
    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.client
            .patch(format!("{}{path}", self.base_url))
            .header(USER_ID_HEADER, &self.owner)
    }

    #[must_use]
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client
            .delete(format!("{}{path}", self.base_url))
            .header(USER_ID_HEADER, &self.owner)
    }
}

impl Default for OwnerClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a store via the API and return its id.
pub async fn create_store(client: &OwnerClient, name: &str) -> String {
    let resp = client
        .post("/api/stores")
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create store");
    assert_eq!(resp.status(), StatusCode::OK, "store create should succeed");

    let body: Value = resp.json().await.expect("Failed to parse store");
    id_of(&body)
}

/// Create a billboard in a store and return its id.
pub async fn create_billboard(client: &OwnerClient, store_id: &str, label: &str) -> String {
    let resp = client
        .post(&format!("/api/{store_id}/billboards"))
        .json(&json!({
            "label": label,
            "imageUrl": "https://placehold.co/1200x400"
        }))
        .send()
        .await
        .expect("Failed to create billboard");
    assert_eq!(
        resp.status(),
        StatusCode::OK,
        "billboard create should succeed"
    );

    let body: Value = resp.json().await.expect("Failed to parse billboard");
    id_of(&body)
}

/// Extract the `id` field from a JSON response body.
#[must_use]
pub fn id_of(body: &Value) -> String {
    body.get("id")
        .and_then(Value::as_str)
        .expect("response body should carry an id")
        .to_string()
}
