//! Integration tests for products, their image galleries, and list filters.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p shopkeeper-server)
//!
//! Run with: cargo test -p shopkeeper-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use shopkeeper_integration_tests::{OwnerClient, create_billboard, create_store, id_of};

/// Create a category under a billboard and return its id.
async fn create_category(
    client: &OwnerClient,
    store_id: &str,
    billboard_id: &str,
    name: &str,
) -> String {
    let resp = client
        .post(&format!("/api/{store_id}/categories"))
        .json(&json!({ "billboardId": billboard_id, "name": name }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(resp.status(), StatusCode::OK);
    id_of(&resp.json::<Value>().await.expect("Failed to parse category"))
}

/// Create a size option and return its id.
async fn create_size(client: &OwnerClient, store_id: &str) -> String {
    let resp = client
        .post(&format!("/api/{store_id}/sizes"))
        .json(&json!({ "name": "Medium", "value": "M" }))
        .send()
        .await
        .expect("Failed to create size");
    assert_eq!(resp.status(), StatusCode::OK);
    id_of(&resp.json::<Value>().await.expect("Failed to parse size"))
}

/// Create a colour option and return its id.
async fn create_colour(client: &OwnerClient, store_id: &str) -> String {
    let resp = client
        .post(&format!("/api/{store_id}/colours"))
        .json(&json!({ "name": "Navy", "value": "#001F54" }))
        .send()
        .await
        .expect("Failed to create colour");
    assert_eq!(resp.status(), StatusCode::OK);
    id_of(&resp.json::<Value>().await.expect("Failed to parse colour"))
}

/// A store with one billboard, category, size, and colour.
struct Catalog {
    store_id: String,
    category_id: String,
    size_id: String,
    colour_id: String,
}

async fn seed_catalog(client: &OwnerClient, store_name: &str) -> Catalog {
    let store_id = create_store(client, store_name).await;
    let billboard_id = create_billboard(client, &store_id, "Main Billboard").await;
    let category_id = create_category(client, &store_id, &billboard_id, "Apparel").await;
    let size_id = create_size(client, &store_id).await;
    let colour_id = create_colour(client, &store_id).await;
    Catalog {
        store_id,
        category_id,
        size_id,
        colour_id,
    }
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_product_crud_with_image_gallery() {
    let client = OwnerClient::new();
    let catalog = seed_catalog(&client, "Product Store").await;
    let store_id = &catalog.store_id;

    // Create with two images
    let resp = client
        .post(&format!("/api/{store_id}/products"))
        .json(&json!({
            "categoryId": catalog.category_id,
            "sizeId": catalog.size_id,
            "colourId": catalog.colour_id,
            "name": "Harbour Jacket",
            "price": 79.99,
            "isFeatured": true,
            "isArchived": false,
            "images": [
                { "url": "https://placehold.co/600x600?text=Front" },
                { "url": "https://placehold.co/600x600?text=Back" }
            ]
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::OK);

    let product: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(product.get("name"), Some(&json!("Harbour Jacket")));
    assert_eq!(product.get("price"), Some(&json!("79.99")));
    assert_eq!(product.get("isFeatured"), Some(&json!(true)));
    let product_id = id_of(&product);

    // Detail embeds the gallery and catalog relations
    let resp = client
        .get(&format!("/api/{store_id}/products/{product_id}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: Value = resp.json().await.expect("Failed to parse product detail");

    let images = detail
        .get("images")
        .and_then(Value::as_array)
        .expect("detail should carry images");
    assert_eq!(images.len(), 2);
    assert_eq!(
        detail.pointer("/category/name"),
        Some(&json!("Apparel")),
        "detail should embed the category"
    );
    assert_eq!(detail.pointer("/size/value"), Some(&json!("M")));
    assert_eq!(detail.pointer("/colour/value"), Some(&json!("#001F54")));

    // Update replaces the gallery wholesale
    let resp = client
        .patch(&format!("/api/{store_id}/products/{product_id}"))
        .json(&json!({
            "categoryId": catalog.category_id,
            "sizeId": catalog.size_id,
            "colourId": catalog.colour_id,
            "name": "Harbour Jacket",
            "price": 59.99,
            "isFeatured": false,
            "isArchived": false,
            "images": [
                { "url": "https://placehold.co/600x600?text=Reshoot" }
            ]
        }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.expect("Failed to parse updated product");
    assert_eq!(product.get("price"), Some(&json!("59.99")));

    let resp = client
        .get(&format!("/api/{store_id}/products/{product_id}"))
        .send()
        .await
        .expect("Failed to re-fetch product");
    let detail: Value = resp.json().await.expect("Failed to parse product detail");
    let images = detail
        .get("images")
        .and_then(Value::as_array)
        .expect("detail should carry images");
    assert_eq!(images.len(), 1, "old images should be gone after replace");
    assert_eq!(
        images.first().and_then(|i| i.get("url")),
        Some(&json!("https://placehold.co/600x600?text=Reshoot"))
    );

    // Delete echoes the product, and the detail reads back as null
    let resp = client
        .delete(&format!("/api/{store_id}/products/{product_id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        id_of(&resp.json::<Value>().await.expect("Failed to parse deleted product")),
        product_id
    );

    let resp = client
        .get(&format!("/api/{store_id}/products/{product_id}"))
        .send()
        .await
        .expect("Failed to re-fetch deleted product");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "null");
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_product_validation_messages() {
    let client = OwnerClient::new();
    let catalog = seed_catalog(&client, "Product Validation Store").await;
    let store_id = &catalog.store_id;

    // Identity references are checked before anything else
    let resp = client
        .post(&format!("/api/{store_id}/products"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.expect("Failed to read body"),
        "Category ID is required"
    );

    // A complete payload with an empty gallery is still rejected
    let resp = client
        .post(&format!("/api/{store_id}/products"))
        .json(&json!({
            "categoryId": catalog.category_id,
            "sizeId": catalog.size_id,
            "colourId": catalog.colour_id,
            "name": "No Pictures",
            "price": 10,
            "isFeatured": false,
            "isArchived": false,
            "images": []
        }))
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.expect("Failed to read body"),
        "Images are required"
    );

    // Prices arrive as JSON numbers, not strings
    let resp = client
        .post(&format!("/api/{store_id}/products"))
        .json(&json!({
            "categoryId": catalog.category_id,
            "sizeId": catalog.size_id,
            "colourId": catalog.colour_id,
            "name": "String Price",
            "price": "79.99",
            "isFeatured": false,
            "isArchived": false,
            "images": [{ "url": "https://placehold.co/600x600" }]
        }))
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.expect("Failed to read body"),
        "Price must be a number"
    );
}

// ============================================================================
// Referential Integrity Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_deleting_referenced_catalog_entry_fails() {
    let client = OwnerClient::new();
    let catalog = seed_catalog(&client, "Integrity Store").await;
    let store_id = &catalog.store_id;

    let resp = client
        .post(&format!("/api/{store_id}/products"))
        .json(&json!({
            "categoryId": catalog.category_id,
            "sizeId": catalog.size_id,
            "colourId": catalog.colour_id,
            "name": "Anchor Product",
            "price": 12,
            "isFeatured": false,
            "isArchived": false,
            "images": [{ "url": "https://placehold.co/600x600" }]
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::OK);

    // The colour is still referenced, so the delete surfaces as a
    // generic internal failure
    let resp = client
        .delete(&format!("/api/{store_id}/colours/{}", catalog.colour_id))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.text().await.expect("Failed to read body"),
        "Internal Error"
    );

    // The colour survives
    let resp = client
        .get(&format!("/api/{store_id}/colours/{}", catalog.colour_id))
        .send()
        .await
        .expect("Failed to re-fetch colour");
    assert_eq!(resp.status(), StatusCode::OK);
    let colour: Value = resp.json().await.expect("Failed to parse colour");
    assert_eq!(colour.get("name"), Some(&json!("Navy")));
}

// ============================================================================
// Filter Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_product_list_filters() {
    let client = OwnerClient::new();
    let catalog = seed_catalog(&client, "Filter Store").await;
    let store_id = &catalog.store_id;
    let billboard_id = create_billboard(&client, store_id, "Second Billboard").await;
    let shoes_id = create_category(&client, store_id, &billboard_id, "Shoes").await;

    let create = |name: &str, category_id: &str, featured: bool, archived: bool| {
        let body = json!({
            "categoryId": category_id,
            "sizeId": catalog.size_id,
            "colourId": catalog.colour_id,
            "name": name,
            "price": 25,
            "isFeatured": featured,
            "isArchived": archived,
            "images": [{ "url": "https://placehold.co/600x600" }]
        });
        client
            .post(&format!("/api/{store_id}/products"))
            .json(&body)
            .send()
    };

    let featured_shirt = create("Featured Shirt", &catalog.category_id, true, false)
        .await
        .expect("Failed to create product");
    assert_eq!(featured_shirt.status(), StatusCode::OK);
    let featured_shirt = id_of(
        &featured_shirt
            .json::<Value>()
            .await
            .expect("Failed to parse product"),
    );

    let plain_shoe = create("Plain Shoe", &shoes_id, false, false)
        .await
        .expect("Failed to create product");
    assert_eq!(plain_shoe.status(), StatusCode::OK);
    let plain_shoe = id_of(
        &plain_shoe
            .json::<Value>()
            .await
            .expect("Failed to parse product"),
    );

    let archived = create("Archived Shirt", &catalog.category_id, false, true)
        .await
        .expect("Failed to create product");
    assert_eq!(archived.status(), StatusCode::OK);
    let archived = id_of(
        &archived
            .json::<Value>()
            .await
            .expect("Failed to parse product"),
    );

    let list = |query: String| {
        let request = client.get(&format!("/api/{store_id}/products{query}"));
        async move {
            let resp = request.send().await.expect("Failed to list products");
            assert_eq!(resp.status(), StatusCode::OK, "query: {query}");
            let products: Vec<Value> = resp.json().await.expect("Failed to parse product list");
            products.iter().map(id_of).collect::<Vec<_>>()
        }
    };

    // Archived products never appear
    let ids = list(String::new()).await;
    assert!(ids.contains(&featured_shirt));
    assert!(ids.contains(&plain_shoe));
    assert!(!ids.contains(&archived));

    // Category filter
    let ids = list(format!("?categoryId={}", catalog.category_id)).await;
    assert!(ids.contains(&featured_shirt));
    assert!(!ids.contains(&plain_shoe));

    // Featured-only: any non-empty value turns the filter on
    let ids = list("?isFeatured=true".to_string()).await;
    assert!(ids.contains(&featured_shirt));
    assert!(!ids.contains(&plain_shoe));

    // An empty value leaves the filter off
    let ids = list("?isFeatured=".to_string()).await;
    assert!(ids.contains(&featured_shirt));
    assert!(ids.contains(&plain_shoe));

    // Filters combine
    let ids = list(format!("?categoryId={shoes_id}&isFeatured=true")).await;
    assert!(ids.is_empty());
}
