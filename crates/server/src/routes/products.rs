//! Product route handlers.

use std::str::FromStr;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use shopkeeper_core::{ProductId, StoreId};

use crate::{
    db::{ProductChange, ProductFilter, ProductRepository},
    error::Result,
    middleware::{OptionalAuth, RequireAuth},
    models::{Product, ProductDetail},
    ownership::{self, Entity},
    state::AppState,
    validate::{self, ValidationError},
};

/// Build the product routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{product_id}", get(detail).patch(update).delete(remove))
}

/// Query filters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    category_id: Option<String>,
    size_id: Option<String>,
    colour_id: Option<String>,
    is_featured: Option<String>,
}

impl ListQuery {
    /// Convert the raw query parameters into a typed filter.
    ///
    /// Empty ID parameters are ignored, matching forms that submit all
    /// fields whether filled in or not. `isFeatured` is presence-as-
    /// truthy: any non-empty value selects featured products only.
    fn into_filter(self) -> std::result::Result<ProductFilter, ValidationError> {
        Ok(ProductFilter {
            category_id: parse_filter_id(self.category_id, "Category ID")?,
            size_id: parse_filter_id(self.size_id, "Size ID")?,
            colour_id: parse_filter_id(self.colour_id, "Colour ID")?,
            is_featured: self.is_featured.is_some_and(|value| !value.is_empty()),
        })
    }
}

fn parse_filter_id<T: FromStr>(
    value: Option<String>,
    label: &'static str,
) -> std::result::Result<Option<T>, ValidationError> {
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidId(label)),
    }
}

/// List a store's storefront-visible products, with images and related
/// catalog entities attached. Archived products never appear here.
///
/// # Errors
///
/// Returns an error if a filter parameter is malformed or a query
/// fails.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path(store_id): Path<StoreId>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductDetail>>> {
    ownership::authorize_read(state.pool(), Entity::Product, identity.as_ref(), store_id).await?;

    let filter = query.into_filter()?;

    let products = ProductRepository::new(state.pool())
        .list_for_store(store_id, filter)
        .await?;

    Ok(Json(products))
}

/// Get a product by ID, with images and related catalog entities
/// attached. Answers JSON `null` when it doesn't exist. Archived
/// products are reachable here so the dashboard can edit them.
///
/// # Errors
///
/// Returns an error if a query fails.
pub async fn detail(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<Option<ProductDetail>>> {
    ownership::authorize_read(state.pool(), Entity::Product, identity.as_ref(), store_id).await?;

    let product = ProductRepository::new(state.pool())
        .find_detail(product_id)
        .await?;

    Ok(Json(product))
}

/// Create a product with its images.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the insert fails.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(store_id): Path<StoreId>,
    body: Bytes,
) -> Result<Json<Product>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::product(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let image_urls: Vec<String> = input.images.iter().map(|image| image.url.clone()).collect();
    let product = ProductRepository::new(state.pool())
        .create(
            store_id,
            ProductChange {
                category_id: input.category_id,
                size_id: input.size_id,
                colour_id: input.colour_id,
                name: &input.name,
                price: input.price,
                is_featured: input.is_featured,
                is_archived: input.is_archived,
                image_urls: &image_urls,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Update a product, replacing its whole image set.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the payload is
/// invalid, the store isn't owned by the caller, or the update fails.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
    body: Bytes,
) -> Result<Json<Product>> {
    let payload = validate::parse_json(&body)?;
    let input = validate::product(&payload)?;

    ownership::authorize(state.pool(), &caller, store_id).await?;

    let image_urls: Vec<String> = input.images.iter().map(|image| image.url.clone()).collect();
    let product = ProductRepository::new(state.pool())
        .update(
            product_id,
            store_id,
            ProductChange {
                category_id: input.category_id,
                size_id: input.size_id,
                colour_id: input.colour_id,
                name: &input.name,
                price: input.price,
                is_featured: input.is_featured,
                is_archived: input.is_archived,
                image_urls: &image_urls,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Delete a product and its images.
///
/// # Errors
///
/// Returns an error if the caller has no identity, the store isn't
/// owned by the caller, or the delete fails.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<Product>> {
    ownership::authorize(state.pool(), &caller, store_id).await?;

    let product = ProductRepository::new(state.pool())
        .delete(product_id, store_id)
        .await?;

    Ok(Json(product))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_ignores_empty_parameters() {
        let query = ListQuery {
            category_id: Some(String::new()),
            size_id: None,
            colour_id: Some(String::new()),
            is_featured: None,
        };
        let filter = query.into_filter().unwrap();
        assert!(filter.category_id.is_none());
        assert!(filter.size_id.is_none());
        assert!(filter.colour_id.is_none());
        assert!(!filter.is_featured);
    }

    #[test]
    fn test_filter_parses_ids() {
        let query = ListQuery {
            category_id: Some("67e55044-10b1-426f-9247-bb680e5fe0c8".to_string()),
            ..ListQuery::default()
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(
            filter.category_id.unwrap().to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[test]
    fn test_filter_rejects_malformed_ids() {
        let query = ListQuery {
            size_id: Some("garbage".to_string()),
            ..ListQuery::default()
        };
        let err = query.into_filter().unwrap_err();
        assert_eq!(err.to_string(), "Size ID must be a valid ID");
    }

    #[test]
    fn test_featured_filter_is_presence_as_truthy() {
        for (value, expected) in [
            (None, false),
            (Some(String::new()), false),
            (Some("true".to_string()), true),
            (Some("false".to_string()), true),
            (Some("1".to_string()), true),
        ] {
            let query = ListQuery {
                is_featured: value.clone(),
                ..ListQuery::default()
            };
            let filter = query.into_filter().unwrap();
            assert_eq!(filter.is_featured, expected, "{value:?}");
        }
    }
}
