//! Request payload validation.
//!
//! Every entity has exactly one validator, assembled from shared field
//! helpers so wording stays uniform across the API. Checks run in a
//! fixed order: identity references first, then required strings,
//! numbers, booleans, and finally list fields. The first failure wins,
//! so any given payload always produces the same message.
//!
//! Bodies arrive as raw [`serde_json::Value`]s rather than typed
//! extractors because the contract distinguishes "field missing" from
//! "field has the wrong type", and names the offending field either way.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

use shopkeeper_core::{BillboardId, CategoryId, ColourId, SizeId};

use crate::error::AppError;

/// A rejected payload. The display form is the exact message returned
/// to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent, null or empty.
    #[error("{0} is required")]
    Missing(&'static str),
    /// A required list field is absent or empty.
    #[error("{0} are required")]
    MissingList(&'static str),
    /// A field is present but not a string.
    #[error("{0} must be a string")]
    NotAString(&'static str),
    /// An identity field doesn't hold a well-formed ID.
    #[error("{0} must be a valid ID")]
    InvalidId(&'static str),
    /// A field is present but not a number.
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    /// A field is present but not a boolean.
    #[error("{0} must be a boolean")]
    NotABoolean(&'static str),
    /// A field is present but not a list.
    #[error("{0} must be a list")]
    NotAList(&'static str),
}

/// Parse a raw request body as JSON.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if the body isn't well-formed JSON.
pub fn parse_json(body: &[u8]) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|_| AppError::BadRequest("Invalid JSON body".to_owned()))
}

// =============================================================================
// Field helpers
// =============================================================================

/// A required string field. Absent, null and empty all count as missing.
fn required_str(body: &Value, field: &str, label: &'static str) -> Result<String, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(label)),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Missing(label)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::NotAString(label)),
    }
}

/// A required identity field: a string holding a well-formed ID.
fn required_id<T: FromStr>(
    body: &Value,
    field: &str,
    label: &'static str,
) -> Result<T, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(label)),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Missing(label)),
        Some(Value::String(s)) => s.parse().map_err(|_| ValidationError::InvalidId(label)),
        Some(_) => Err(ValidationError::InvalidId(label)),
    }
}

/// A required numeric field. Must be a JSON number; numeric strings are
/// rejected.
fn required_decimal(
    body: &Value,
    field: &str,
    label: &'static str,
) -> Result<Decimal, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(label)),
        Some(Value::Number(n)) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|_| ValidationError::NotANumber(label))
        }
        Some(_) => Err(ValidationError::NotANumber(label)),
    }
}

/// A required boolean field. `false` is a valid value; explicit null
/// counts as present but non-boolean, since the dashboard forms always
/// send both flags.
fn required_bool(body: &Value, field: &str, label: &'static str) -> Result<bool, ValidationError> {
    match body.get(field) {
        None => Err(ValidationError::Missing(label)),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ValidationError::NotABoolean(label)),
    }
}

/// A required, non-empty list of image objects.
fn required_images(
    body: &Value,
    field: &str,
    label: &'static str,
) -> Result<Vec<ImageInput>, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingList(label)),
        Some(Value::Array(items)) if items.is_empty() => Err(ValidationError::MissingList(label)),
        Some(Value::Array(items)) => items.iter().map(image_input).collect(),
        Some(_) => Err(ValidationError::NotAList(label)),
    }
}

fn image_input(value: &Value) -> Result<ImageInput, ValidationError> {
    match value.get("url") {
        Some(Value::String(url)) if !url.is_empty() => Ok(ImageInput { url: url.clone() }),
        _ => Err(ValidationError::Missing("Image URL")),
    }
}

// =============================================================================
// Validated inputs
// =============================================================================

/// Validated store payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInput {
    pub name: String,
}

/// Validated billboard payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillboardInput {
    pub label: String,
    pub image_url: String,
}

/// Validated category payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub billboard_id: BillboardId,
    pub name: String,
}

/// Validated colour payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourInput {
    pub name: String,
    pub value: String,
}

/// Validated size payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeInput {
    pub name: String,
    pub value: String,
}

/// One validated image entry of a product payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub url: String,
}

/// Validated product payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub colour_id: ColourId,
    pub name: String,
    pub price: Decimal,
    pub is_featured: bool,
    pub is_archived: bool,
    pub images: Vec<ImageInput>,
}

// =============================================================================
// Entity validators
// =============================================================================

/// Validate a store payload.
///
/// # Errors
///
/// Returns the first failed check in field order.
pub fn store(body: &Value) -> Result<StoreInput, ValidationError> {
    Ok(StoreInput {
        name: required_str(body, "name", "Name")?,
    })
}

/// Validate a billboard payload.
///
/// # Errors
///
/// Returns the first failed check in field order.
pub fn billboard(body: &Value) -> Result<BillboardInput, ValidationError> {
    Ok(BillboardInput {
        label: required_str(body, "label", "Label")?,
        image_url: required_str(body, "imageUrl", "Image URL")?,
    })
}

/// Validate a category payload. The billboard reference is checked
/// before the name.
///
/// # Errors
///
/// Returns the first failed check in field order.
pub fn category(body: &Value) -> Result<CategoryInput, ValidationError> {
    Ok(CategoryInput {
        billboard_id: required_id(body, "billboardId", "Billboard ID")?,
        name: required_str(body, "name", "Name")?,
    })
}

/// Validate a colour payload.
///
/// # Errors
///
/// Returns the first failed check in field order.
pub fn colour(body: &Value) -> Result<ColourInput, ValidationError> {
    Ok(ColourInput {
        name: required_str(body, "name", "Name")?,
        value: required_str(body, "value", "Value")?,
    })
}

/// Validate a size payload.
///
/// # Errors
///
/// Returns the first failed check in field order.
pub fn size(body: &Value) -> Result<SizeInput, ValidationError> {
    Ok(SizeInput {
        name: required_str(body, "name", "Name")?,
        value: required_str(body, "value", "Value")?,
    })
}

/// Validate a product payload. Checks run in the canonical order:
/// identity references, then name, price, the two flags, and finally
/// the image list.
///
/// # Errors
///
/// Returns the first failed check in field order.
pub fn product(body: &Value) -> Result<ProductInput, ValidationError> {
    Ok(ProductInput {
        category_id: required_id(body, "categoryId", "Category ID")?,
        size_id: required_id(body, "sizeId", "Size ID")?,
        colour_id: required_id(body, "colourId", "Colour ID")?,
        name: required_str(body, "name", "Name")?,
        price: required_decimal(body, "price", "Price")?,
        is_featured: required_bool(body, "isFeatured", "isFeatured")?,
        is_archived: required_bool(body, "isArchived", "isArchived")?,
        images: required_images(body, "images", "Images")?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(result: Result<impl std::fmt::Debug, ValidationError>) -> String {
        result.unwrap_err().to_string()
    }

    // -------------------------------------------------------------------------
    // Store
    // -------------------------------------------------------------------------

    #[test]
    fn test_store_missing_name() {
        assert_eq!(message(store(&json!({}))), "Name is required");
    }

    #[test]
    fn test_store_empty_name_counts_as_missing() {
        assert_eq!(message(store(&json!({ "name": "" }))), "Name is required");
    }

    #[test]
    fn test_store_null_name_counts_as_missing() {
        assert_eq!(message(store(&json!({ "name": null }))), "Name is required");
    }

    #[test]
    fn test_store_non_string_name() {
        assert_eq!(
            message(store(&json!({ "name": 42 }))),
            "Name must be a string"
        );
    }

    #[test]
    fn test_store_valid() {
        let input = store(&json!({ "name": "Demo Store" })).unwrap();
        assert_eq!(input.name, "Demo Store");
    }

    // -------------------------------------------------------------------------
    // Billboard
    // -------------------------------------------------------------------------

    #[test]
    fn test_billboard_label_checked_first() {
        // Both fields missing: the label failure wins.
        assert_eq!(message(billboard(&json!({}))), "Label is required");
    }

    #[test]
    fn test_billboard_missing_image_url() {
        assert_eq!(
            message(billboard(&json!({ "label": "Summer Sale" }))),
            "Image URL is required"
        );
    }

    #[test]
    fn test_billboard_valid() {
        let input = billboard(&json!({
            "label": "Summer Sale",
            "imageUrl": "https://cdn.example.com/summer.jpg"
        }))
        .unwrap();
        assert_eq!(input.label, "Summer Sale");
        assert_eq!(input.image_url, "https://cdn.example.com/summer.jpg");
    }

    // -------------------------------------------------------------------------
    // Category
    // -------------------------------------------------------------------------

    #[test]
    fn test_category_billboard_reference_checked_before_name() {
        assert_eq!(message(category(&json!({}))), "Billboard ID is required");
        assert_eq!(
            message(category(&json!({ "name": "Shirts" }))),
            "Billboard ID is required"
        );
    }

    #[test]
    fn test_category_malformed_billboard_reference() {
        assert_eq!(
            message(category(&json!({ "billboardId": "not-an-id" }))),
            "Billboard ID must be a valid ID"
        );
        assert_eq!(
            message(category(&json!({ "billboardId": 7 }))),
            "Billboard ID must be a valid ID"
        );
    }

    #[test]
    fn test_category_valid() {
        let input = category(&json!({
            "billboardId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "name": "Shirts"
        }))
        .unwrap();
        assert_eq!(input.name, "Shirts");
        assert_eq!(
            input.billboard_id.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    // -------------------------------------------------------------------------
    // Colour and size
    // -------------------------------------------------------------------------

    #[test]
    fn test_colour_name_checked_before_value() {
        assert_eq!(message(colour(&json!({}))), "Name is required");
        assert_eq!(
            message(colour(&json!({ "name": "Red" }))),
            "Value is required"
        );
    }

    #[test]
    fn test_colour_valid() {
        let input = colour(&json!({ "name": "Red", "value": "#FF0000" })).unwrap();
        assert_eq!(input.name, "Red");
        assert_eq!(input.value, "#FF0000");
    }

    #[test]
    fn test_size_valid() {
        let input = size(&json!({ "name": "Small", "value": "SM" })).unwrap();
        assert_eq!(input.name, "Small");
        assert_eq!(input.value, "SM");
    }

    // -------------------------------------------------------------------------
    // Product
    // -------------------------------------------------------------------------

    fn valid_product_payload() -> Value {
        json!({
            "categoryId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "sizeId": "9f2c7e55-3b48-4f11-8a30-6f3a0cbb8b01",
            "colourId": "2d5a1f04-9c1b-4d6e-b7a2-1586b90de111",
            "name": "Linen Shirt",
            "price": 29.99,
            "isFeatured": true,
            "isArchived": false,
            "images": [
                { "url": "https://cdn.example.com/front.jpg" },
                { "url": "https://cdn.example.com/back.jpg" }
            ]
        })
    }

    fn without(mut payload: Value, field: &str) -> Value {
        payload
            .as_object_mut()
            .unwrap()
            .remove(field);
        payload
    }

    #[test]
    fn test_product_field_order() {
        // Walk the canonical order by removing one field at a time from
        // an otherwise valid payload.
        let cases = [
            ("categoryId", "Category ID is required"),
            ("sizeId", "Size ID is required"),
            ("colourId", "Colour ID is required"),
            ("name", "Name is required"),
            ("price", "Price is required"),
            ("isFeatured", "isFeatured is required"),
            ("isArchived", "isArchived is required"),
            ("images", "Images are required"),
        ];
        for (field, expected) in cases {
            let payload = without(valid_product_payload(), field);
            assert_eq!(message(product(&payload)), expected, "field {field}");
        }
    }

    #[test]
    fn test_product_identity_failures_win_over_later_fields() {
        // An empty payload reports the first identity field, not the
        // string or boolean fields.
        assert_eq!(message(product(&json!({}))), "Category ID is required");
    }

    #[test]
    fn test_product_price_must_be_numeric() {
        let mut payload = valid_product_payload();
        payload["price"] = json!("29.99");
        assert_eq!(message(product(&payload)), "Price must be a number");
    }

    #[test]
    fn test_product_zero_price_is_valid() {
        let mut payload = valid_product_payload();
        payload["price"] = json!(0);
        let input = product(&payload).unwrap();
        assert_eq!(input.price, Decimal::ZERO);
    }

    #[test]
    fn test_product_flags_must_be_boolean() {
        let mut payload = valid_product_payload();
        payload["isFeatured"] = json!("true");
        assert_eq!(message(product(&payload)), "isFeatured must be a boolean");

        let mut payload = valid_product_payload();
        payload["isArchived"] = json!(null);
        assert_eq!(message(product(&payload)), "isArchived must be a boolean");
    }

    #[test]
    fn test_product_false_flags_are_valid() {
        let mut payload = valid_product_payload();
        payload["isFeatured"] = json!(false);
        payload["isArchived"] = json!(false);
        let input = product(&payload).unwrap();
        assert!(!input.is_featured);
        assert!(!input.is_archived);
    }

    #[test]
    fn test_product_empty_image_list() {
        let mut payload = valid_product_payload();
        payload["images"] = json!([]);
        assert_eq!(message(product(&payload)), "Images are required");
    }

    #[test]
    fn test_product_images_must_be_a_list() {
        let mut payload = valid_product_payload();
        payload["images"] = json!("https://cdn.example.com/front.jpg");
        assert_eq!(message(product(&payload)), "Images must be a list");
    }

    #[test]
    fn test_product_image_entry_needs_url() {
        let mut payload = valid_product_payload();
        payload["images"] = json!([{ "url": "https://cdn.example.com/a.jpg" }, {}]);
        assert_eq!(message(product(&payload)), "Image URL is required");

        let mut payload = valid_product_payload();
        payload["images"] = json!([{ "url": "" }]);
        assert_eq!(message(product(&payload)), "Image URL is required");
    }

    #[test]
    fn test_product_valid() {
        let input = product(&valid_product_payload()).unwrap();
        assert_eq!(input.name, "Linen Shirt");
        assert_eq!(input.price, Decimal::new(2999, 2));
        assert!(input.is_featured);
        assert!(!input.is_archived);
        assert_eq!(input.images.len(), 2);
        assert_eq!(input.images[0].url, "https://cdn.example.com/front.jpg");
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        assert!(parse_json(b"{not json").is_err());
        assert!(parse_json(br#"{"name": "ok"}"#).is_ok());
    }
}
