//! Product model and its assembled detail form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopkeeper_core::{CategoryId, ColourId, ImageId, ProductId, SizeId, StoreId};

use super::{Category, Colour, Size};

/// A catalog product.
///
/// Prices are exact decimals and travel as JSON strings on the wire,
/// so clients never see float rounding on money.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub colour_id: ColourId,
    pub name: String,
    pub price: Decimal,
    /// Featured products surface on the storefront landing page.
    pub is_featured: bool,
    /// Archived products stay in the dashboard but are hidden from
    /// every storefront listing.
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One image attached to a product. The full image set is replaced
/// wholesale on every product update.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub product_id: ProductId,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product with its images and related catalog entities joined in.
/// Served by the listing and detail endpoints so storefront cards can
/// render without follow-up requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<Image>,
    pub category: Category,
    pub size: Size,
    pub colour: Colour,
}
