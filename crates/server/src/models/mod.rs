//! Domain models for the administration API.
//!
//! Every entity except [`Store`] is scoped by a `store_id` foreign key.
//! These types double as database row types (`sqlx::FromRow`) and wire
//! types; JSON field names are camelCase to match what the dashboard
//! consumes.

pub mod billboard;
pub mod category;
pub mod colour;
pub mod order;
pub mod overview;
pub mod product;
pub mod size;
pub mod store;

pub use billboard::Billboard;
pub use category::{Category, CategoryDetail};
pub use colour::Colour;
pub use order::OrderSummary;
pub use overview::{GraphPoint, OverviewSummary};
pub use product::{Image, Product, ProductDetail};
pub use size::Size;
pub use store::Store;
