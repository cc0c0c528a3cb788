//! Seed a demo store with catalog data.
//!
//! Creates a store for the given owner, fills it with a billboard,
//! categories, colours, sizes, and products, and records a few orders
//! so the overview page has revenue to graph. Useful for local dashboard
//! development against a fresh database.
//!
//! # Usage
//!
//! ```bash
//! shopkeeper seed -o user_2abc123
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPKEEPER_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use tracing::info;

use shopkeeper_core::{ProductId, UserId, UserIdError};
use shopkeeper_server::db::{
    self, BillboardRepository, CategoryRepository, ColourRepository, OrderRepository,
    ProductChange, ProductRepository, RepositoryError, SizeRepository, StoreRepository,
};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The owner argument is not a usable identity.
    #[error("Invalid owner identity: {0}")]
    InvalidOwner(#[from] UserIdError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

const BILLBOARD_LABEL: &str = "Summer Collection";
const BILLBOARD_IMAGE: &str = "https://placehold.co/1200x400?text=Summer+Collection";

const CATEGORY_NAMES: &[&str] = &["Shirts", "Shoes", "Accessories"];

const COLOUR_SWATCHES: &[(&str, &str)] = &[
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Red", "#FF0000"),
    ("Navy", "#001F54"),
];

const SIZE_OPTIONS: &[(&str, &str)] = &[("Small", "S"), ("Medium", "M"), ("Large", "L")];

const PRODUCT_NAMES: &[&str] = &[
    "Linen Shirt",
    "Oxford Shirt",
    "Canvas Sneaker",
    "Trail Runner",
    "Leather Belt",
    "Wool Beanie",
    "Denim Jacket",
    "Tote Bag",
];

const ORDER_COUNT: usize = 5;

/// Seed a demo store for the given owner.
///
/// # Errors
///
/// Returns an error if the owner identity is invalid, the database URL is
/// missing, or any insert fails.
pub async fn demo_store(owner: &str) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let owner = UserId::parse(owner)?;

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let mut rng = rand::rng();

    let store = StoreRepository::new(&pool)
        .create(&owner, "Demo Store")
        .await?;
    info!(store_id = %store.id, "Created store");

    let billboard = BillboardRepository::new(&pool)
        .create(store.id, BILLBOARD_LABEL, BILLBOARD_IMAGE)
        .await?;

    let categories = CategoryRepository::new(&pool);
    let mut category_ids = Vec::new();
    for &name in CATEGORY_NAMES {
        let category = categories.create(store.id, billboard.id, name).await?;
        category_ids.push(category.id);
    }

    let colours = ColourRepository::new(&pool);
    let mut colour_ids = Vec::new();
    for &(name, value) in COLOUR_SWATCHES {
        let colour = colours.create(store.id, name, value).await?;
        colour_ids.push(colour.id);
    }

    let sizes = SizeRepository::new(&pool);
    let mut size_ids = Vec::new();
    for &(name, value) in SIZE_OPTIONS {
        let size = sizes.create(store.id, name, value).await?;
        size_ids.push(size.id);
    }

    let products = ProductRepository::new(&pool);
    let mut product_ids: Vec<ProductId> = Vec::new();
    let mut next_category = category_ids.iter().cycle();
    let mut next_size = size_ids.iter().cycle();
    let mut next_colour = colour_ids.iter().cycle();
    for &name in PRODUCT_NAMES {
        let (Some(&category_id), Some(&size_id), Some(&colour_id)) =
            (next_category.next(), next_size.next(), next_colour.next())
        else {
            break;
        };

        let image_urls = vec![format!(
            "https://placehold.co/600x600?text={}",
            name.replace(' ', "+")
        )];
        let product = products
            .create(
                store.id,
                ProductChange {
                    category_id,
                    size_id,
                    colour_id,
                    name,
                    price: Decimal::new(rng.random_range(1500..=8999), 2),
                    is_featured: rng.random_bool(0.3),
                    is_archived: false,
                    image_urls: &image_urls,
                },
            )
            .await?;
        product_ids.push(product.id);
    }

    let orders = OrderRepository::new(&pool);
    for n in 0..ORDER_COUNT {
        let mut line_items = product_ids.clone();
        line_items.shuffle(&mut rng);
        line_items.truncate(rng.random_range(1..=3));

        let phone = format!("+1 555 01{n:02}");
        let address = format!("{} Market Street", n + 1);
        orders
            .create(
                store.id,
                &phone,
                &address,
                rng.random_bool(0.8),
                &line_items,
            )
            .await?;
    }

    info!("Seeding complete!");
    info!("  Store: {} ({})", store.name, store.id);
    info!("  Categories: {}", category_ids.len());
    info!("  Colours: {}", colour_ids.len());
    info!("  Sizes: {}", size_ids.len());
    info!("  Products: {}", product_ids.len());
    info!("  Orders: {ORDER_COUNT}");

    pool.close().await;
    Ok(())
}

/// Resolve the database URL, falling back to the generic `DATABASE_URL`
/// (set by Fly.io postgres attach).
fn database_url() -> Result<SecretString, SeedError> {
    if let Ok(url) = std::env::var("SHOPKEEPER_DATABASE_URL") {
        return Ok(SecretString::from(url));
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(url));
    }
    Err(SeedError::MissingEnvVar("SHOPKEEPER_DATABASE_URL"))
}
