//! Shopkeeper CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! shopkeeper migrate
//!
//! # Seed a demo store for an owner
//! shopkeeper seed -o user_2abc123
//!
//! # Create an empty store
//! shopkeeper stores create -o user_2abc123 -n "Sneaker Outlet"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed a demo store with catalog data and orders
//! - `stores create` - Create a store for an owner

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopkeeper")]
#[command(author, version, about = "Shopkeeper CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed a demo store with catalog data and orders
    Seed {
        /// Owner identity the seeded store belongs to
        #[arg(short, long)]
        owner: String,
    },
    /// Manage stores
    Stores {
        #[command(subcommand)]
        action: StoresAction,
    },
}

#[derive(Subcommand)]
enum StoresAction {
    /// Create a new store
    Create {
        /// Owner identity the store belongs to
        #[arg(short, long)]
        owner: String,

        /// Store name
        #[arg(short, long)]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { owner } => {
            commands::seed::demo_store(&owner).await?;
        }
        Commands::Stores { action } => match action {
            StoresAction::Create { owner, name } => {
                commands::stores::create(&owner, &name).await?;
            }
        },
    }
    Ok(())
}
