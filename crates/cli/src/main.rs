//! Atelier Lumen CLI - Database migrations and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations (session store)
//! atelier-cli migrate storefront
//!
//! # Run admin database migrations (catalog, sales, settings)
//! atelier-cli migrate admin
//!
//! # Run all database migrations
//! atelier-cli migrate all
//!
//! # Seed the catalog with the studio's launch collection
//! atelier-cli seed catalog
//!
//! # Seed the demo sales ledger
//! atelier-cli seed sales
//!
//! # Re-seed from scratch
//! atelier-cli seed all --force
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "atelier-cli")]
#[command(author, version, about = "Atelier Lumen CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed the database with launch data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
    /// Run admin database migrations
    Admin,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed the product catalog
    Catalog {
        /// Clear existing rows before seeding
        #[arg(long)]
        force: bool,
    },
    /// Seed the demo sales ledger
    Sales {
        /// Clear existing rows before seeding
        #[arg(long)]
        force: bool,
    },
    /// Seed everything
    All {
        /// Clear existing rows before seeding
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::admin().await?;
                commands::migrate::storefront().await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Catalog { force } => commands::seed::catalog(force).await?,
            SeedTarget::Sales { force } => commands::seed::sales(force).await?,
            SeedTarget::All { force } => {
                commands::seed::catalog(force).await?;
                commands::seed::sales(force).await?;
            }
        },
    }

    Ok(())
}
