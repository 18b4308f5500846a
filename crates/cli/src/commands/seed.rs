//! Seed the database with the studio's launch data.
//!
//! The catalog seed is the launch collection; the sales seed is a small
//! demo ledger so the back-office has something to show. Both are
//! idempotent: a non-empty table is skipped unless `--force` is given.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use atelier_admin::db::products::ProductInput;
use atelier_admin::db::sales::SaleInput;
use atelier_admin::db::{ProductRepository, SaleRepository, create_pool};
use atelier_core::{Category, SaleStatus};

/// Errors that can occur during seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] atelier_admin::db::RepositoryError),
}

async fn connect() -> Result<PgPool, SeedError> {
    dotenvy::dotenv().ok();
    let url = std::env::var("ADMIN_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("ADMIN_DATABASE_URL"))?;
    Ok(create_pool(&url).await?)
}

/// Seed the product catalog with the launch collection.
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL or a
/// database operation fails.
pub async fn catalog(force: bool) -> Result<(), SeedError> {
    let pool = connect().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        if !force {
            info!("Catalog already has {existing} pieces, skipping (use --force to re-seed)");
            return Ok(());
        }
        info!("Clearing {existing} existing pieces");
        sqlx::query("DELETE FROM products").execute(&pool).await?;
    }

    let repository = ProductRepository::new(pool);
    let pieces = launch_collection();
    let count = pieces.len();

    for piece in pieces {
        let created = repository.create(&piece).await?;
        info!(product_id = %created.id, name = %created.name, "seeded piece");
    }

    info!("Catalog seeded with {count} pieces");
    Ok(())
}

/// Seed the demo sales ledger.
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL or a
/// database operation fails.
pub async fn sales(force: bool) -> Result<(), SeedError> {
    let pool = connect().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        if !force {
            info!("Ledger already has {existing} entries, skipping (use --force to re-seed)");
            return Ok(());
        }
        info!("Clearing {existing} existing entries");
        sqlx::query("DELETE FROM sales").execute(&pool).await?;
    }

    let repository = SaleRepository::new(pool);
    let entries = demo_ledger();
    let count = entries.len();

    for entry in entries {
        repository.insert(&entry).await?;
    }

    info!("Ledger seeded with {count} entries");
    Ok(())
}

/// The studio's launch collection.
fn launch_collection() -> Vec<ProductInput> {
    vec![
        ProductInput {
            name: "Serene Cloud Sofa".to_string(),
            description: "A luxurious, modular sofa wrapped in Italian velvet for ultimate \
                          comfort. Designed for deep relaxation with cloud-soft cushioning \
                          and a hand-built hardwood frame."
                .to_string(),
            price: Decimal::from(2450),
            category: Category::LivingRoom,
            rating: 4.9,
            stock: 12,
            image: "https://images.unsplash.com/photo-1555041469-a586c61ea9bc?q=80&w=2070&auto=format&fit=crop".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1555041469-a586c61ea9bc?q=80&w=2070&auto=format&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1493663284031-b7e3aefcae8e?q=80&w=2070&auto=format&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1540574163026-643ea20ade25?q=80&w=2070&auto=format&fit=crop".to_string(),
            ],
        },
        ProductInput {
            name: "Minimalist Oak Desk".to_string(),
            description: "Sustainably sourced solid oak desk with integrated cable management \
                          and a smooth hand-oiled finish. A masterpiece of functional \
                          minimalism."
                .to_string(),
            price: Decimal::from(890),
            category: Category::Office,
            rating: 4.7,
            stock: 8,
            image: "https://images.unsplash.com/photo-1518455027359-f3f8164ba6bd?q=80&w=1974&auto=format&fit=crop".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1518455027359-f3f8164ba6bd?q=80&w=1974&auto=format&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1493932484895-752d1471eab5?q=80&w=2070&auto=format&fit=crop".to_string(),
            ],
        },
        ProductInput {
            name: "Nordic Dining Table".to_string(),
            description: "Elegant round dining table featuring a minimalist Scandinavian \
                          design and solid ash wood construction. Perfect for gathering \
                          legacies."
                .to_string(),
            price: Decimal::from(1200),
            category: Category::DiningRoom,
            rating: 4.8,
            stock: 4,
            image: "https://images.unsplash.com/photo-1595515106969-1ce29566ff1c?q=80&w=2070&auto=format&fit=crop".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1595515106969-1ce29566ff1c?q=80&w=2070&auto=format&fit=crop".to_string(),
                "https://images.unsplash.com/photo-1577140917170-285929fb55b7?q=80&w=2070&auto=format&fit=crop".to_string(),
            ],
        },
        ProductInput {
            name: "Rose Quartz Lamp".to_string(),
            description: "Artisanal lamp with a hand-carved stone base and silk shade, \
                          emitting a warm, ethereal glow that transforms any room into a \
                          sanctuary."
                .to_string(),
            price: Decimal::from(240),
            category: Category::Decor,
            rating: 4.5,
            stock: 45,
            image: "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?q=80&w=1974&auto=format&fit=crop".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?q=80&w=1974&auto=format&fit=crop".to_string(),
            ],
        },
        ProductInput {
            name: "Ethereal Bed Frame".to_string(),
            description: "Velvet-tufted headboard with a minimalist brass-finished frame, \
                          designed for dreams and deep rest. Handcrafted for longevity."
                .to_string(),
            price: Decimal::from(1750),
            category: Category::Bedroom,
            rating: 4.9,
            stock: 5,
            image: "https://images.unsplash.com/photo-1522771739844-6a9f6d5f14af?q=80&w=2071&auto=format&fit=crop".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1522771739844-6a9f6d5f14af?q=80&w=2071&auto=format&fit=crop".to_string(),
            ],
        },
        ProductInput {
            name: "Marble Nesting Tables".to_string(),
            description: "Set of two nesting tables with Carrara marble tops and gold \
                          accents. Perfect for dynamic living spaces and sophisticated \
                          hosting."
                .to_string(),
            price: Decimal::from(560),
            category: Category::LivingRoom,
            rating: 4.6,
            stock: 2,
            image: "https://images.unsplash.com/photo-1533090161767-e6ffed986c88?q=80&w=2069&auto=format&fit=crop".to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1533090161767-e6ffed986c88?q=80&w=2069&auto=format&fit=crop".to_string(),
            ],
        },
    ]
}

/// Demo ledger entries for the back-office.
fn demo_ledger() -> Vec<SaleInput> {
    let entry = |customer: &str, product: &str, amount: i64, status, y, m, d| SaleInput {
        customer_name: customer.to_string(),
        product_name: product.to_string(),
        amount: Decimal::from(amount),
        status,
        placed_on: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
    };

    vec![
        entry(
            "Isabella Rossellini",
            "Serene Cloud Sofa",
            2450,
            SaleStatus::Fulfilled,
            2026,
            3,
            12,
        ),
        entry(
            "Luca Guadagnino",
            "Marble Nesting Tables",
            560,
            SaleStatus::Processing,
            2026,
            3,
            10,
        ),
        entry(
            "Monica Bellucci",
            "Ethereal Bed Frame",
            1750,
            SaleStatus::Commissioned,
            2026,
            3,
            8,
        ),
        entry(
            "Ennio Morricone",
            "Rose Quartz Lamp",
            240,
            SaleStatus::Shipped,
            2026,
            3,
            5,
        ),
        entry(
            "Sofia Loren",
            "Nordic Dining Table",
            1200,
            SaleStatus::Fulfilled,
            2026,
            3,
            2,
        ),
        entry(
            "Alain Delon",
            "Minimalist Oak Desk",
            890,
            SaleStatus::Shipped,
            2026,
            2,
            28,
        ),
    ]
}
