//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for the storefront
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for the admin
//!
//! Catalog migrations live in `crates/admin/migrations/` and are embedded
//! at compile time. The storefront owns no schema of its own beyond the
//! tower-sessions table, which the session store migrates itself.

use secrecy::SecretString;
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use atelier_admin::db::create_pool;

/// Errors that can occur during migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

fn database_url(name: &'static str) -> Result<SecretString, MigrationError> {
    std::env::var(name)
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar(name))
}

/// Run storefront database migrations (session store only).
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL or a
/// migration fails.
pub async fn storefront() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let url = database_url("STOREFRONT_DATABASE_URL")?;

    info!("Connecting to storefront database...");
    let pool = create_pool(&url).await?;

    info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    info!("Storefront migrations complete!");
    Ok(())
}

/// Run admin database migrations (catalog, sales, settings + session store).
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL or a
/// migration fails.
pub async fn admin() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let url = database_url("ADMIN_DATABASE_URL")?;

    info!("Connecting to admin database...");
    let pool = create_pool(&url).await?;

    info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    info!("Admin migrations complete!");
    Ok(())
}
