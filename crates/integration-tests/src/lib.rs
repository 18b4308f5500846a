//! Integration tests for Atelier Lumen.
//!
//! # Running Tests
//!
//! The tests in `tests/` drive the running binaries over HTTP and are
//! `#[ignore]`d by default. To run them:
//!
//! ```bash
//! # Migrate and seed the database
//! cargo run -p atelier-cli -- migrate all
//! cargo run -p atelier-cli -- seed all
//!
//! # Start both servers
//! cargo run -p atelier-storefront &
//! cargo run -p atelier-admin &
//!
//! # Run the ignored tests
//! cargo test -p atelier-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `STOREFRONT_BASE_URL` (default: http://localhost:3000)
//! - `ADMIN_BASE_URL` (default: http://localhost:3001)
//! - `ADMIN_DATABASE_URL` - used to look up seeded rows directly

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin panel (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create an HTTP client with a cookie store (sessions need it).
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Connect to the shared database for direct row lookups.
///
/// # Panics
///
/// Panics if `ADMIN_DATABASE_URL` is unset or the connection fails.
pub async fn pool() -> sqlx::PgPool {
    let url = std::env::var("ADMIN_DATABASE_URL").expect("ADMIN_DATABASE_URL must be set");
    sqlx::PgPool::connect(&url)
        .await
        .expect("Failed to connect to database")
}

/// Log into the admin panel (any access key works) and return the client.
///
/// # Panics
///
/// Panics if the login request fails.
pub async fn admin_client() -> reqwest::Client {
    let client = client();
    let response = client
        .post(format!("{}/auth/login", admin_base_url()))
        .form(&[("access_key", "integration-tests")])
        .send()
        .await
        .expect("login request failed");
    assert!(
        response.status().is_success() || response.status().is_redirection(),
        "login failed: {}",
        response.status()
    );
    client
}
