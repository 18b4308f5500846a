//! HTTP route handlers for the admin back-office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth (permissive: any non-empty access key)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//!
//! # Dashboard
//! GET  /dashboard              - Stat tiles + collection mix
//!
//! # Inventory
//! GET  /inventory              - Catalog list (search, filter, pagination)
//! GET  /inventory/new          - New piece form
//! POST /inventory              - Create piece
//! GET  /inventory/{id}/edit    - Edit piece form
//! POST /inventory/{id}         - Update piece
//! POST /inventory/{id}/delete  - Delete piece
//! POST /inventory/upload       - Image upload (multipart, returns URL)
//!
//! # Sales
//! GET  /sales                  - Ledger list (search, status filter)
//!
//! # Settings
//! GET  /settings               - Studio settings form
//! POST /settings               - Save settings
//! ```

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod sales;
pub mod settings;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin back-office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::index))
        .route("/inventory", get(inventory::index).post(inventory::create))
        .route("/inventory/new", get(inventory::new_form))
        .route("/inventory/upload", post(inventory::upload))
        .route(
            "/inventory/{id}",
            post(inventory::update),
        )
        .route("/inventory/{id}/edit", get(inventory::edit_form))
        .route("/inventory/{id}/delete", post(inventory::delete))
        .route("/sales", get(sales::index))
        .route("/settings", get(settings::show).post(settings::save))
}
