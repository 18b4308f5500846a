//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (category filter + search)
//! GET  /products/{id}          - Product detail
//! POST /products/{id}/visualize - Room visualization (multipart, HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (returns count badge, triggers cart-opened)
//! POST /cart/update            - Set quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout form / empty display
//! POST /checkout               - Submit: clears cart, shows confirmation
//!
//! # Concierge (rate limited)
//! GET  /concierge              - Chat widget fragment with transcript
//! POST /concierge/message      - Send a message (returns transcript fragment)
//! ```

pub mod cart;
pub mod checkout;
pub mod concierge;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::concierge_rate_limiter;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/visualize", post(products::visualize))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/", get(checkout::show).post(checkout::submit))
}

/// Create the concierge routes router (rate limited).
pub fn concierge_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(concierge::widget))
        .route("/message", post(concierge::message))
        .layer(concierge_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .nest("/checkout", checkout_routes())
        // Concierge chat
        .nest("/concierge", concierge_routes())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use crate::config::StorefrontConfig;
    use crate::state::AppState;

    /// Router over an in-memory session store and a lazy (never-connected)
    /// database pool. Only routes that stay off the database can be
    /// exercised here; the rest are covered by the ignored integration
    /// tests.
    fn test_router() -> axum::Router {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/atelier_test"),
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            uploads_dir: std::path::PathBuf::from("uploads"),
            gemini: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/atelier_test")
            .expect("lazy pool");
        let state = AppState::new(config, pool);

        let session_layer = SessionManagerLayer::new(MemoryStore::default());
        super::routes().layer(session_layer).with_state(state)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn test_cart_page_renders_empty() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/cart")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Your basket is empty"));
    }

    #[tokio::test]
    async fn test_cart_count_starts_at_zero() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/cart/count")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        // Zero items renders no badge at all.
        assert!(!body.contains("cart-badge"));
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart_shows_empty_display() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/checkout")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Your basket is empty"));
    }

    #[tokio::test]
    async fn test_checkout_submit_unreachable_with_empty_cart() {
        let form = "first_name=Ada&last_name=Laurent&address=1+Rue+Lumen&city=Paris&postal_code=75001";
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/checkout")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Your basket is empty"));
        assert!(!body.contains("Gratitude"));
    }

    #[tokio::test]
    async fn test_concierge_unconfigured_degrades_to_contact_message() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/concierge/message")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("message=Do+you+deliver+to+Lyon%3F"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(String::from)
            .expect("session cookie");
        let body = body_text(response).await;
        assert!(body.contains("+1 (555) 456-7890"));

        // The transcript is append-only and survives within the session.
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/concierge")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Do you deliver to Lyon?"));
        assert!(body.contains("+1 (555) 456-7890"));
    }

    #[tokio::test]
    async fn test_concierge_rejects_blank_message() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/concierge/message")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("message=+++"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
