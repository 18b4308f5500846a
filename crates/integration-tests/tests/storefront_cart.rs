//! Integration tests for the storefront cart and checkout flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database, migrated and seeded
//! - The storefront server running (cargo run -p atelier-storefront)
//!
//! Run with: cargo test -p atelier-integration-tests -- --ignored

use atelier_integration_tests::{client, pool, storefront_base_url};

/// Look up a seeded product id directly from the catalog.
async fn any_product_id() -> String {
    let pool = pool().await;
    let id: uuid::Uuid = sqlx::query_scalar("SELECT id FROM products LIMIT 1")
        .fetch_one(&pool)
        .await
        .expect("catalog must be seeded");
    id.to_string()
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_health() {
    let response = client()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_add_opens_cart_and_updates_count() {
    let base = storefront_base_url();
    let client = client();
    let product_id = any_product_id().await;

    let response = client
        .post(format!("{base}/cart/add"))
        .form(&[("product_id", product_id.as_str())])
        .send()
        .await
        .expect("add failed");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-opened")
    );

    let count = client
        .get(format!("{base}/cart/count"))
        .send()
        .await
        .expect("count failed")
        .text()
        .await
        .expect("count body");
    assert!(count.contains('1'), "expected a count of 1, got: {count}");
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_checkout_clears_cart_and_confirms() {
    let base = storefront_base_url();
    let client = client();
    let product_id = any_product_id().await;

    // Two adds of the same product merge into one line with quantity 2.
    for _ in 0..2 {
        client
            .post(format!("{base}/cart/add"))
            .form(&[("product_id", product_id.as_str())])
            .send()
            .await
            .expect("add failed");
    }

    let cart_page = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .expect("cart failed")
        .text()
        .await
        .expect("cart body");
    assert!(cart_page.contains("Subtotal"));

    let confirmation = client
        .post(format!("{base}/checkout"))
        .form(&[
            ("first_name", "Ada"),
            ("last_name", "Laurent"),
            ("address", "1 Rue Lumen"),
            ("city", "Lyon"),
            ("postal_code", "69001"),
        ])
        .send()
        .await
        .expect("checkout failed")
        .text()
        .await
        .expect("checkout body");
    assert!(confirmation.contains("Gratitude"));

    // The cart is cleared wholesale after checkout.
    let count = client
        .get(format!("{base}/cart/count"))
        .send()
        .await
        .expect("count failed")
        .text()
        .await
        .expect("count body");
    assert!(!count.contains("cart-badge"), "cart should be empty: {count}");
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_set_quantity_zero_removes_line() {
    let base = storefront_base_url();
    let client = client();
    let product_id = any_product_id().await;

    client
        .post(format!("{base}/cart/add"))
        .form(&[("product_id", product_id.as_str())])
        .send()
        .await
        .expect("add failed");

    let fragment = client
        .post(format!("{base}/cart/update"))
        .form(&[("product_id", product_id.as_str()), ("quantity", "0")])
        .send()
        .await
        .expect("update failed")
        .text()
        .await
        .expect("update body");
    assert!(fragment.contains("Your basket is empty"));
}
