//! The catalog `Product` record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Category, ProductId};

/// A catalog piece.
///
/// Owned by the catalog / admin CRUD; immutable from the cart's
/// perspective (the cart keeps a snapshot of the product it was added
/// with). `stock` is advisory only - it is never enforced as a cap on
/// cart quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    /// Opaque, stable identity.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in USD; always >= 0.
    pub price: Decimal,
    pub category: Category,
    /// Average customer rating, 0.0 - 5.0.
    pub rating: f32,
    /// Units on hand; descriptive, not a reservation.
    pub stock: i32,
    /// Primary image URL.
    pub image: String,
    /// Ordered gallery, primary first by convention.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the piece is running low (fewer than five units on hand).
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock < 5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample(name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Decimal::from(price),
            category: Category::LivingRoom,
            rating: 4.8,
            stock: 10,
            image: "https://example.test/image.jpg".to_string(),
            images: vec!["https://example.test/image.jpg".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_threshold() {
        let mut product = sample("Serene Cloud Sofa", 2450);
        assert!(!product.is_low_stock());
        product.stock = 4;
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_serde_round_trip() {
        let product = sample("Minimalist Oak Desk", 890);
        let json = serde_json::to_string(&product).expect("serialize");
        let back: Product = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(product.id, back.id);
        assert_eq!(product.price, back.price);
        assert_eq!(product.category, back.category);
    }
}
