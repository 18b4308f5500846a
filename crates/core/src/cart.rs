//! The session cart: lines, quantities, and derived totals.
//!
//! The cart is an explicit store object with a defined read/write
//! contract: views load it from the session, mutate it through the
//! operations here, and save it back. All operations are total - an
//! unknown id is a no-op, never an error.
//!
//! # Invariants
//!
//! - at most one [`CartLine`] per product id,
//! - every quantity is >= 1 (setting a quantity to 0 removes the line),
//! - lines keep the insertion order of their first add.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::ProductId;

/// One product's quantity entry within a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product as it was when first added.
    pub product: Product,
    /// Always >= 1 while the line exists.
    pub quantity: u32,
}

impl CartLine {
    /// Line total: `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// An insertion-ordered collection of cart lines.
///
/// Created empty at session start, mutated only through
/// [`add_item`](Cart::add_item) / [`set_quantity`](Cart::set_quantity),
/// and cleared wholesale on successful checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`.
    ///
    /// If a line for the product already exists its quantity is
    /// incremented by 1; otherwise a new line with quantity 1 is appended.
    /// Stock is not consulted.
    pub fn add_item(&mut self, product: Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product,
                quantity: 1,
            });
        }
    }

    /// Set the quantity of the line for `id`, replacing the previous value.
    ///
    /// A quantity of 0 removes the line; an unknown id is a no-op.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.lines.retain(|l| l.product.id != id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == id) {
            line.quantity = quantity;
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of `price * quantity` across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::Utc;

    fn product(name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::from(price),
            category: Category::LivingRoom,
            rating: 4.5,
            stock: 3,
            image: String::new(),
            images: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_merges_by_id() {
        let sofa = product("Serene Cloud Sofa", 2450);
        let mut cart = Cart::new();

        cart.add_item(sofa.clone());
        cart.add_item(sofa.clone());
        cart.add_item(sofa);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_add_item_preserves_first_add_order() {
        let sofa = product("Serene Cloud Sofa", 2450);
        let desk = product("Minimalist Oak Desk", 890);
        let lamp = product("Rose Quartz Lamp", 240);
        let mut cart = Cart::new();

        cart.add_item(sofa.clone());
        cart.add_item(desk.clone());
        cart.add_item(lamp.clone());
        // Re-adding an earlier product must not move its line.
        cart.add_item(desk.clone());

        let names: Vec<&str> = cart
            .lines()
            .iter()
            .map(|l| l.product.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Serene Cloud Sofa",
                "Minimalist Oak Desk",
                "Rose Quartz Lamp"
            ]
        );
    }

    #[test]
    fn test_add_item_ignores_stock() {
        // Stock is descriptive only; the cart never caps quantities on it.
        let lamp = product("Rose Quartz Lamp", 240);
        let stock = u32::try_from(lamp.stock).expect("non-negative stock");
        let mut cart = Cart::new();

        for _ in 0..stock + 2 {
            cart.add_item(lamp.clone());
        }

        assert_eq!(cart.count(), stock + 2);
    }

    #[test]
    fn test_set_quantity_replaces_not_increments() {
        let desk = product("Minimalist Oak Desk", 890);
        let id = desk.id;
        let mut cart = Cart::new();

        cart.add_item(desk);
        cart.set_quantity(id, 5);
        cart.set_quantity(id, 2);

        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let sofa = product("Serene Cloud Sofa", 2450);
        let id = sofa.id;
        let mut cart = Cart::new();

        cart.add_item(sofa);
        cart.set_quantity(id, 0);

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let sofa = product("Serene Cloud Sofa", 2450);
        let mut cart = Cart::new();
        cart.add_item(sofa);

        cart.set_quantity(ProductId::new(), 4);
        cart.set_quantity(ProductId::new(), 0);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_set_quantity_is_idempotent() {
        let desk = product("Minimalist Oak Desk", 890);
        let id = desk.id;
        let mut cart = Cart::new();
        cart.add_item(desk);

        cart.set_quantity(id, 3);
        let once = cart.clone();
        cart.set_quantity(id, 3);

        assert_eq!(once.count(), cart.count());
        assert_eq!(once.subtotal(), cart.subtotal());
        assert_eq!(once.lines().len(), cart.lines().len());
    }

    #[test]
    fn test_subtotal_and_count_worked_example() {
        // add A (price 100) twice, add B (price 50) once
        let a = product("A", 100);
        let b = product("B", 50);
        let a_id = a.id;
        let mut cart = Cart::new();

        cart.add_item(a.clone());
        cart.add_item(a);
        cart.add_item(b);

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.subtotal(), Decimal::from(250));

        cart.set_quantity(a_id, 0);

        assert_eq!(cart.count(), 1);
        assert_eq!(cart.subtotal(), Decimal::from(50));
    }

    #[test]
    fn test_zero_price_line_still_occupies_a_line() {
        let sample = product("Swatch Sample", 0);
        let mut cart = Cart::new();

        cart.add_item(sample);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_clear_empties_totals() {
        let sofa = product("Serene Cloud Sofa", 2450);
        let lamp = product("Rose Quartz Lamp", 240);
        let mut cart = Cart::new();
        cart.add_item(sofa);
        cart.add_item(lamp);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_fractional_prices_sum_exactly() {
        let mut cushion = product("Linen Cushion", 0);
        cushion.price = Decimal::new(4999, 2); // 49.99
        let id = cushion.id;
        let mut cart = Cart::new();

        cart.add_item(cushion);
        cart.set_quantity(id, 3);

        assert_eq!(cart.subtotal(), Decimal::new(14997, 2));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(product("Serene Cloud Sofa", 2450));
        cart.add_item(product("Rose Quartz Lamp", 240));

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(back.count(), cart.count());
        assert_eq!(back.subtotal(), cart.subtotal());
    }
}
