//! # Cart
//!
//! Client-held, pre-purchase collection of line items, one per product.
//!
//! ## Invariants
//! - Items are unique by `product_id` (adding the same product merges)
//! - `1 <= quantity <= max_quantity` for every item
//! - `unit_price_cents` is a snapshot: later catalog price changes never
//!   retroactively alter items already in the cart
//!
//! ## Clamping, not rejecting
//! Out-of-range quantity requests are silently clamped to the stock ceiling
//! rather than rejected. Mutations report the resulting quantity so a UI can
//! surface a "stock limit reached" notice if it wants one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Product;

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog product
/// - `unit_price_cents` / `image_url`: frozen copies taken when the item
///   entered the cart
/// - `max_quantity`: the stock ceiling at add-time, bounding later increases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart-local identity (UUID).
    pub id: String,

    pub product_id: String,

    /// Product name at add-time (frozen).
    pub name: String,

    /// Price in cents at add-time (frozen).
    pub unit_price_cents: i64,

    pub quantity: i64,

    /// Display image at add-time (frozen).
    pub image_url: Option<String>,

    /// Stock ceiling: available inventory when the item entered the cart.
    pub max_quantity: i64,
}

impl CartItem {
    /// Creates a cart item from a product, clamping quantity to stock.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: quantity.min(product.stock_quantity),
            image_url: product.primary_image().map(String::from),
            max_quantity: product.stock_quantity,
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart, in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Existing item: quantity becomes `min(existing + qty, stock)`, and
    ///   the stock ceiling is refreshed from the product
    /// - New item: inserted with quantity `min(qty, stock)` and price/image
    ///   snapshotted at this instant
    /// - Zero stock: nothing is inserted, and an existing line for the
    ///   product is dropped, so no item ever sits at quantity 0
    ///
    /// ## Returns
    /// The resulting quantity for this product (0 when not inserted).
    /// Callers compare against what they asked for to detect clamping.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> i64 {
        let quantity = quantity.max(0);

        if let Some(pos) = self.items.iter().position(|i| i.product_id == product.id) {
            // Stock gone since the item entered the cart: merging would
            // leave quantity at 0 and break the quantity >= 1 invariant.
            if product.stock_quantity < 1 {
                self.items.remove(pos);
                return 0;
            }

            let item = &mut self.items[pos];
            item.quantity = (item.quantity + quantity).min(product.stock_quantity);
            item.max_quantity = product.stock_quantity;
            return item.quantity;
        }

        if product.stock_quantity < 1 || quantity < 1 {
            return 0;
        }

        let item = CartItem::from_product(product, quantity);
        let resulting = item.quantity;
        self.items.push(item);
        resulting
    }

    /// Sets the quantity of an item, clamped to `[1, max_quantity]`.
    ///
    /// No-op if the product is not in the cart. Idempotent: applying the
    /// same target twice yields identical state.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity.clamp(1, item.max_quantity.max(1));
        }
    }

    /// Removes an item by product ID. No-op if absent.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Looks up the cart line for a product.
    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Item subtotal in cents (before shipping).
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            stock_quantity: stock,
            images: vec![format!("{}.jpg", id)],
        }
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let p = product("1", 999, 10);

        let qty = cart.add_item(&p, 2);

        assert_eq!(qty, 2);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal_cents(), 1998);
        assert_eq!(cart.get("1").unwrap().image_url.as_deref(), Some("1.jpg"));
    }

    #[test]
    fn test_add_same_product_saturates_at_stock() {
        // Stock 5: 3 + 3 clamps to 5, not 6.
        let mut cart = Cart::new();
        let p = product("1", 999, 5);

        assert_eq!(cart.add_item(&p, 3), 3);
        assert_eq!(cart.add_item(&p, 3), 5);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_repeated_adds_never_exceed_stock() {
        // Final quantity = min(sum requested, stock) for any sequence.
        let mut cart = Cart::new();
        let p = product("1", 100, 7);

        let mut requested = 0;
        for qty in [1, 2, 5, 3] {
            requested += qty;
            let got = cart.add_item(&p, qty);
            assert_eq!(got, requested.min(7));
        }
        assert_eq!(cart.total_quantity(), 7);
    }

    #[test]
    fn test_price_is_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut p = product("1", 1000, 10);

        cart.add_item(&p, 1);
        p.price_cents = 9999;
        cart.add_item(&p, 1);

        assert_eq!(cart.get("1").unwrap().unit_price_cents, 1000);
        assert_eq!(cart.subtotal_cents(), 2000);
    }

    #[test]
    fn test_zero_stock_not_inserted() {
        let mut cart = Cart::new();
        let p = product("1", 999, 0);

        assert_eq!(cart.add_item(&p, 3), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_after_stock_drops_to_zero_removes_item() {
        let mut cart = Cart::new();
        let mut p = product("1", 999, 5);
        cart.add_item(&p, 2);

        // The product sold out after the item entered the cart.
        p.stock_quantity = 0;
        assert_eq!(cart.add_item(&p, 1), 0);
        assert!(cart.is_empty());

        // A later quantity edit for the gone line stays a no-op.
        cart.update_quantity("1", 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_never_below_one_after_merge() {
        // Invariant: 1 <= quantity <= max_quantity for every item in the cart.
        let mut cart = Cart::new();
        let mut p = product("1", 999, 5);
        cart.add_item(&p, 3);

        for stock in [5, 2, 1] {
            p.stock_quantity = stock;
            cart.add_item(&p, 1);
            let item = cart.get("1").unwrap();
            assert!(item.quantity >= 1);
            assert!(item.quantity <= item.max_quantity);
        }
    }

    #[test]
    fn test_update_quantity_clamps_both_ends() {
        let mut cart = Cart::new();
        let p = product("1", 999, 5);
        cart.add_item(&p, 2);

        cart.update_quantity("1", 99);
        assert_eq!(cart.get("1").unwrap().quantity, 5);

        cart.update_quantity("1", 0);
        assert_eq!(cart.get("1").unwrap().quantity, 1);
    }

    #[test]
    fn test_update_quantity_is_idempotent() {
        let mut cart = Cart::new();
        let p = product("1", 999, 9);
        cart.add_item(&p, 1);

        cart.update_quantity("1", 4);
        let once = cart.clone();
        cart.update_quantity("1", 4);

        assert_eq!(cart.items, once.items);
    }

    #[test]
    fn test_update_absent_product_is_noop() {
        let mut cart = Cart::new();
        cart.update_quantity("ghost", 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_and_noop_when_absent() {
        let mut cart = Cart::new();
        let p = product("1", 999, 5);
        cart.add_item(&p, 2);

        cart.remove_item("ghost");
        assert_eq!(cart.item_count(), 1);

        cart.remove_item("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999, 5), 2);
        cart.add_item(&product("2", 500, 5), 1);

        cart.clear();
        assert!(cart.is_empty());
    }
}
