//! # Domain Types
//!
//! Core domain types used throughout the Opaline storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  order_number   │   │  order_id (FK)  │       │
//! │  │  price_cents    │   │  status         │   │  name (frozen)  │       │
//! │  │  stock_quantity │   │  total_cents    │   │  price (frozen) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │         ┌─────────────────┐   ┌─────────────────┐                      │
//! │         │  OrderStatus    │   │ PaymentMethod   │                      │
//! │         │  ─────────────  │   │  ─────────────  │                      │
//! │         │  Pending        │   │  Card           │                      │
//! │         │  Processing     │   │  Cod            │                      │
//! │         │  Shipped        │   └─────────────────┘                      │
//! │         │  Delivered      │                                            │
//! │         │  Cancelled      │                                            │
//! │         └─────────────────┘                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Money
//! All monetary values are integer cents (`i64`). Never floats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product (catalog collaborator record)
// =============================================================================

/// The minimal product record the cart consumes from the catalog.
///
/// The catalog itself (query, filters, images, CMS) is an external
/// collaborator; the cart only ever sees this slice of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    pub name: String,

    /// Price in cents (smallest currency unit).
    #[serde(rename = "price")]
    pub price_cents: i64,

    /// Available inventory at the time of the lookup.
    pub stock_quantity: i64,

    /// Image URLs, first one is the display image.
    pub images: Vec<String>,
}

impl Product {
    /// First image URL, if the product has any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// Legal transitions are owned by [`crate::status`]; everything else in the
/// system goes through that module instead of assigning statuses freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Initial status of every created order.
    Pending,
    /// Order accepted and being prepared.
    Processing,
    /// Order handed to the carrier.
    Shipped,
    /// Order received by the customer (terminal).
    Delivered,
    /// Order cancelled before delivery (terminal).
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer intends to pay.
///
/// Recorded as a label only; no gateway integration happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Card payment (details captured by the form, not processed).
    Card,
    /// Cash on delivery.
    Cod,
}

// =============================================================================
// Order
// =============================================================================

/// A completed checkout submission.
///
/// Immutable except for `status` and `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Unique, server-generated business identifier (e.g. `OP-20260827-4F2A91C3`).
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    /// Grand total in cents: `Σ(item price × quantity) + shipping`.
    #[serde(rename = "total")]
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Hydrated separately from the `order_items` table.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Item subtotal in cents (total minus shipping).
    pub fn subtotal_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|i| i.price_cents * i.quantity)
            .sum()
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Snapshot pattern: product name, price and image are frozen at purchase
/// time, independent of later catalog edits. Never mutated, destroyed only
/// by cascade delete with the parent order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product name at purchase time (frozen).
    pub name: String,
    pub quantity: i64,
    /// Unit price in cents at purchase time (frozen).
    #[serde(rename = "price")]
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents * self.quantity
    }
}

// =============================================================================
// Order Creation Payload
// =============================================================================

/// Body of `POST /orders`, shared by the submitting client and the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Client-computed grand total in cents; the server recomputes and
    /// rejects a mismatch.
    #[serde(rename = "total")]
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Client-generated token letting the server discard duplicate retries
    /// of the same logical submission.
    #[serde(default)]
    pub idempotency_key: Option<String>,
    pub order_items: Vec<NewOrderItem>,
}

/// One line of an order-creation payload, derived 1:1 from a cart item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    #[serde(rename = "price")]
    pub price_cents: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================================
// Order Page (admin listing)
// =============================================================================

/// One page of the admin order listing, newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total_orders: i64,
    pub total_pages: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");

        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Card).unwrap(),
            "\"CARD\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cod).unwrap(),
            "\"COD\""
        );
    }

    #[test]
    fn test_new_order_wire_names() {
        let body = serde_json::json!({
            "total": 8000,
            "paymentMethod": "COD",
            "firstName": "Ada",
            "lastName": "Stone",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "1 Gem Street",
            "city": "Antwerp",
            "country": "BE",
            "orderItems": [
                { "productId": "p1", "name": "Ring", "quantity": 2, "price": 2000 },
                { "productId": "p2", "name": "Chain", "quantity": 1, "price": 3000 }
            ]
        });

        let order: NewOrder = serde_json::from_value(body).unwrap();
        assert_eq!(order.total_cents, 8000);
        assert_eq!(order.payment_method, PaymentMethod::Cod);
        assert_eq!(order.order_items.len(), 2);
        assert_eq!(order.order_items[0].price_cents, 2000);
        assert!(order.postal_code.is_none());
        assert!(order.idempotency_key.is_none());
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            id: "i1".into(),
            order_id: "o1".into(),
            product_id: "p1".into(),
            name: "Ring".into(),
            quantity: 3,
            price_cents: 2500,
            image_url: None,
            created_at: Utc::now(),
        };
        assert_eq!(item.line_total_cents(), 7500);
    }

    #[test]
    fn test_primary_image() {
        let product = Product {
            id: "p1".into(),
            name: "Ring".into(),
            price_cents: 2000,
            stock_quantity: 5,
            images: vec!["a.jpg".into(), "b.jpg".into()],
        };
        assert_eq!(product.primary_image(), Some("a.jpg"));
    }
}
