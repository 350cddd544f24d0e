//! # Checkout Math
//!
//! The shipping rule and order totals, used identically on both sides of the
//! wire: the submitting client computes them to build the payload, and the
//! server recomputes them to verify it.
//!
//! ## Shipping Rule
//! ```text
//! subtotal >  $100.00  →  shipping = $0.00  (free)
//! subtotal <= $100.00  →  shipping = $10.00 (flat fee)
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{NewOrder, NewOrderItem};
use crate::validation;
use crate::{FREE_SHIPPING_THRESHOLD_CENTS, SHIPPING_FEE_CENTS};

/// Shipping cost for a given item subtotal.
///
/// Free strictly above the threshold, flat fee otherwise.
pub fn shipping_cost_cents(subtotal_cents: i64) -> i64 {
    if subtotal_cents > FREE_SHIPPING_THRESHOLD_CENTS {
        0
    } else {
        SHIPPING_FEE_CENTS
    }
}

/// Grand total for a given item subtotal.
pub fn order_total_cents(subtotal_cents: i64) -> i64 {
    subtotal_cents + shipping_cost_cents(subtotal_cents)
}

/// Item subtotal of an order-creation payload.
pub fn items_subtotal_cents(items: &[NewOrderItem]) -> i64 {
    items.iter().map(|i| i.price_cents * i.quantity).sum()
}

/// Validates an order-creation payload.
///
/// ## Rules
/// - All shipping fields required (postal code optional)
/// - At least one item
/// - Every item: non-blank product/name, positive quantity, non-negative price
///
/// Payment method validity is enforced by the type system; an unknown label
/// never deserializes into [`crate::types::PaymentMethod`].
pub fn validate_new_order(order: &NewOrder) -> Result<(), ValidationError> {
    validate_required_fields(order)?;

    if order.order_items.is_empty() {
        return Err(ValidationError::Required {
            field: "orderItems".to_string(),
        });
    }

    for item in &order.order_items {
        validation::validate_required("productId", &item.product_id)?;
        validation::validate_required("name", &item.name)?;
        validation::validate_quantity(item.quantity)?;
        validation::validate_price_cents(item.price_cents)?;
    }

    Ok(())
}

fn validate_required_fields(order: &NewOrder) -> Result<(), ValidationError> {
    validation::validate_required("firstName", &order.first_name)?;
    validation::validate_required("lastName", &order.last_name)?;
    validation::validate_email(&order.email)?;
    validation::validate_required("phone", &order.phone)?;
    validation::validate_required("address", &order.address)?;
    validation::validate_required("city", &order.city)?;
    validation::validate_required("country", &order.country)?;
    Ok(())
}

/// Recomputes the grand total and rejects a payload whose client-computed
/// total disagrees.
pub fn verify_total(order: &NewOrder) -> CoreResult<i64> {
    let expected = order_total_cents(items_subtotal_cents(&order.order_items));

    if order.total_cents != expected {
        return Err(CoreError::TotalMismatch {
            expected_cents: expected,
            provided_cents: order.total_cents,
        });
    }

    Ok(expected)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;

    fn item(price_cents: i64, quantity: i64) -> NewOrderItem {
        NewOrderItem {
            product_id: "p1".into(),
            name: "Ring".into(),
            quantity,
            price_cents,
            image_url: None,
        }
    }

    fn order(items: Vec<NewOrderItem>, total_cents: i64) -> NewOrder {
        NewOrder {
            total_cents,
            payment_method: PaymentMethod::Cod,
            first_name: "Ada".into(),
            last_name: "Stone".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Gem Street".into(),
            city: "Antwerp".into(),
            country: "BE".into(),
            postal_code: None,
            idempotency_key: None,
            order_items: items,
        }
    }

    #[test]
    fn test_shipping_free_strictly_above_threshold() {
        // Boundary: exactly $100.00 still pays the fee.
        assert_eq!(shipping_cost_cents(10_000), SHIPPING_FEE_CENTS);
        assert_eq!(shipping_cost_cents(10_001), 0);
        assert_eq!(shipping_cost_cents(0), SHIPPING_FEE_CENTS);
    }

    #[test]
    fn test_total_above_threshold_has_no_fee() {
        // Subtotal $150 → free shipping, total $150.
        assert_eq!(order_total_cents(15_000), 15_000);
    }

    #[test]
    fn test_total_below_threshold_adds_fee() {
        // Items 20×2 + 30×1 = $70 subtotal → $80 with the flat fee.
        let items = vec![item(2000, 2), item(3000, 1)];
        let subtotal = items_subtotal_cents(&items);
        assert_eq!(subtotal, 7000);
        assert_eq!(order_total_cents(subtotal), 8000);
    }

    #[test]
    fn test_verify_total_accepts_matching_payload() {
        let items = vec![item(2000, 2), item(3000, 1)];
        let payload = order(items, 8000);
        assert_eq!(verify_total(&payload).unwrap(), 8000);
    }

    #[test]
    fn test_verify_total_rejects_mismatch() {
        let items = vec![item(2000, 2)];
        let payload = order(items, 4000); // missing the shipping fee
        assert!(matches!(
            verify_total(&payload),
            Err(CoreError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_items() {
        let payload = order(vec![], 0);
        assert!(validate_new_order(&payload).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_required_field() {
        let mut payload = order(vec![item(2000, 1)], 3000);
        payload.city = "  ".into();
        assert!(validate_new_order(&payload).is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_quantity() {
        let payload = order(vec![item(2000, 0)], 1000);
        assert!(validate_new_order(&payload).is_err());
    }

    #[test]
    fn test_validate_accepts_complete_payload() {
        let payload = order(vec![item(2000, 1)], 3000);
        assert!(validate_new_order(&payload).is_ok());
    }
}
