//! # Checkout Submission
//!
//! The checkout form and the submitter that turns a cart into an order.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Submission                                 │
//! │                                                                         │
//! │  validate form ──fail──► ValidationError (nothing sent)                 │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  build NewOrder (items 1:1, totals recomputed, idempotency key)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /orders ──────┬── success ──► clear cart, rotate key              │
//! │                     └── failure ──► keep cart AND key (safe retry)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Idempotency Key
//! One UUID per logical submission. It survives failed attempts so the
//! server can deduplicate a retry, and is rotated only after a success so
//! the next purchase is a new submission.
//!
//! ## Card Details
//! Card fields are validated for presence when paying by card but never
//! leave this struct: the order payload records the payment method label
//! only.

use tracing::{debug, info, warn};
use uuid::Uuid;

use opaline_core::checkout::{items_subtotal_cents, order_total_cents, validate_new_order};
use opaline_core::{Cart, NewOrder, NewOrderItem, PaymentMethod, Order, ValidationError};

use crate::api::ApiClient;
use crate::cart_store::CartStore;
use crate::error::{ClientError, ClientResult};
use crate::storage::CartStorage;

// =============================================================================
// Checkout Form
// =============================================================================

/// The customer-facing checkout form.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub payment_method: PaymentMethod,
    /// Captured for the payment step, never serialized into the payload.
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        CheckoutForm {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            postal_code: None,
            payment_method: PaymentMethod::Cod,
            card_number: String::new(),
            card_expiry: String::new(),
            card_cvc: String::new(),
        }
    }
}

impl CheckoutForm {
    /// Validates the form fields.
    ///
    /// Card detail fields are required only when paying by card.
    pub fn validate(&self) -> Result<(), ValidationError> {
        use opaline_core::validation;

        validation::validate_required("firstName", &self.first_name)?;
        validation::validate_required("lastName", &self.last_name)?;
        validation::validate_email(&self.email)?;
        validation::validate_required("phone", &self.phone)?;
        validation::validate_required("address", &self.address)?;
        validation::validate_required("city", &self.city)?;
        validation::validate_required("country", &self.country)?;

        if self.payment_method == PaymentMethod::Card {
            validation::validate_required("cardNumber", &self.card_number)?;
            validation::validate_required("cardExpiry", &self.card_expiry)?;
            validation::validate_required("cardCvc", &self.card_cvc)?;
        }

        Ok(())
    }
}

// =============================================================================
// Checkout Submitter
// =============================================================================

/// Drives a cart through checkout into a stored order.
#[derive(Debug)]
pub struct CheckoutSubmitter {
    pub form: CheckoutForm,
    idempotency_key: String,
    in_flight: bool,
}

impl CheckoutSubmitter {
    pub fn new() -> Self {
        CheckoutSubmitter {
            form: CheckoutForm::default(),
            idempotency_key: Uuid::new_v4().to_string(),
            in_flight: false,
        }
    }

    /// Key that will be attached to the next submission.
    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Builds the order payload from the form and the cart.
    ///
    /// ## Behavior
    /// - Form and cart are validated first; a failure sends nothing
    /// - Cart items map 1:1 onto order items (snapshotted name/price/image)
    /// - The grand total is computed here with the shared shipping rule
    /// - The current idempotency key is attached
    pub fn build_request(&self, cart: &Cart) -> ClientResult<NewOrder> {
        self.form.validate()?;

        if cart.is_empty() {
            return Err(ClientError::Validation(ValidationError::Required {
                field: "orderItems".to_string(),
            }));
        }

        let order_items: Vec<NewOrderItem> = cart
            .items
            .iter()
            .map(|item| NewOrderItem {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                price_cents: item.unit_price_cents,
                image_url: item.image_url.clone(),
            })
            .collect();

        let total_cents = order_total_cents(items_subtotal_cents(&order_items));

        let order = NewOrder {
            total_cents,
            payment_method: self.form.payment_method,
            first_name: self.form.first_name.clone(),
            last_name: self.form.last_name.clone(),
            email: self.form.email.clone(),
            phone: self.form.phone.clone(),
            address: self.form.address.clone(),
            city: self.form.city.clone(),
            country: self.form.country.clone(),
            postal_code: self.form.postal_code.clone(),
            idempotency_key: Some(self.idempotency_key.clone()),
            order_items,
        };

        validate_new_order(&order).map_err(ClientError::Validation)?;

        Ok(order)
    }

    /// Submits the cart as an order.
    ///
    /// ## Behavior
    /// - Rejected immediately while a previous submission is in flight
    /// - On success: the cart is cleared and the idempotency key rotated
    /// - On any failure (validation, network, server): cart and key are
    ///   left untouched so the user can retry the same submission
    pub async fn submit<S: CartStorage>(
        &mut self,
        api: &ApiClient,
        store: &mut CartStore<S>,
    ) -> ClientResult<Order> {
        if self.in_flight {
            return Err(ClientError::InFlight);
        }

        let payload = self.build_request(store.cart())?;

        debug!(
            total_cents = payload.total_cents,
            items = payload.order_items.len(),
            "Submitting checkout"
        );

        let result = {
            let _guard = InFlightGuard::arm(&mut self.in_flight);
            api.create_order(&payload).await
        };

        match result {
            Ok(order) => {
                info!(order_number = %order.order_number, "Order placed");
                store.clear()?;
                self.idempotency_key = Uuid::new_v4().to_string();
                Ok(order)
            }
            Err(err) => {
                warn!(error = %err, "Checkout submission failed, cart preserved");
                Err(err)
            }
        }
    }
}

impl Default for CheckoutSubmitter {
    fn default() -> Self {
        CheckoutSubmitter::new()
    }
}

/// Clears the in-flight flag on drop, so a submission future abandoned
/// mid-await (UI navigation, a timeout wrapper) cannot wedge the submitter
/// into refusing every later attempt.
struct InFlightGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlightGuard<'a> {
    fn arm(flag: &'a mut bool) -> Self {
        *flag = true;
        InFlightGuard { flag }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use opaline_core::Product;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".into(),
            last_name: "Stone".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Gem Street".into(),
            city: "Antwerp".into(),
            country: "BE".into(),
            ..CheckoutForm::default()
        }
    }

    fn product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            stock_quantity: stock,
            images: vec![],
        }
    }

    fn cart_with(items: &[(&str, i64, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (id, price, qty) in items {
            cart.add_item(&product(id, *price, 99), *qty);
        }
        cart
    }

    #[test]
    fn test_build_request_totals_and_key() {
        let mut submitter = CheckoutSubmitter::new();
        submitter.form = filled_form();

        // 20×2 + 30×1 = $70 subtotal, below threshold → $80 total.
        let cart = cart_with(&[("p1", 2000, 2), ("p2", 3000, 1)]);
        let payload = submitter.build_request(&cart).unwrap();

        assert_eq!(payload.total_cents, 8000);
        assert_eq!(payload.order_items.len(), 2);
        assert_eq!(
            payload.idempotency_key.as_deref(),
            Some(submitter.idempotency_key())
        );
    }

    #[test]
    fn test_build_request_free_shipping_above_threshold() {
        let mut submitter = CheckoutSubmitter::new();
        submitter.form = filled_form();

        let cart = cart_with(&[("p1", 15_000, 1)]);
        let payload = submitter.build_request(&cart).unwrap();
        assert_eq!(payload.total_cents, 15_000);
    }

    #[test]
    fn test_empty_cart_fails_fast() {
        let mut submitter = CheckoutSubmitter::new();
        submitter.form = filled_form();

        let err = submitter.build_request(&Cart::new()).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_invalid_form_fails_fast() {
        let mut submitter = CheckoutSubmitter::new();
        submitter.form = filled_form();
        submitter.form.email = "not-an-email".into();

        let cart = cart_with(&[("p1", 2000, 1)]);
        assert!(submitter.build_request(&cart).is_err());
    }

    #[test]
    fn test_card_fields_required_only_for_card() {
        let mut form = filled_form();
        assert!(form.validate().is_ok());

        form.payment_method = PaymentMethod::Card;
        assert!(form.validate().is_err());

        form.card_number = "4242 4242 4242 4242".into();
        form.card_expiry = "12/30".into();
        form.card_cvc = "123".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_key_stable_across_builds() {
        // Retrying the same logical submission reuses the key.
        let mut submitter = CheckoutSubmitter::new();
        submitter.form = filled_form();
        let cart = cart_with(&[("p1", 2000, 1)]);

        let first = submitter.build_request(&cart).unwrap();
        let second = submitter.build_request(&cart).unwrap();
        assert_eq!(first.idempotency_key, second.idempotency_key);
    }

    #[tokio::test]
    async fn test_abandoned_submit_does_not_wedge_the_guard() {
        let mut submitter = CheckoutSubmitter::new();
        submitter.form = filled_form();

        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(&product("p1", 2000, 5), 2).unwrap();

        // Non-routable address: the request either hangs until the timeout
        // drops the future mid-await, or fails outright. Neither outcome
        // may leave the submitter refusing later attempts.
        let api = ApiClient::new("http://10.255.255.1:81").unwrap();
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            submitter.submit(&api, &mut store),
        )
        .await;

        if let Ok(Ok(_)) = result {
            panic!("no server should have answered");
        }

        assert!(!submitter.is_in_flight());
        assert!(submitter.build_request(store.cart()).is_ok());
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_cart_and_key() {
        let mut submitter = CheckoutSubmitter::new();
        submitter.form = filled_form();
        let key_before = submitter.idempotency_key().to_string();

        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(&product("p1", 2000, 5), 2).unwrap();

        // Nothing listens here; the request fails at connect.
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let result = submitter.submit(&api, &mut store).await;

        assert!(matches!(result, Err(ClientError::Network(_))));
        assert_eq!(store.total_quantity(), 2);
        assert_eq!(submitter.idempotency_key(), key_before);
        assert!(!submitter.is_in_flight());
    }
}
