//! # Cart Store
//!
//! The stateful cart container a storefront UI binds to.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore                                       │
//! │                                                                         │
//! │  UI Action                 Store Method            Side Effect          │
//! │  ─────────                 ────────────            ───────────          │
//! │  Click "Add to cart" ────► add_item() ───────────► mutate + persist     │
//! │  Change quantity ────────► update_quantity() ────► mutate + persist     │
//! │  Click remove ───────────► remove_item() ────────► mutate + persist     │
//! │  Checkout success ───────► clear() ──────────────► mutate + persist     │
//! │  Toggle cart panel ──────► toggle_panel() ───────► memory only          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every cart mutation is written through to storage immediately; the panel
//! flag never is. A corrupt or missing snapshot degrades to an empty cart.

use tracing::{debug, warn};

use opaline_core::{Cart, CartItem, Product};

use crate::error::ClientResult;
use crate::storage::{CartStorage, PersistedCart};

/// Persistent cart state container.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    panel_open: bool,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Creates a store, restoring the persisted cart if one exists.
    ///
    /// A snapshot that fails to load is treated as absent; a jewelry cart
    /// is not worth refusing to start over.
    pub fn new(storage: S) -> Self {
        let cart = match storage.load() {
            Ok(Some(snapshot)) => {
                debug!(items = snapshot.cart.len(), "Restored persisted cart");
                Cart {
                    items: snapshot.cart,
                }
            }
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(error = %err, "Failed to load persisted cart, starting empty");
                Cart::new()
            }
        };

        CartStore {
            cart,
            panel_open: false,
            storage,
        }
    }

    // =========================================================================
    // Mutations (write-through)
    // =========================================================================

    /// Adds a product to the cart, or bumps its quantity if present.
    ///
    /// ## Returns
    /// The resulting quantity for this product. Compare against the request
    /// to detect stock clamping.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> ClientResult<i64> {
        let resulting = self.cart.add_item(product, quantity);
        self.persist()?;
        Ok(resulting)
    }

    /// Sets an item quantity, clamped to `[1, stock ceiling]`.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> ClientResult<()> {
        self.cart.update_quantity(product_id, quantity);
        self.persist()
    }

    /// Removes an item. No-op if absent.
    pub fn remove_item(&mut self, product_id: &str) -> ClientResult<()> {
        self.cart.remove_item(product_id);
        self.persist()
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> ClientResult<()> {
        self.cart.clear();
        self.persist()
    }

    // =========================================================================
    // Panel flag (transient)
    // =========================================================================

    /// Toggles the cart panel. Never persisted.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn set_panel_open(&mut self, open: bool) {
        self.panel_open = open;
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.cart.subtotal_cents()
    }

    pub fn total_quantity(&self) -> i64 {
        self.cart.total_quantity()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn persist(&self) -> ClientResult<()> {
        self.storage.save(&PersistedCart {
            cart: self.cart.items.clone(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
