//! # Admin Order Console
//!
//! State container behind the back-office order management screen.
//!
//! ## Stale Response Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Request Generations                                        │
//! │                                                                         │
//! │  page 1 clicked ──► begin_refresh() = gen 1 ──► request A (slow)        │
//! │  page 2 clicked ──► begin_refresh() = gen 2 ──► request B (fast)        │
//! │                                                                         │
//! │  response B (gen 2) arrives ──► apply_page(2, ...) ──► applied          │
//! │  response A (gen 1) arrives ──► apply_page(1, ...) ──► DISCARDED        │
//! │                                                                         │
//! │  The screen always shows the page the admin asked for last.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The console never mutates order data itself; every change goes through
//! the API and the server's state machine. Local checks exist only to
//! disable impossible actions in the UI.

use tracing::debug;

use opaline_core::{Order, OrderPage, OrderStatus, PaginationState, DEFAULT_PAGE_SIZE};

/// State of the admin order listing and its dialogs.
#[derive(Debug)]
pub struct AdminOrderConsole {
    pagination: PaginationState,
    orders: Vec<Order>,
    /// Order opened in the detail view, if any.
    selected: Option<Order>,
    /// Order ID awaiting delete confirmation, if any.
    pending_delete: Option<String>,
    /// Monotonic counter identifying the newest list request.
    generation: u64,
    /// Generation of the request currently awaited, if any.
    in_flight: Option<u64>,
}

impl AdminOrderConsole {
    pub fn new() -> Self {
        AdminOrderConsole {
            pagination: PaginationState::new(1, DEFAULT_PAGE_SIZE, 0),
            orders: Vec::new(),
            selected: None,
            pending_delete: None,
            generation: 0,
            in_flight: None,
        }
    }

    // =========================================================================
    // Listing and pagination
    // =========================================================================

    /// Marks the start of a list refresh and returns its generation.
    ///
    /// The caller passes the generation back to [`apply_page`] with the
    /// response; anything but the newest generation is discarded.
    ///
    /// [`apply_page`]: AdminOrderConsole::apply_page
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.generation
    }

    /// Applies a fetched page if it answers the newest request.
    ///
    /// ## Returns
    /// `true` if the page was applied, `false` if it was stale.
    pub fn apply_page(&mut self, generation: u64, page: OrderPage) -> bool {
        if generation != self.generation {
            debug!(generation, newest = self.generation, "Discarded stale order page");
            return false;
        }

        self.in_flight = None;
        self.pagination = self.pagination.with_total(page.total_orders);
        self.orders = page.orders;
        true
    }

    /// Whether a list request is still unanswered.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Moves to the next page. Returns the page to fetch.
    pub fn next_page(&mut self) -> i64 {
        self.pagination = self.pagination.next_page();
        self.pagination.page
    }

    /// Moves to the previous page. Returns the page to fetch.
    pub fn prev_page(&mut self) -> i64 {
        self.pagination = self.pagination.prev_page();
        self.pagination.page
    }

    /// Jumps to a specific page (clamped). Returns the page to fetch.
    pub fn go_to_page(&mut self, page: i64) -> i64 {
        self.pagination =
            PaginationState::new(page, self.pagination.page_size, self.pagination.total_orders);
        self.pagination.page
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    // =========================================================================
    // Detail view and dialogs
    // =========================================================================

    pub fn select(&mut self, order: Order) {
        self.selected = Some(order);
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Order> {
        self.selected.as_ref()
    }

    /// Opens the delete confirmation dialog for an order.
    pub fn request_delete(&mut self, order_id: impl Into<String>) {
        self.pending_delete = Some(order_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    // =========================================================================
    // Mutation bookkeeping
    // =========================================================================

    /// Records a confirmed delete and reconciles pagination locally.
    ///
    /// ## Returns
    /// The page to refetch. Deleting the only order on the last page lands
    /// on the new last page instead of an empty one.
    pub fn note_deleted(&mut self, order_id: &str) -> i64 {
        self.orders.retain(|o| o.id != order_id);
        if self.selected.as_ref().is_some_and(|o| o.id == order_id) {
            self.selected = None;
        }
        self.pending_delete = None;
        self.pagination = self.pagination.after_delete();
        self.pagination.page
    }

    /// Replaces an order in place after a status change round-trip.
    pub fn note_updated(&mut self, updated: Order) {
        if let Some(existing) = self.orders.iter_mut().find(|o| o.id == updated.id) {
            *existing = updated.clone();
        }
        if self.selected.as_ref().is_some_and(|o| o.id == updated.id) {
            self.selected = Some(updated);
        }
    }

    /// Statuses the UI should offer for an order.
    ///
    /// Mirrors the server-side state machine so the console never offers a
    /// move the server would refuse.
    pub fn available_transitions(order: &Order) -> &'static [OrderStatus] {
        order.status.successors()
    }
}

impl Default for AdminOrderConsole {
    fn default() -> Self {
        AdminOrderConsole::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use opaline_core::PaymentMethod;

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            order_number: format!("OP-20260827-{id}"),
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::Cod,
            first_name: "Ada".into(),
            last_name: "Stone".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Gem Street".into(),
            city: "Antwerp".into(),
            country: "BE".into(),
            postal_code: None,
            total_cents: 3000,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            items: vec![],
        }
    }

    fn page(ids: &[&str], total: i64) -> OrderPage {
        OrderPage {
            orders: ids.iter().map(|id| order(id)).collect(),
            total_orders: total,
            total_pages: (total + 9) / 10,
        }
    }

    #[test]
    fn test_apply_page_updates_state() {
        let mut console = AdminOrderConsole::new();
        let gen = console.begin_refresh();

        assert!(console.is_loading());
        assert!(console.apply_page(gen, page(&["a", "b"], 2)));
        assert!(!console.is_loading());
        assert_eq!(console.orders().len(), 2);
        assert_eq!(console.pagination().total_orders, 2);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut console = AdminOrderConsole::new();

        let slow = console.begin_refresh();
        let fast = console.begin_refresh();

        // Newest answer lands first and wins.
        assert!(console.apply_page(fast, page(&["b"], 1)));
        // The older answer arrives late and must not clobber it.
        assert!(!console.apply_page(slow, page(&["a"], 1)));

        assert_eq!(console.orders()[0].id, "b");
    }

    #[test]
    fn test_delete_reconciles_pagination() {
        let mut console = AdminOrderConsole::new();
        let gen = console.begin_refresh();
        // 11 orders, page 2 holds exactly one.
        console.apply_page(gen, page(&["k"], 11));
        console.go_to_page(2);

        let refetch = console.note_deleted("k");
        assert_eq!(refetch, 1);
        assert_eq!(console.pagination().total_orders, 10);
        assert!(console.orders().is_empty());
    }

    #[test]
    fn test_delete_clears_dialogs_and_selection() {
        let mut console = AdminOrderConsole::new();
        console.select(order("a"));
        console.request_delete("a");

        console.note_deleted("a");
        assert!(console.selected().is_none());
        assert!(console.pending_delete().is_none());
    }

    #[test]
    fn test_note_updated_replaces_in_list_and_detail() {
        let mut console = AdminOrderConsole::new();
        let gen = console.begin_refresh();
        console.apply_page(gen, page(&["a"], 1));
        console.select(order("a"));

        let mut updated = order("a");
        updated.status = OrderStatus::Processing;
        console.note_updated(updated);

        assert_eq!(console.orders()[0].status, OrderStatus::Processing);
        assert_eq!(console.selected().unwrap().status, OrderStatus::Processing);
    }

    #[test]
    fn test_available_transitions_mirror_state_machine() {
        let mut o = order("a");
        assert_eq!(
            AdminOrderConsole::available_transitions(&o),
            &[OrderStatus::Processing, OrderStatus::Cancelled]
        );

        o.status = OrderStatus::Delivered;
        assert!(AdminOrderConsole::available_transitions(&o).is_empty());
    }
}
