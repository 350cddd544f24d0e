//! # Pagination
//!
//! Pagination state for the admin order listing.
//!
//! ## Invariants
//! - `total_pages == ceil(total_orders / page_size)`
//! - `1 <= page <= max(1, total_pages)`
//!
//! The server computes `total_pages` when listing; the admin console carries
//! this state and reconciles it locally after a delete before refetching.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_PAGE_SIZE;

/// Pagination state of the admin order listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// Current page, 1-based.
    pub page: i64,
    pub page_size: i64,
    pub total_orders: i64,
    pub total_pages: i64,
}

impl PaginationState {
    /// Creates pagination state for a known total, clamping `page` into range.
    pub fn new(page: i64, page_size: i64, total_orders: i64) -> Self {
        let page_size = page_size.max(1);
        let total_orders = total_orders.max(0);
        let total_pages = total_pages_for(total_orders, page_size);

        PaginationState {
            page: page.clamp(1, total_pages.max(1)),
            page_size,
            total_orders,
            total_pages,
        }
    }

    /// Applies a fresh total from the server, keeping `page` in range.
    pub fn with_total(self, total_orders: i64) -> Self {
        PaginationState::new(self.page, self.page_size, total_orders)
    }

    /// Reconciles state after one order was deleted.
    ///
    /// Decrements the total, recomputes `total_pages` and clamps `page`, so
    /// deleting the only order on the last page lands on the new last page.
    pub fn after_delete(self) -> Self {
        self.with_total(self.total_orders - 1)
    }

    /// Moves to the next page, saturating at the last one.
    pub fn next_page(self) -> Self {
        PaginationState::new(self.page + 1, self.page_size, self.total_orders)
    }

    /// Moves to the previous page, saturating at the first one.
    pub fn prev_page(self) -> Self {
        PaginationState::new(self.page - 1, self.page_size, self.total_orders)
    }

    /// Row offset of the current page for a `LIMIT/OFFSET` query.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}

/// `ceil(total / page_size)` without floating point.
pub fn total_pages_for(total: i64, page_size: i64) -> i64 {
    let page_size = page_size.max(1);
    (total.max(0) + page_size - 1) / page_size
}

// =============================================================================
// Unit Tests
// =============================================================================
