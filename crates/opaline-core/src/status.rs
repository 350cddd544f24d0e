//! # Order Status Machine
//!
//! The finite-state contract governing legal status transitions.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Status Transitions                             │
//! │                                                                         │
//! │   PENDING ──► PROCESSING ──► SHIPPED ──► DELIVERED (terminal)          │
//! │      │             │            │                                       │
//! │      └─────────────┴────────────┴──────► CANCELLED (terminal)          │
//! │                                                                         │
//! │   No transition leaves DELIVERED or CANCELLED.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The server is the authority: `OrderRepository::update_status` consults
//! this table before persisting and rejects anything else. The admin console
//! mirrors the same check purely as a UX convenience.

use crate::error::TransitionError;
use crate::types::OrderStatus;

impl OrderStatus {
    /// The statuses this one may legally move to.
    pub fn successors(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Processing, OrderStatus::Cancelled],
            OrderStatus::Processing => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Delivered, OrderStatus::Cancelled],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.successors().contains(&next)
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    /// Validates a requested transition, returning the target on success.
    pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
