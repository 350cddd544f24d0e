//! # Error Types
//!
//! Domain-specific error types for opaline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  opaline-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                           │
//! │  ├── ValidationError  - Input validation failures                       │
//! │  └── TransitionError  - Illegal order status transitions                │
//! │                                                                         │
//! │  opaline-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  HTTP API errors (in apps/server)                                       │
//! │  └── ApiError         - What clients see (serialized)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// An order must carry at least one item.
    #[error("Order has no items")]
    EmptyOrder,

    /// Client-computed total disagrees with the server-side recomputation.
    ///
    /// The total is always `Σ(price × quantity) + shipping`; a mismatch means
    /// the submitting client used a different shipping rule or stale prices.
    #[error("Order total mismatch: expected {expected_cents}, got {provided_cents}")]
    TotalMismatch {
        expected_cents: i64,
        provided_cents: i64,
    },

    /// Illegal status transition (wraps TransitionError).
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before persistence runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Transition Error
// =============================================================================

/// An order status change the state machine forbids.
///
/// Surfaced as HTTP 409 by the server; the admin console must not apply the
/// requested status when it sees this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Illegal status transition: {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TotalMismatch {
            expected_cents: 8000,
            provided_cents: 7000,
        };
        assert_eq!(
            err.to_string(),
            "Order total mismatch: expected 8000, got 7000"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_transition_converts_to_core_error() {
        let transition_err = TransitionError {
            from: OrderStatus::Delivered,
            to: OrderStatus::Processing,
        };
        let core_err: CoreError = transition_err.into();
        assert!(matches!(core_err, CoreError::Transition(_)));
    }
}
