//! # opaline-core: Pure Business Logic for the Opaline Storefront
//!
//! This crate is the **heart** of the cart and order lifecycle. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Opaline Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────┐   ┌─────────────────────────────────┐  │
//! │  │   opaline-client            │   │   apps/server                   │  │
//! │  │   CartStore, Checkout,      │   │   POST /orders                  │  │
//! │  │   AdminOrderConsole         │   │   /admin/orders/*               │  │
//! │  └──────────────┬──────────────┘   └──────────────┬──────────────────┘  │
//! │                 │                                 │                     │
//! │  ┌──────────────▼─────────────────────────────────▼──────────────────┐  │
//! │  │               ★ opaline-core (THIS CRATE) ★                       │  │
//! │  │                                                                   │  │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌──────────┐ ┌─────────┐  │  │
//! │  │   │  types  │ │  cart   │ │ checkout │ │  status  │ │paginatn.│  │  │
//! │  │   │ Order   │ │  Cart   │ │ shipping │ │ machine  │ │  state  │  │  │
//! │  │   │ Product │ │CartItem │ │  totals  │ │          │ │         │  │  │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └──────────┘ └─────────┘  │  │
//! │  │                                                                   │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS              │  │
//! │  └──────────────────────────────┬────────────────────────────────────┘  │
//! │                                 │                                       │
//! │  ┌──────────────────────────────▼────────────────────────────────────┐  │
//! │  │                  opaline-db (Database Layer)                      │  │
//! │  │            SQLite queries, migrations, repositories               │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderItem, enums)
//! - [`cart`] - Cart with stock-bounded, silently-clamping quantities
//! - [`checkout`] - Shipping rule, order totals, payload validation
//! - [`status`] - The order status machine
//! - [`pagination`] - Admin listing pagination state
//! - [`validation`] - Field-level validators
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod pagination;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, TransitionError, ValidationError};
pub use pagination::PaginationState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 10_000;

/// Flat shipping fee charged at or below the threshold.
pub const SHIPPING_FEE_CENTS: i64 = 1_000;

/// Default admin listing page size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on admin listing page size.
pub const MAX_PAGE_SIZE: i64 = 100;
