//! # opaline-client: Client-Side State for the Opaline Storefront
//!
//! The stateful containers a storefront UI binds to, plus the HTTP client
//! they talk to the order API through.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       opaline-client                                    │
//! │                                                                         │
//! │  ┌──────────────┐  ┌────────────────────┐  ┌──────────────────────┐     │
//! │  │  CartStore   │  │ CheckoutSubmitter  │  │  AdminOrderConsole   │     │
//! │  │  (cart.rs +  │  │ (form, key,        │  │  (listing, dialogs,  │     │
//! │  │  persistence)│  │  submission guard) │  │  stale discard)      │     │
//! │  └──────┬───────┘  └─────────┬──────────┘  └──────────┬───────────┘     │
//! │         │                    │                        │                 │
//! │         ▼                    ▼                        ▼                 │
//! │  ┌──────────────┐  ┌─────────────────────────────────────────────┐      │
//! │  │ CartStorage  │  │             ApiClient (reqwest)             │      │
//! │  │ (JSON file)  │  │  POST /orders, /admin/orders/*              │      │
//! │  └──────────────┘  └─────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business rules (clamping, totals, the status machine) all live in
//! `opaline-core`; this crate adds persistence, network and UI bookkeeping.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod api;
pub mod cart_store;
pub mod checkout;
pub mod error;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use admin::AdminOrderConsole;
pub use api::ApiClient;
pub use cart_store::CartStore;
pub use checkout::{CheckoutForm, CheckoutSubmitter};
pub use error::{ClientError, ClientResult};
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, PersistedCart};
