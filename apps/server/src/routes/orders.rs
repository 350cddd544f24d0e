//! # Public Order Endpoint
//!
//! `POST /orders` turns a checkout submission into a stored order.
//!
//! ## Request Handling
//! ```text
//! Json<NewOrder>
//!    │
//!    ├─ validate payload (required fields, items)      → 400 on failure
//!    ├─ recompute totals with the shared shipping rule → 400 on mismatch
//!    └─ persist (idempotency key aware)                → 201 with the order
//! ```
//!
//! A replayed idempotency key also answers 201 with the stored order; the
//! client cannot tell a replay from a fresh write and does not need to.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use opaline_core::checkout::{validate_new_order, verify_total};
use opaline_core::{NewOrder, Order};

use crate::error::ApiResult;
use crate::state::AppState;

/// `POST /orders`
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    validate_new_order(&payload)?;

    // The client-computed total is advisory only.
    let total_cents = verify_total(&payload).map_err(crate::error::ApiError::from)?;

    let order = state.db.orders().create(&payload).await?;

    info!(
        order_number = %order.order_number,
        total_cents,
        "Order accepted"
    );

    Ok((StatusCode::CREATED, Json(order)))
}
