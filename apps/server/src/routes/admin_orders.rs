//! # Admin Order Endpoints
//!
//! Token-gated back-office surface for the admin console.
//!
//! ```text
//! GET    /admin/orders?page=&pageSize=   newest-first listing
//! GET    /admin/orders/{id}              one order with items
//! PATCH  /admin/orders/{id}              state-machine-checked status move
//! DELETE /admin/orders/{id}              permanent delete (order + items)
//! ```
//!
//! The bearer-token gate lives in the router layer; by the time a handler
//! here runs, the caller is an authenticated admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use opaline_core::{Order, OrderPage, OrderStatus, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::ApiResult;
use crate::state::AppState;

/// Query parameters of the listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// `GET /admin/orders`
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<OrderPage>> {
    let page = query.page.unwrap_or(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let page = state.db.orders().list(page, page_size).await?;
    Ok(Json(page))
}

/// `GET /admin/orders/{id}`
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let order = state.db.orders().get(&id).await?;
    Ok(Json(order))
}

/// Body of the status update endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: OrderStatus,
}

/// `PATCH /admin/orders/{id}`
///
/// The stored status is the authority; an illegal move answers 409 and
/// changes nothing.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Json<Order>> {
    let order = state.db.orders().update_status(&id, body.status).await?;

    info!(order_id = %id, status = ?order.status, "Admin status change");
    Ok(Json(order))
}

/// `DELETE /admin/orders/{id}`
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.orders().delete(&id).await?;

    info!(order_id = %id, "Admin deleted order");
    Ok(StatusCode::OK)
}
