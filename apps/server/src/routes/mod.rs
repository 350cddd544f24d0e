//! # HTTP Routes
//!
//! Router assembly and the admin bearer-token gate.
//!
//! ## Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Route Map                                       │
//! │                                                                         │
//! │  Public                                                                 │
//! │    GET  /health                     liveness + migration status         │
//! │    POST /orders                     checkout submission                 │
//! │                                                                         │
//! │  Admin (Authorization: Bearer <OPALINE_ADMIN_TOKEN>)                    │
//! │    GET    /admin/orders             paginated listing                   │
//! │    GET    /admin/orders/{id}        detail                              │
//! │    PATCH  /admin/orders/{id}        status change                       │
//! │    DELETE /admin/orders/{id}        permanent delete                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin_orders;
pub mod orders;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/", get(admin_orders::list_orders))
        .route(
            "/{id}",
            get(admin_orders::get_order)
                .patch(admin_orders::update_status)
                .delete(admin_orders::delete_order),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/orders", post(orders::create_order))
        .nest("/admin/orders", admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bearer-token gate for the admin surface.
///
/// Fail-closed: with no token configured, every admin request is rejected.
async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Err(ApiError::unauthorized());
    };

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected => Ok(next.run(request).await),
        _ => Err(ApiError::unauthorized()),
    }
}

/// `GET /health`
async fn health(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    if !state.db.health_check().await {
        return Err(ApiError::new(
            crate::error::ErrorCode::DatabaseError,
            "Database unreachable",
        ));
    }

    let (total, applied) = opaline_db::migrations::migration_status(state.db.pool()).await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "migrations": { "total": total, "applied": applied },
    })))
}

// =============================================================================
// Router Tests
// =============================================================================
