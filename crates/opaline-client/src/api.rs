//! # Order API Client
//!
//! Thin typed wrapper over the storefront HTTP API.
//!
//! ## Endpoints
//! ```text
//! POST   /orders                       create_order      (public)
//! GET    /admin/orders                 list_orders       (bearer token)
//! GET    /admin/orders/{id}            get_order         (bearer token)
//! PATCH  /admin/orders/{id}            update_status     (bearer token)
//! DELETE /admin/orders/{id}            delete_order      (bearer token)
//! ```
//!
//! Admin calls attach `Authorization: Bearer <token>`; without a token they
//! are sent bare and the server answers 401.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use opaline_core::{NewOrder, Order, OrderPage, OrderStatus};

use crate::error::{ClientError, ClientResult};

/// Error envelope the server returns for non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[allow(dead_code)]
    code: String,
    message: String,
}

/// HTTP client for the order API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

impl ApiClient {
    /// Creates a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url: base_url.into(),
            admin_token: None,
        })
    }

    /// Attaches the admin bearer token used by `/admin/*` calls.
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    // =========================================================================
    // Public endpoint
    // =========================================================================

    /// Submits a checkout payload. Returns the stored order.
    pub async fn create_order(&self, order: &NewOrder) -> ClientResult<Order> {
        debug!(total_cents = order.total_cents, "Submitting order");

        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .json(order)
            .send()
            .await?;

        Self::parse(response).await
    }

    // =========================================================================
    // Admin endpoints
    // =========================================================================

    /// Fetches one page of orders, newest first.
    pub async fn list_orders(&self, page: i64, page_size: i64) -> ClientResult<OrderPage> {
        let response = self
            .authorized(self.http.get(format!("{}/admin/orders", self.base_url)))
            .query(&[("page", page), ("pageSize", page_size)])
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Fetches one order with items.
    pub async fn get_order(&self, id: &str) -> ClientResult<Order> {
        let response = self
            .authorized(self.http.get(format!("{}/admin/orders/{id}", self.base_url)))
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Requests a status change. The server enforces the state machine.
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> ClientResult<Order> {
        let response = self
            .authorized(
                self.http
                    .patch(format!("{}/admin/orders/{id}", self.base_url)),
            )
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Permanently deletes an order.
    pub async fn delete_order(&self, id: &str) -> ClientResult<()> {
        let response = self
            .authorized(
                self.http
                    .delete(format!("{}/admin/orders/{id}", self.base_url)),
            )
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::error_from(response).await)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
        if response.status().is_success() {
            return Ok(response.json().await?);
        }

        Err(Self::error_from(response).await)
    }

    async fn error_from(response: Response) -> ClientError {
        let status = response.status();

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}
