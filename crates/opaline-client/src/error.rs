//! # Client Error Types
//!
//! Errors surfaced by the client-side state containers and the API client.

use thiserror::Error;

use opaline_core::{TransitionError, ValidationError};

/// Client-side operation errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (DNS, connect, timeout).
    ///
    /// The submission outcome is unknown; retries reuse the same
    /// idempotency key so the server can deduplicate.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The requested entity does not exist on the server.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server refused a status change.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The payload failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A checkout submission is already running.
    #[error("A submission is already in flight")]
    InFlight,

    /// Cart persistence failed (read or write).
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
