//! Shared application state.
//!
//! Cloned into every handler by axum; both fields are cheap to clone
//! (the database is a pool handle).

use opaline_db::Database;

use crate::config::ServerConfig;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState { db, config }
    }
}
