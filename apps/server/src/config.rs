//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Bearer token guarding `/admin/*`.
    ///
    /// When unset the admin surface is closed: every admin request is
    /// rejected with 401. There is no default token.
    pub admin_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("OPALINE_HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("OPALINE_HTTP_PORT".to_string()))?,

            database_path: env::var("OPALINE_DATABASE_PATH")
                .unwrap_or_else(|_| "./opaline.db".to_string()),

            admin_token: env::var("OPALINE_ADMIN_TOKEN").ok(),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_token_defaults_to_closed() {
        let config = ServerConfig {
            http_port: 8080,
            database_path: "./opaline.db".into(),
            admin_token: None,
        };
        assert!(config.admin_token.is_none());
    }
}
