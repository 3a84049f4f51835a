//! Server configuration.
//!
//! Supports configuration via environment variables:
//!
//! ```bash
//! # Database (sqlite://path/to/db.db or sqlite::memory:)
//! DATABASE_URL=sqlite://codeshot.db?mode=rwc
//!
//! # Browser UI origin allowed by CORS (permissive when unset)
//! CODESHOT_CORS_ORIGIN=https://app.codeshot.dev
//! ```

use std::env;

use axum::http::HeaderValue;
use thiserror::Error;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Exact origin allowed by CORS. `None` means any origin (dev mode).
    pub cors_origin: Option<HeaderValue>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid CORS origin {0:?}: not a valid header value")]
    InvalidCorsOrigin(String),
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let cors_origin = match env::var("CODESHOT_CORS_ORIGIN") {
            Ok(origin) => Some(
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin))?,
            ),
            Err(_) => None,
        };

        Ok(Self { cors_origin })
    }
}
