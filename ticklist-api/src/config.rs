//! Configuration management for the API server
//!
//! Loads configuration from environment variables into a type-safe struct.
//! There is no storage section: every table lives in process memory and the
//! service keeps nothing between restarts.
//!
//! # Environment Variables
//!
//! - `TICKLIST_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TICKLIST_PORT`: Port to bind to (default: 8080)
//! - `TICKLIST_CORS_ORIGINS`: Comma-separated allowed origins (default: *)
//! - `RUST_LOG`: Log level filter (default: info)

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; a literal `*` means permissive
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparsable (e.g. a
    /// non-numeric `TICKLIST_PORT`).
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("TICKLIST_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("TICKLIST_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("TICKLIST_CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
        }
    }
}
