//! Configuration management for the catalog API.
//!
//! Loads all settings from environment variables (a `.env` file is read
//! first when present).

use std::net::SocketAddr;

use crate::errors::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL (e.g. `sqlite:agricrowd.db`)
    pub database_url: String,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Upper bound on a single photo upload, in bytes
    pub max_photo_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional variables (with defaults):
    /// - `DATABASE_URL`: SQLite database (defaults to `sqlite:agricrowd.db`)
    /// - `BIND_ADDR`: listen address (defaults to `0.0.0.0:3001`)
    /// - `MAX_PHOTO_BYTES`: upload limit (defaults to 5 MiB)
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            database_url: env_var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:agricrowd.db".to_string()),

            bind_addr: env_var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string()),

            max_photo_bytes: env_var("MAX_PHOTO_BYTES")
                .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid MAX_PHOTO_BYTES".to_string()))?,
        })
    }

    /// Validate that the configuration is well-formed.
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(ApiError::Config(
                "DATABASE_URL must be a SQLite URL (starts with 'sqlite:')".to_string(),
            ));
        }

        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ApiError::Config(format!(
                "BIND_ADDR is not a valid socket address: {}",
                self.bind_addr
            )));
        }

        if self.max_photo_bytes == 0 {
            return Err(ApiError::Config(
                "MAX_PHOTO_BYTES must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ApiError::Config(format!("Missing environment variable: {key}")))
}
