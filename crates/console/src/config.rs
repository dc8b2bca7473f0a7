//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CONSOLE_HOST` - Bind address (default: 127.0.0.1)
//! - `CONSOLE_PORT` - Listen port (default: 3000)
//! - `CONSOLE_IMAGES_DIR` - Avatar image directory, relative to the working
//!   directory (default: `crates/console/static/images`)
//!
//! The API address is fixed at [`crate::api::API_URL`].

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

const DEFAULT_IMAGES_DIR: &str = "crates/console/static/images";

/// Console application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory served at `/images`
    pub images_dir: PathBuf,
}

impl ConsoleConfig {
    /// Load configuration from environment variables, reading `.env` first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match var("CONSOLE_HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|e: std::net::AddrParseError| {
                    ConfigError::InvalidEnvVar("CONSOLE_HOST".to_string(), e.to_string())
                })?,
            None => IpAddr::from([127, 0, 0, 1]),
        };
        let port = match var("CONSOLE_PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("CONSOLE_PORT".to_string(), e.to_string())
            })?,
            None => 3000,
        };

        let images_dir = var("CONSOLE_IMAGES_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR), PathBuf::from);

        Ok(Self {
            host,
            port,
            images_dir,
        })
    }

    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
