//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`
//! (a `.env` file is read first by `dotenvy` in the binaries).
//!
//! # Environment Variables
//!
//! ## Relay (`Config`)
//! - `GC2_HOST`: Base URL of the GC2 backend (required)
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `SESSION_COOKIE_NAME`: Incoming cookie carrying the GC2 session id (default: "PHPSESSID")
//! - `BODY_LIMIT_BYTES`: Maximum request body size (default: 20 MiB)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins for release builds (default: none)
//! - `RUST_LOG`: Logging level (default: "info,fkg_upload=debug,tower_http=debug")
//!
//! ## Client (`ClientConfig`)
//! - `RELAY_BASE_URL`: Where the relay is reachable (required)
//! - `IMAGE_DIRECT_ATTACH`: Attach uploads to the selected facility right away (default: false)
//! - `PHOTO_BASE_URL`: Base URL of the photo renditions shown in the panel

use crate::application::attachment_panel::use_case::DEFAULT_PHOTO_BASE_URL;
use serde::Deserialize;
use validator::Validate;

/// Relay server configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    /// GC2 backend base URL (e.g., `https://gc2.example.com`)
    #[validate(url)]
    pub gc2_host: String,

    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Name of the cookie holding the caller's GC2 session id
    #[validate(length(min = 1))]
    pub session_cookie_name: String,

    /// Maximum accepted request body in bytes; uploads arrive base64-encoded
    #[validate(range(min = 1024))]
    pub body_limit_bytes: usize,

    /// CORS origins allowed in release builds
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, cannot be parsed,
    /// or fails validation.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            gc2_host: env_required("GC2_HOST")?,
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            session_cookie_name: env_or("SESSION_COOKIE_NAME", "PHPSESSID".to_string())?,
            body_limit_bytes: env_or("BODY_LIMIT_BYTES", 20 * 1024 * 1024)?,
            allowed_origins: env_list("ALLOWED_ORIGINS"),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration of the browser-side pieces (panel and upload form).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientConfig {
    #[validate(url)]
    pub relay_base_url: String,
    pub image_direct_attach: bool,
    #[validate(url)]
    pub photo_base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            relay_base_url: env_required("RELAY_BASE_URL")?,
            image_direct_attach: env_or("IMAGE_DIRECT_ATTACH", false)?,
            photo_base_url: env_or("PHOTO_BASE_URL", DEFAULT_PHOTO_BASE_URL.to_string())?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .map(|val| {
            val.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
