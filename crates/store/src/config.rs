//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKET_API_URL` - Base URL of the shop backend API
//!
//! ## Optional
//! - `MARKET_SESSION_FILE` - Path of the persisted session file
//!   (default: `.mango-session.json`)
//! - `MARKET_KEYS_URL` - Base URL for payment-widget key endpoints
//!   (default: derived from `MARKET_API_URL` origin)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the shop backend API (e.g. `https://shop.example.com/api`).
    pub api_url: Url,
    /// Base URL for the payment-widget key endpoint (`/api/keys/paypal`).
    pub keys_url: Url,
    /// Where the persisted session (cart, checkout data, token) lives.
    pub session_file: PathBuf,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url("MARKET_API_URL", &get_required_env("MARKET_API_URL")?)?;
        let keys_url = match get_optional_env("MARKET_KEYS_URL") {
            Some(raw) => parse_url("MARKET_KEYS_URL", &raw)?,
            // The keys endpoint lives at the API origin, outside the /api
            // base path
            None => origin_of(&api_url),
        };
        let session_file =
            PathBuf::from(get_env_or_default("MARKET_SESSION_FILE", ".mango-session.json"));

        Ok(Self {
            api_url,
            keys_url,
            session_file,
        })
    }
}

/// Strip the path from a URL, keeping scheme/host/port.
fn origin_of(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_of_strips_path() {
        let api = Url::parse("https://shop.example.com/api?x=1").unwrap();
        assert_eq!(origin_of(&api).as_str(), "https://shop.example.com/");
    }

    #[test]
    fn test_parse_url_rejects_garbage() {
        let err = parse_url("MARKET_API_URL", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }
}
