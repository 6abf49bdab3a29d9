//! Unified error handling for the storefront client.
//!
//! Every async operation failure is caught at the point of invocation and
//! surfaced as a user-visible notice; nothing here should escape as a panic.
//! Guard-chain redirects are control flow, not errors, and never pass
//! through this type.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or invalid token. Guard boundaries turn this into a
    /// redirect-to-login; API boundaries surface it directly.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A user-fixable precondition was not met (e.g. no payment method
    /// selected). Surfaced inline, never fatal.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx API response; the message comes from the response body and
    /// the operation is retryable by re-invoking the same action.
    #[error("{message}")]
    Remote { message: String },

    /// Order submission was called with incomplete checkout state. The
    /// guard chain should make this unreachable; it exists so a bug there
    /// degrades to an error instead of a crash.
    #[error("Checkout state incomplete: {0}")]
    Precondition(&'static str),

    /// Backend API failure (transport, decode, or remote).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration failure at startup.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Validation("Payment method is required".to_string());
        assert_eq!(err.to_string(), "Validation error: Payment method is required");

        let err = StoreError::Remote {
            message: "Product out of stock".to_string(),
        };
        assert_eq!(err.to_string(), "Product out of stock");
    }
}
