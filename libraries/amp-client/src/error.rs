//! Error types for the store client.

use thiserror::Error;

/// Errors that can occur when interacting with the remote file store.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store returned an error response
    #[error("Store error ({status}): {message}")]
    StoreError { status: u16, message: String },

    /// Authentication required but no token available, or the token
    /// was rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid store URL
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a store response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Store is offline or unreachable
    #[error("Store unreachable: {0}")]
    StoreUnreachable(String),
}

/// Result type for store client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
