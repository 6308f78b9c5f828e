//! Unified error types for the plugin.
//!
//! Domain modules define their own error enums ([`ExtractionError`],
//! [`WalletError`]); this module aggregates them into a single [`Error`]
//! so that handler code can propagate with `?` and match on the few
//! variants it treats as recoverable user input.

use crate::extract::ExtractionError;
use crate::wallet::WalletError;

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the plugin.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Parameter extraction or validation failed.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// Wallet provider error.
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// A configured setting is malformed.
    #[error("{0}")]
    Config(String),

    /// The transaction amount is not a valid decimal numeral.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Host runtime error.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a host runtime error with a message.
    #[must_use]
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
