//! Error types for the wallet module.

/// Errors from wallet construction, chain resolution, and RPC access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WalletError {
    /// A wallet setting is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// RPC provider construction or query failure.
    #[error("Provider error: {0}")]
    Provider(String),

    /// TEE key derivation failure.
    #[error("Derivation error: {0}")]
    Derivation(String),

    /// The requested chain is not in the registry.
    #[error("Invalid chain name: {0}")]
    InvalidChain(String),
}

impl WalletError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a provider error.
    #[must_use]
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}
