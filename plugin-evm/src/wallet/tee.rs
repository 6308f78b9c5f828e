//! TEE-backed key derivation seam.
//!
//! When the host runs in a trusted execution environment, the wallet's
//! key material is derived inside the enclave instead of being supplied
//! as a raw private key. The plugin only ever sees the derived address;
//! the keypair itself stays behind the [`DeriveKeyProvider`] boundary.

use alloy::primitives::Address;
use async_trait::async_trait;

use super::error::WalletError;

/// TEE execution mode, from the `TEE_MODE` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeeMode {
    /// No TEE; a raw private key is required.
    #[default]
    Off,
    /// Local simulator.
    Local,
    /// Containerized simulator.
    Docker,
    /// Production enclave.
    Production,
}

impl TeeMode {
    /// Parse the `TEE_MODE` setting. Absent means [`TeeMode::Off`];
    /// an unrecognized value is a configuration error rather than an
    /// implicitly enabled mode.
    pub fn parse(setting: Option<&str>) -> Result<Self, WalletError> {
        match setting.map(str::trim) {
            None | Some("") => Ok(Self::Off),
            Some(s) if s.eq_ignore_ascii_case("off") => Ok(Self::Off),
            Some(s) if s.eq_ignore_ascii_case("local") => Ok(Self::Local),
            Some(s) if s.eq_ignore_ascii_case("docker") => Ok(Self::Docker),
            Some(s) if s.eq_ignore_ascii_case("production") => Ok(Self::Production),
            Some(other) => Err(WalletError::config(format!(
                "unrecognized TEE_MODE '{other}'"
            ))),
        }
    }

    /// Whether key material comes from the enclave.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// An enclave-derived keypair.
///
/// Opaque handle: only the public address is observable out here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedKeypair {
    address: Address,
}

impl DerivedKeypair {
    /// Wrap a derived keypair's public address.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// The keypair's EVM address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }
}

/// Host-provided ECDSA key derivation inside a TEE.
#[async_trait]
pub trait DeriveKeyProvider: Send + Sync {
    /// Derive a keypair from a secret salt, a key path (e.g. `"evm"`),
    /// and the agent id.
    async fn derive_ecdsa_keypair(
        &self,
        salt: &str,
        key_path: &str,
        agent_id: &str,
    ) -> Result<DerivedKeypair, WalletError>;
}
