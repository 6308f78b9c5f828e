//! Shared data types for transaction building.

use serde::{Deserialize, Serialize};

/// Placeholder sender used when neither the configuration nor the
/// extraction supplies a `from` address.
pub const DEFAULT_FROM_ADDRESS: &str = "0xElTeuCompte";

/// Placeholder recipient used in action examples and as the last-resort
/// `to` fallback inside the builder.
pub const DEFAULT_TO_ADDRESS: &str = "0xReceptorAddress1234567890abcdef";

/// Transaction parameters extracted from conversation state.
///
/// All fields are optional at the wire level; the extraction result is
/// untrusted. [`build_transfer_details`](crate::extract::build_transfer_details)
/// validates and normalizes these into a usable shape (`to_address`
/// present and trimmed, `from_address` resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildParams {
    /// Sender address, if the conversation mentioned one.
    pub from_address: Option<String>,
    /// Recipient address. Mandatory after validation.
    pub to_address: Option<String>,
    /// Amount in the chain's native unit as a decimal string (e.g. "1.5").
    pub amount: Option<String>,
}

/// An unsigned transaction record.
///
/// Carries no signature and cannot be broadcast; `value` is the amount
/// converted to wei, encoded as lowercase `0x`-prefixed hexadecimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Value in wei, `0x`-prefixed lowercase hex.
    pub value: String,
}
