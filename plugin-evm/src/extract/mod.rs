//! Parameter extraction and validation.
//!
//! Turns conversational state into a validated [`BuildParams`] by
//! invoking the host's structured-extraction call and normalizing the
//! untrusted result: the recipient must be present, addresses are
//! whitespace-trimmed, and the sender is resolved with priority
//! configured `EVM_PUBLIC_ADDRESS` > extracted `fromAddress` >
//! placeholder default.

mod error;

pub use error::ExtractionError;

use tracing::debug;

use crate::error::{Error, Result};
use crate::runtime::{AgentRuntime, State};
use crate::templates::UNSIGNED_TX_TEMPLATE;
use crate::types::{BuildParams, DEFAULT_FROM_ADDRESS};

/// Extract and validate unsigned-transaction parameters from state.
///
/// Fails with [`ExtractionError::NoData`] when the model yields nothing,
/// [`ExtractionError::MissingToAddress`] when the recipient is absent or
/// blank, and [`Error::Config`] when `EVM_PUBLIC_ADDRESS` is set to a
/// non-blank value that does not start with `0x` (a blank setting is
/// treated as unset). Only the first two are treated as recoverable by
/// the action handler.
pub async fn build_transfer_details(
    state: &State,
    runtime: &dyn AgentRuntime,
) -> Result<BuildParams> {
    let extracted = runtime
        .generate_object(state, UNSIGNED_TX_TEMPLATE)
        .await?
        .filter(|v| !v.is_null())
        .ok_or(ExtractionError::NoData)?;

    let mut params: BuildParams =
        serde_json::from_value(extracted).map_err(ExtractionError::Deserialization)?;
    debug!(?params, "extracted unsigned-transaction parameters");

    let to_address = params
        .to_address
        .as_deref()
        .map(str::trim)
        .filter(|to| !to.is_empty())
        .ok_or(ExtractionError::MissingToAddress)?
        .to_string();

    // A blank setting counts as unset.
    let configured = runtime
        .get_setting("EVM_PUBLIC_ADDRESS")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let from_address = match configured {
        Some(configured) => {
            if !configured.starts_with("0x") {
                return Err(Error::config(
                    "EVM_PUBLIC_ADDRESS must be a valid hex string starting with '0x'",
                ));
            }
            configured
        }
        None => params
            .from_address
            .as_deref()
            .map_or(DEFAULT_FROM_ADDRESS, str::trim)
            .to_string(),
    };

    params.to_address = Some(to_address);
    params.from_address = Some(from_address);
    Ok(params)
}
