//! Unsigned-transaction action.
//!
//! Orchestrates one request end to end: refresh state, extract and
//! validate parameters, build the `{from, to, value}` record, notify the
//! host. The two expected user-input failures (nothing extracted, missing
//! recipient) are reported through the callback with a `false` return;
//! everything else — invalid amount, malformed configuration — propagates
//! and rejects the turn.

use alloy::primitives::utils::parse_ether;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Error, Result};
use crate::extract::{ExtractionError, build_transfer_details};
use crate::runtime::{
    Action, ActionExample, ActionResponse, AgentRuntime, HandlerCallback, Memory, State,
};
use crate::types::{BuildParams, DEFAULT_FROM_ADDRESS, DEFAULT_TO_ADDRESS, UnsignedTransaction};

const SUCCESS_TEXT: &str = "Transacció no signada generada correctament.";

const SIMILES: &[&str] = &[
    "CREATE_UNSIGNED_TX",
    "UNSIGNED_TRANSACTION",
    "TX_JSON",
    "BUILD_TRANSACTION",
    "createUnsignedTx",
];

/// Convert validated parameters into an [`UnsignedTransaction`].
///
/// The amount (default `"1"`) is interpreted in the chain's native unit
/// and converted to wei; an unparseable amount fails with
/// [`Error::InvalidAmount`]. Pure beyond the conversion.
pub fn build_unsigned_tx(params: &BuildParams) -> Result<UnsignedTransaction> {
    let amount = params.amount.as_deref().unwrap_or("1");
    let value =
        parse_ether(amount).map_err(|e| Error::InvalidAmount(format!("'{amount}': {e}")))?;

    Ok(UnsignedTransaction {
        from: params
            .from_address
            .as_deref()
            .map_or(DEFAULT_FROM_ADDRESS, str::trim)
            .to_string(),
        to: params
            .to_address
            .as_deref()
            .map_or(DEFAULT_TO_ADDRESS, str::trim)
            .to_string(),
        value: format!("{value:#x}"),
    })
}

/// Action producing an unsigned transaction JSON from conversation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateUnsignedTxAction;

#[async_trait]
impl Action for CreateUnsignedTxAction {
    fn name(&self) -> &'static str {
        "createUnsignedTx"
    }

    fn description(&self) -> &'static str {
        "Genera un JSON per una transacció no signada, amb els camps 'from', 'to' i 'value'"
    }

    fn similes(&self) -> &'static [&'static str] {
        SIMILES
    }

    fn examples(&self) -> Vec<Vec<ActionExample>> {
        vec![vec![
            ActionExample {
                user: "assistant",
                text: "Generating an unsigned transaction from 0xElTeuCompte to \
                       0xReceptorAddress1234567890abcdef",
                action: "CREATE_UNSIGNED_TX",
            },
            ActionExample {
                user: "user",
                text: "Create an unsigned transaction from 0xElTeuCompte to \
                       0xReceptorAddress1234567890abcdef",
                action: "CREATE_UNSIGNED_TX",
            },
        ]]
    }

    /// No private key is required: the transaction is never signed.
    async fn validate(&self, _runtime: &dyn AgentRuntime) -> Result<bool> {
        Ok(true)
    }

    async fn handler(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
        _options: &Value,
        callback: Option<&HandlerCallback>,
    ) -> Result<bool> {
        let state = match state {
            Some(state) => runtime.update_recent_message_state(state).await?,
            None => runtime.compose_state(message).await?,
        };
        debug!("createUnsignedTx action handler called");

        match extract_and_build(&state, runtime).await {
            Ok(unsigned_tx) => {
                if let Some(callback) = callback {
                    callback(ActionResponse {
                        text: SUCCESS_TEXT.to_string(),
                        content: Some(json!({
                            "success": true,
                            "unsignedTx": unsigned_tx,
                        })),
                    });
                }
                Ok(true)
            }
            // Expected user-input problems are reported gracefully.
            Err(
                e @ Error::Extraction(ExtractionError::NoData | ExtractionError::MissingToAddress),
            ) => {
                let text = e.to_string();
                if let Some(callback) = callback {
                    callback(ActionResponse {
                        text: text.clone(),
                        content: Some(json!({ "error": text })),
                    });
                }
                Ok(false)
            }
            // Anything else is fatal to the current turn.
            Err(e) => Err(e),
        }
    }
}

async fn extract_and_build(
    state: &State,
    runtime: &dyn AgentRuntime,
) -> Result<UnsignedTransaction> {
    let params = build_transfer_details(state, runtime).await?;
    build_unsigned_tx(&params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::tests_support::MockRuntime;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    const RECEIVER: &str = "0xReceptorAddress1234567890abcdef";

    fn capture() -> (Arc<Mutex<Vec<ActionResponse>>>, Box<HandlerCallback>) {
        let captured: Arc<Mutex<Vec<ActionResponse>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        let cb: Box<HandlerCallback> = Box::new(move |response| {
            sink.lock().unwrap().push(response);
        });
        (captured, cb)
    }

    async fn run_handler(
        runtime: &MockRuntime,
    ) -> (Result<bool>, Vec<ActionResponse>) {
        let (captured, cb) = capture();
        let result = CreateUnsignedTxAction
            .handler(runtime, &Memory::default(), None, &Value::Null, Some(&*cb))
            .await;
        let responses = captured.lock().unwrap().clone();
        (result, responses)
    }

    #[test]
    fn test_build_one_ether() {
        let params = BuildParams {
            amount: Some("1".to_string()),
            to_address: Some(RECEIVER.to_string()),
            from_address: Some("0xElTeuCompte".to_string()),
        };
        let tx = build_unsigned_tx(&params).unwrap();
        assert_eq!(tx.value, "0xde0b6b3a7640000");
        assert_eq!(tx.from, "0xElTeuCompte");
        assert_eq!(tx.to, RECEIVER);
    }

    #[test]
    fn test_build_fractional_amount() {
        let params = BuildParams {
            amount: Some("1.5".to_string()),
            to_address: Some(RECEIVER.to_string()),
            ..BuildParams::default()
        };
        let tx = build_unsigned_tx(&params).unwrap();
        assert_eq!(tx.value, "0x14d1120d7b160000");
    }

    #[test]
    fn test_build_zero_amount() {
        let params = BuildParams {
            amount: Some("0".to_string()),
            to_address: Some(RECEIVER.to_string()),
            ..BuildParams::default()
        };
        assert_eq!(build_unsigned_tx(&params).unwrap().value, "0x0");
    }

    #[test]
    fn test_build_amount_defaults_to_one() {
        let params = BuildParams {
            to_address: Some(RECEIVER.to_string()),
            ..BuildParams::default()
        };
        assert_eq!(build_unsigned_tx(&params).unwrap().value, "0xde0b6b3a7640000");
    }

    #[test]
    fn test_build_invalid_amount() {
        let params = BuildParams {
            amount: Some("not_a_number".to_string()),
            to_address: Some(RECEIVER.to_string()),
            ..BuildParams::default()
        };
        let err = build_unsigned_tx(&params).unwrap_err();
        assert!(matches!(err, Error::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn test_handler_success() {
        let runtime = MockRuntime::new().with_extraction(Some(json!({
            "fromAddress": "0xElTeuCompte",
            "toAddress": RECEIVER,
            "amount": "1",
        })));
        let (result, responses) = run_handler(&runtime).await;

        assert!(result.unwrap());
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].text, "Transacció no signada generada correctament.");
        assert_eq!(
            responses[0].content,
            Some(json!({
                "success": true,
                "unsignedTx": {
                    "from": "0xElTeuCompte",
                    "to": RECEIVER,
                    "value": "0xde0b6b3a7640000",
                },
            }))
        );
    }

    #[tokio::test]
    async fn test_handler_defaults_sender() {
        // No fromAddress extracted and no configured public address.
        let runtime = MockRuntime::new().with_extraction(Some(json!({
            "toAddress": RECEIVER,
            "amount": "2",
        })));
        let (result, responses) = run_handler(&runtime).await;

        assert!(result.unwrap());
        assert_eq!(
            responses[0].content,
            Some(json!({
                "success": true,
                "unsignedTx": {
                    "from": "0xElTeuCompte",
                    "to": RECEIVER,
                    "value": "0x1bc16d674ec80000",
                },
            }))
        );
    }

    #[tokio::test]
    async fn test_handler_trims_addresses() {
        let runtime = MockRuntime::new().with_extraction(Some(json!({
            "fromAddress": "  0xABC  ",
            "toAddress": format!("  {RECEIVER}  "),
        })));
        let (result, responses) = run_handler(&runtime).await;

        assert!(result.unwrap());
        let content = responses[0].content.clone().unwrap();
        assert_eq!(content["unsignedTx"]["from"], "0xABC");
        assert_eq!(content["unsignedTx"]["to"], RECEIVER);
    }

    #[tokio::test]
    async fn test_handler_missing_to_address_is_handled() {
        let runtime =
            MockRuntime::new().with_extraction(Some(json!({ "amount": "1" })));
        let (result, responses) = run_handler(&runtime).await;

        assert!(!result.unwrap());
        assert_eq!(
            responses[0].text,
            "Error: Falta 'toAddress' en els paràmetres de la transacció unsigned."
        );
        assert_eq!(
            responses[0].content,
            Some(json!({
                "error": "Error: Falta 'toAddress' en els paràmetres de la transacció unsigned.",
            }))
        );
    }

    #[tokio::test]
    async fn test_handler_no_extraction_is_handled() {
        let runtime = MockRuntime::new().with_extraction(None);
        let (result, responses) = run_handler(&runtime).await;

        assert!(!result.unwrap());
        assert_eq!(
            responses[0].text,
            "Error: No s'han pogut generar els paràmetres per la transacció unsigned."
        );
    }

    #[tokio::test]
    async fn test_handler_invalid_amount_propagates() {
        let runtime = MockRuntime::new().with_extraction(Some(json!({
            "toAddress": RECEIVER,
            "amount": "not_a_number",
        })));
        let (result, responses) = run_handler(&runtime).await;

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
        assert!(responses.is_empty());
    }

    #[tokio::test]
    async fn test_handler_bad_configured_address_propagates() {
        let runtime = MockRuntime::new()
            .with_setting("EVM_PUBLIC_ADDRESS", "not-a-hex-address")
            .with_extraction(Some(json!({ "toAddress": RECEIVER })));
        let (result, responses) = run_handler(&runtime).await;

        assert!(matches!(result, Err(Error::Config(_))));
        assert!(responses.is_empty());
    }

    #[tokio::test]
    async fn test_handler_uses_configured_address() {
        let runtime = MockRuntime::new()
            .with_setting("EVM_PUBLIC_ADDRESS", "0xConfigured")
            .with_extraction(Some(json!({
                "fromAddress": "0xExtracted",
                "toAddress": RECEIVER,
            })));
        let (result, responses) = run_handler(&runtime).await;

        assert!(result.unwrap());
        let content = responses[0].content.clone().unwrap();
        assert_eq!(content["unsignedTx"]["from"], "0xConfigured");
    }

    #[tokio::test]
    async fn test_handler_without_callback_still_succeeds() {
        let runtime = MockRuntime::new().with_extraction(Some(json!({
            "toAddress": RECEIVER,
        })));
        let result = CreateUnsignedTxAction
            .handler(&runtime, &Memory::default(), None, &Value::Null, None)
            .await;
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn test_validate_always_true() {
        let runtime = MockRuntime::new();
        assert!(CreateUnsignedTxAction.validate(&runtime).await.unwrap());
    }

    #[test]
    fn test_metadata() {
        let action = CreateUnsignedTxAction;
        assert_eq!(action.name(), "createUnsignedTx");
        assert!(action.similes().contains(&"UNSIGNED_TRANSACTION"));
        assert_eq!(action.examples().len(), 1);
    }
}
