//! Prompt templates for the structured-extraction call.

/// Template used to extract unsigned-transaction parameters from the
/// recent conversation. The host runtime fills the `{{...}}` placeholders
/// from its composed state before invoking the model.
pub const UNSIGNED_TX_TEMPLATE: &str = r#"Given the recent messages and wallet information below:

{{recentMessages}}

{{walletInfo}}

Extract the following information about the requested unsigned transaction:
- From address (the sender, if mentioned)
- To address (the receiver)
- Amount to transfer in the chain's native unit (number string without the coin symbol)

Respond with a JSON markdown block containing only the extracted values. Use null for any value that cannot be determined:

```json
{
    "fromAddress": string | null,
    "toAddress": string,
    "amount": string | null
}
```
"#;
