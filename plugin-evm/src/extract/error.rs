//! Error types for the extract module.

/// Errors from extracting and validating transaction parameters.
///
/// The Display text of [`NoData`](Self::NoData) and
/// [`MissingToAddress`](Self::MissingToAddress) is user-facing: the
/// action handler forwards it verbatim through the host callback.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// The extraction call produced no object.
    #[error("Error: No s'han pogut generar els paràmetres per la transacció unsigned.")]
    NoData,

    /// The required recipient address is absent or blank.
    #[error("Error: Falta 'toAddress' en els paràmetres de la transacció unsigned.")]
    MissingToAddress,

    /// The extracted object does not match the expected parameter shape.
    #[error("Failed to deserialize the extracted data: {0}")]
    Deserialization(#[from] serde_json::Error),
}
