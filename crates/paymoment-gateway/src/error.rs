//! Error types for gateway operations.

/// Errors that can occur when talking to the payment provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The provider could not be reached, timed out, or answered with a
    /// server error. Indeterminate: says nothing about the payment's
    /// true state.
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),

    /// The provider does not know this reference.
    #[error("unknown payment reference: {reference}")]
    UnknownReference {
        /// The reference the provider rejected.
        reference: String,
    },

    /// The provider answered with an API error.
    #[error("payment provider API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the provider, when parseable.
        message: String,
    },
}
