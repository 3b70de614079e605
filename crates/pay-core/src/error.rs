//! # Payment Error Types
//!
//! Typed error handling for the PayPal Express Checkout gateway.
//! All gateway and provider operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing credentials, out-of-range settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A required key is missing or empty in the payment details
    #[error("Payment details must contain the {field} key")]
    MissingField { field: String },

    /// Payment type outside of {single, subscription}
    #[error("Payment type should be either \"single\" or \"subscription\", {given} given instead")]
    InvalidPaymentType { given: String },

    /// More entries than a single payment may carry
    #[error("Only one {field} entry is allowed per payment, {count} given")]
    TooManyEntries { field: String, count: usize },

    /// Payment is not in a state that allows the operation
    #[error("Payment {payment_id} is in state {actual}, expected one of: {expected}")]
    InvalidState {
        payment_id: String,
        expected: String,
        actual: String,
    },

    /// Record not found in the store
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Remote resource ended up in a state other than the expected one
    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    /// OAuth credential exchange failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Shorthand for a provider error raised by the PayPal client
    pub fn provider(message: impl Into<String>) -> Self {
        PaymentError::ProviderError {
            provider: "paypal".to_string(),
            message: message.into(),
        }
    }

    /// Returns true for input problems the caller can fix (nothing was sent remotely)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PaymentError::InvalidRequest(_)
                | PaymentError::MissingField { .. }
                | PaymentError::InvalidPaymentType { .. }
                | PaymentError::TooManyEntries { .. }
                | PaymentError::InvalidState { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::MissingField { .. } => 400,
            PaymentError::InvalidPaymentType { .. } => 400,
            PaymentError::TooManyEntries { .. } => 400,
            PaymentError::InvalidState { .. } => 409,
            PaymentError::NotFound { .. } => 404,
            PaymentError::ProviderError { .. } => 502,
            PaymentError::PaymentDeclined { .. } => 402,
            PaymentError::Authentication(_) => 502,
            PaymentError::NetworkError(_) => 503,
            PaymentError::Serialization(_) => 500,
            PaymentError::Internal(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
