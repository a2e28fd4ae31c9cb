//! Custom error types for the envelope service
//!
//! This module defines the error hierarchy for the service using thiserror
//! for ergonomic error definitions. Every variant knows the HTTP status it
//! should be reported with; the conversion into an actual response lives in
//! `api::response`.

use thiserror::Error;

/// The main error type for envelope operations
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Missing or malformed fields when creating an envelope
    #[error("{0}")]
    InvalidInput(String),

    /// Withdrawal amount missing, non-numeric, or not positive
    #[error("{0}")]
    InvalidAmount(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Insufficient funds
    #[error("Insufficient funds in envelope '{envelope}': need {needed}, have {available}")]
    InsufficientFunds {
        envelope: String,
        needed: f64,
        available: f64,
    },

    /// Transfer endpoints could not be resolved, or the amount was rejected
    #[error("{0}")]
    NotFoundOrInvalid(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Socket and other I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Storage errors (poisoned locks)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EnvelopeError {
    /// Create a "not found" error for envelopes
    pub fn envelope_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Envelope",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotFoundOrInvalid(_))
    }

    /// Check if this error was caused by the client's input
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::InvalidAmount(_) | Self::InsufficientFunds { .. } => 400,
            Self::NotFound { .. } | Self::NotFoundOrInvalid(_) => 404,
            Self::Config(_) | Self::Io(_) | Self::Storage(_) => 500,
        }
    }
}

impl From<std::io::Error> for EnvelopeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for envelope operations
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EnvelopeError::Config("port must be non-zero".into());
        assert_eq!(err.to_string(), "Configuration error: port must be non-zero");
    }

    #[test]
    fn test_not_found_error() {
        let err = EnvelopeError::envelope_not_found("42");
        assert_eq!(err.to_string(), "Envelope not found: 42");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = EnvelopeError::InsufficientFunds {
            envelope: "Groceries".into(),
            needed: 50.0,
            available: 30.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in envelope 'Groceries': need 50, have 30"
        );
        assert_eq!(err.status_code(), 400);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(EnvelopeError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(EnvelopeError::InvalidAmount("x".into()).status_code(), 400);
        assert_eq!(EnvelopeError::NotFoundOrInvalid("x".into()).status_code(), 404);
        assert_eq!(EnvelopeError::Storage("x".into()).status_code(), 500);
        assert!(!EnvelopeError::Storage("x".into()).is_client_error());
        assert!(EnvelopeError::InvalidAmount("x".into()).is_client_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let envelope_err: EnvelopeError = io_err.into();
        assert!(matches!(envelope_err, EnvelopeError::Io(_)));
    }
}
