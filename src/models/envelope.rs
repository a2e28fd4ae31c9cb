//! Envelope model
//!
//! An envelope is a named budget bucket holding a non-negative balance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::EnvelopeId;

/// A named budget bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique identifier
    pub id: EnvelopeId,

    /// Display label
    pub title: String,

    /// Current balance
    pub budget: Amount,
}

impl Envelope {
    /// Create a new envelope
    pub fn new(id: EnvelopeId, title: impl Into<String>, budget: Amount) -> Self {
        Self {
            id,
            title: title.into(),
            budget,
        }
    }

    /// Whether the balance covers `amount`
    pub fn can_cover(&self, amount: Amount) -> bool {
        self.budget >= amount
    }

    /// Validate the envelope
    ///
    /// Titles are taken as sent; only the empty string is rejected.
    pub fn validate(&self) -> Result<(), EnvelopeValidationError> {
        if self.title.is_empty() {
            return Err(EnvelopeValidationError::EmptyTitle);
        }

        if self.budget.is_negative() {
            return Err(EnvelopeValidationError::NegativeBudget);
        }

        Ok(())
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Validation errors for envelopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeValidationError {
    EmptyTitle,
    NegativeBudget,
}

impl fmt::Display for EnvelopeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Envelope title cannot be empty"),
            Self::NegativeBudget => write!(f, "Envelope budget cannot be negative"),
        }
    }
}

impl std::error::Error for EnvelopeValidationError {}
