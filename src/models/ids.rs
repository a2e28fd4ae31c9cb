//! Envelope identifiers
//!
//! Envelopes are addressed by small positive integers in URLs, wrapped in a
//! newtype so they cannot be confused with counts or amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvelopeId(u64);

impl EnvelopeId {
    /// Create an ID from a raw integer
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying integer
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EnvelopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EnvelopeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
