//! Core data models for the envelope service
//!
//! This module contains the data structures that represent the budgeting
//! domain: envelopes, their identifiers, and monetary amounts.

pub mod amount;
pub mod envelope;
pub mod ids;

pub use amount::{Amount, AmountError};
pub use envelope::{Envelope, EnvelopeValidationError};
pub use ids::EnvelopeId;
