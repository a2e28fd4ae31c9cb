//! Storage layer for the envelope service
//!
//! State lives only in process memory. `Storage` owns the envelope
//! repository and the audit trail and is shared between request handlers
//! through the application state.

pub mod envelopes;

pub use envelopes::{EnvelopeRepository, EnvelopeSnapshot, TransferOutcome, Withdrawal};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::EnvelopeResult;
use crate::models::{Amount, Envelope};

/// Main storage coordinator
pub struct Storage {
    pub envelopes: EnvelopeRepository,
    pub audit: AuditLogger,
}

impl Storage {
    /// Create empty storage configured from settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            envelopes: EnvelopeRepository::new(settings.id_strategy),
            audit: AuditLogger::new(settings.audit_capacity),
        }
    }

    /// Record the creation of an envelope
    pub fn log_create(&self, envelope: &Envelope) -> EnvelopeResult<()> {
        self.audit.log(AuditEntry::created(envelope))
    }

    /// Record an update, with a summary of the changed fields
    pub fn log_update(&self, before: &Envelope, after: &Envelope) -> EnvelopeResult<()> {
        self.audit.log(AuditEntry::updated(before, after))
    }

    /// Record the deletion of an envelope
    pub fn log_delete(&self, envelope: &Envelope) -> EnvelopeResult<()> {
        self.audit.log(AuditEntry::deleted(envelope))
    }

    /// Record a transfer between two envelopes
    pub fn log_transfer(&self, outcome: &TransferOutcome, amount: Amount) -> EnvelopeResult<()> {
        self.audit.log(AuditEntry::transferred(
            [&outcome.from_before, &outcome.to_before],
            [&outcome.from_after, &outcome.to_after],
            amount,
        ))
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
