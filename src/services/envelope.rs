//! Envelope service
//!
//! Provides business logic for envelope management: creation, lookup,
//! withdrawal with optional rename, and deletion. Every successful mutation
//! is recorded in the audit trail.

use tracing::{debug, info, warn};

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Amount, Envelope, EnvelopeId};
use crate::storage::{EnvelopeSnapshot, Storage, Withdrawal};

/// Message for rejected create requests
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input: Title and positive budget are required.";

/// Message for rejected withdrawal amounts
pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid amount. It must be a positive number.";

/// Service for envelope management
pub struct EnvelopeService<'a> {
    storage: &'a Storage,
}

impl<'a> EnvelopeService<'a> {
    /// Create a new envelope service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new envelope
    ///
    /// The title must be non-empty and the budget must not be negative. The
    /// title is stored exactly as given.
    pub fn create(&self, title: &str, budget: Amount) -> EnvelopeResult<Envelope> {
        // The repository assigns the real id on insert
        let draft = Envelope::new(EnvelopeId::new(0), title, budget);
        draft.validate().map_err(|e| {
            debug!(reason = %e, "Rejected envelope");
            EnvelopeError::InvalidInput(INVALID_INPUT_MESSAGE.into())
        })?;

        let envelope = self.storage.envelopes.insert(draft.title, draft.budget)?;
        info!(id = %envelope.id, title = %envelope.title, budget = %envelope.budget, "Envelope created");

        if let Err(e) = self.storage.log_create(&envelope) {
            warn!(error = %e, "Failed to record audit entry");
        }

        Ok(envelope)
    }

    /// List all envelopes with the total budget
    pub fn list(&self) -> EnvelopeResult<EnvelopeSnapshot> {
        let snapshot = self.storage.envelopes.get_all()?;
        debug!(count = snapshot.envelopes.len(), "Listed envelopes");
        Ok(snapshot)
    }

    /// Get an envelope by ID
    pub fn get(&self, id: EnvelopeId) -> EnvelopeResult<Envelope> {
        self.storage
            .envelopes
            .get(id)?
            .ok_or_else(|| EnvelopeError::envelope_not_found(id.to_string()))
    }

    /// Withdraw `amount` from an envelope, renaming it if a non-empty title
    /// is given
    pub fn update(
        &self,
        id: EnvelopeId,
        amount: Amount,
        title: Option<&str>,
    ) -> EnvelopeResult<Withdrawal> {
        if !amount.is_positive() {
            return Err(EnvelopeError::InvalidAmount(INVALID_AMOUNT_MESSAGE.into()));
        }

        let new_title = title.filter(|t| !t.is_empty()).map(str::to_string);
        let withdrawal = self.storage.envelopes.withdraw(id, amount, new_title)?;
        info!(
            id = %id,
            amount = %amount,
            budget = %withdrawal.after.budget,
            total_budget = %withdrawal.total_budget,
            "Envelope updated"
        );

        if let Err(e) = self
            .storage
            .log_update(&withdrawal.before, &withdrawal.after)
        {
            warn!(error = %e, "Failed to record audit entry");
        }

        Ok(withdrawal)
    }

    /// Delete an envelope, returning it
    pub fn delete(&self, id: EnvelopeId) -> EnvelopeResult<Envelope> {
        let removed = self
            .storage
            .envelopes
            .delete(id)?
            .ok_or_else(|| EnvelopeError::envelope_not_found(id.to_string()))?;
        info!(id = %id, title = %removed.title, "Envelope deleted");

        if let Err(e) = self.storage.log_delete(&removed) {
            warn!(error = %e, "Failed to record audit entry");
        }

        Ok(removed)
    }
}
