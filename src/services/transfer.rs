//! Transfer service
//!
//! Provides business logic for moving funds between envelopes. A transfer
//! debits the source and credits the destination in one step; the total
//! budget does not change.

use tracing::{info, warn};

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Amount, EnvelopeId};
use crate::storage::{Storage, TransferOutcome};

/// Message for unknown envelopes or a rejected amount
pub const NOT_FOUND_OR_INVALID_MESSAGE: &str =
    "One or both envelopes not found, or invalid amount";

/// Service for managing transfers between envelopes
pub struct TransferService<'a> {
    storage: &'a Storage,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Move `amount` from one envelope to another
    ///
    /// Unknown envelopes and non-positive amounts are reported together as
    /// `NotFoundOrInvalid`; a source that cannot cover the amount yields
    /// `InsufficientFunds`.
    pub fn transfer(
        &self,
        from_id: EnvelopeId,
        to_id: EnvelopeId,
        amount: Amount,
    ) -> EnvelopeResult<TransferOutcome> {
        if !amount.is_positive() {
            return Err(EnvelopeError::NotFoundOrInvalid(
                NOT_FOUND_OR_INVALID_MESSAGE.into(),
            ));
        }

        let outcome = self
            .storage
            .envelopes
            .transfer(from_id, to_id, amount)
            .map_err(|e| match e {
                EnvelopeError::NotFound { .. } => {
                    EnvelopeError::NotFoundOrInvalid(NOT_FOUND_OR_INVALID_MESSAGE.into())
                }
                other => other,
            })?;

        info!(
            from = %from_id,
            to = %to_id,
            amount = %amount,
            "Transfer completed"
        );

        if let Err(e) = self.storage.log_transfer(&outcome, amount) {
            warn!(error = %e, "Failed to record audit entry");
        }

        Ok(outcome)
    }
}
