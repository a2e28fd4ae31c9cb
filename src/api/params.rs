//! Query and path parameter parsing
//!
//! Every parameter arrives as text. These helpers turn it into typed values
//! and decide which error kind a bad value produces for each endpoint:
//!
//! | Endpoint | Bad amount | Bad id |
//! |---|---|---|
//! | create | `InvalidInput` | - |
//! | update | `InvalidAmount` | `NotFound` |
//! | transfer | `NotFoundOrInvalid` | `NotFoundOrInvalid` |
//!
//! A query string that cannot be decoded at all (duplicate keys, a
//! non-numeric `limit`) is reported with the same error kind as a bad value.

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Amount, EnvelopeId};
use crate::services::envelope::{INVALID_AMOUNT_MESSAGE, INVALID_INPUT_MESSAGE};
use crate::services::transfer::NOT_FOUND_OR_INVALID_MESSAGE;

/// Message for a malformed `GET /audit` query
pub const INVALID_LIMIT_MESSAGE: &str = "Invalid limit. It must be a non-negative integer.";

/// A query string type with its endpoint's error for undecodable input
pub trait QueryParams: DeserializeOwned {
    fn malformed() -> EnvelopeError;

    /// Unwrap an extracted query, converting a rejection into [`Self::malformed`]
    fn from_query(query: Result<Query<Self>, QueryRejection>) -> EnvelopeResult<Self> {
        match query {
            Ok(Query(params)) => Ok(params),
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "Rejected query string");
                Err(Self::malformed())
            }
        }
    }
}

/// Query of `POST /envelopes`
#[derive(Debug, Default, Deserialize)]
pub struct CreateParams {
    pub title: Option<String>,
    pub budget: Option<String>,
}

impl CreateParams {
    /// Title and budget as sent
    ///
    /// Only presence and numeric form are checked here; the envelope itself
    /// is validated by the service.
    pub fn parse(&self) -> EnvelopeResult<(&str, Amount)> {
        let title = self.title.as_deref().ok_or_else(invalid_input)?;

        let budget = Amount::from_param(self.budget.as_deref()).map_err(|e| {
            debug!(reason = %e, "Rejected budget");
            invalid_input()
        })?;

        Ok((title, budget))
    }
}

impl QueryParams for CreateParams {
    fn malformed() -> EnvelopeError {
        invalid_input()
    }
}

/// Query of `PUT /envelopes/:id/update`
#[derive(Debug, Default, Deserialize)]
pub struct UpdateParams {
    /// Amount to withdraw
    pub budget: Option<String>,
    /// Optional new title
    pub title: Option<String>,
}

impl UpdateParams {
    /// Strictly positive withdrawal amount
    pub fn amount(&self) -> EnvelopeResult<Amount> {
        let amount = Amount::from_param(self.budget.as_deref()).map_err(|e| {
            debug!(reason = %e, "Rejected withdrawal amount");
            invalid_amount()
        })?;
        if !amount.is_positive() {
            return Err(invalid_amount());
        }

        Ok(amount)
    }
}

impl QueryParams for UpdateParams {
    fn malformed() -> EnvelopeError {
        invalid_amount()
    }
}

/// Query of `POST /envelopes/transfer/:from_id/:to_id`
#[derive(Debug, Default, Deserialize)]
pub struct TransferParams {
    pub amount: Option<String>,
}

impl TransferParams {
    /// Strictly positive transfer amount
    pub fn amount(&self) -> EnvelopeResult<Amount> {
        let amount = Amount::from_param(self.amount.as_deref())
            .ok()
            .filter(Amount::is_positive);

        amount.ok_or_else(not_found_or_invalid)
    }
}

impl QueryParams for TransferParams {
    fn malformed() -> EnvelopeError {
        not_found_or_invalid()
    }
}

/// Query of `GET /audit`
#[derive(Debug, Default, Deserialize)]
pub struct AuditParams {
    pub limit: Option<usize>,
}

impl AuditParams {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

impl QueryParams for AuditParams {
    fn malformed() -> EnvelopeError {
        EnvelopeError::InvalidInput(INVALID_LIMIT_MESSAGE.into())
    }
}

/// Parse an envelope id from a path segment
///
/// Text that is not a non-negative integer cannot name any envelope, so it
/// is reported as not found.
pub fn parse_id(raw: &str) -> EnvelopeResult<EnvelopeId> {
    raw.parse()
        .map_err(|_| EnvelopeError::envelope_not_found(raw))
}

/// Parse the two ids of a transfer path
pub fn parse_transfer_ids(from: &str, to: &str) -> EnvelopeResult<(EnvelopeId, EnvelopeId)> {
    match (from.parse::<EnvelopeId>(), to.parse::<EnvelopeId>()) {
        (Ok(from), Ok(to)) => Ok((from, to)),
        _ => Err(not_found_or_invalid()),
    }
}

fn invalid_input() -> EnvelopeError {
    EnvelopeError::InvalidInput(INVALID_INPUT_MESSAGE.into())
}

fn invalid_amount() -> EnvelopeError {
    EnvelopeError::InvalidAmount(INVALID_AMOUNT_MESSAGE.into())
}

fn not_found_or_invalid() -> EnvelopeError {
    EnvelopeError::NotFoundOrInvalid(NOT_FOUND_OR_INVALID_MESSAGE.into())
}
