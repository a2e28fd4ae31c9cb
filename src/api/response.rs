//! Response bodies and error conversion
//!
//! Success bodies mirror the JSON the service has always returned
//! (`totalBudget` is camel-cased on the wire). Errors become
//! `{"error": message}` with the status from [`EnvelopeError::status_code`],
//! or an empty body where an endpoint answers without one.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::audit::AuditEntry;
use crate::error::EnvelopeError;
use crate::models::{Amount, Envelope};

pub const CREATED_MESSAGE: &str = "Envelope created successfully!";
pub const UPDATED_MESSAGE: &str = "Envelope updated successfully!";
pub const TRANSFER_MESSAGE: &str = "Transfer successful";

pub const NOT_FOUND_MESSAGE: &str = "Envelope not found";
pub const INSUFFICIENT_FUNDS_MESSAGE: &str = "Insufficient funds in the envelope.";
pub const INSUFFICIENT_SOURCE_FUNDS_MESSAGE: &str = "Insufficient funds in the source envelope";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub envelope: Envelope,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub envelopes: Vec<Envelope>,
    #[serde(rename = "totalBudget")]
    pub total_budget: Amount,
}

#[derive(Debug, Serialize)]
pub struct EnvelopeResponse {
    pub envelope: Envelope,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub message: &'static str,
    pub envelope: Envelope,
    #[serde(rename = "totalBudget")]
    pub total_budget: Amount,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub message: &'static str,
    pub envelopes: Vec<Envelope>,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub entries: Vec<AuditEntry>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// An error on its way to becoming an HTTP response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: Option<String>,
}

impl ApiError {
    /// Error with a JSON `{error}` body
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }

    /// Error with no body
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Drop the body, keeping the status
    pub fn without_body(self) -> Self {
        Self::empty(self.status)
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_client_error() {
            warn!(status = status.as_u16(), error = %err, "Request rejected");
        } else {
            error!(error = %err, "Request failed");
        }

        let message = match err {
            EnvelopeError::InvalidInput(m)
            | EnvelopeError::InvalidAmount(m)
            | EnvelopeError::NotFoundOrInvalid(m) => m,
            EnvelopeError::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            EnvelopeError::InsufficientFunds { .. } => INSUFFICIENT_FUNDS_MESSAGE.to_string(),
            EnvelopeError::Config(_) | EnvelopeError::Io(_) | EnvelopeError::Storage(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        Self::new(status, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.message {
            Some(message) => (self.status, Json(ErrorBody { error: &message })).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
