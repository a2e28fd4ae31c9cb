//! Request handlers
//!
//! Each handler parses its parameters, calls one service operation and
//! shapes the response. No handler touches the store directly.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::params::{
    parse_id, parse_transfer_ids, AuditParams, CreateParams, QueryParams, TransferParams,
    UpdateParams,
};
use super::response::{
    ApiError, ApiResult, AuditResponse, CreatedResponse, EnvelopeResponse, ListResponse,
    TransferResponse, UpdatedResponse, CREATED_MESSAGE, INSUFFICIENT_SOURCE_FUNDS_MESSAGE,
    TRANSFER_MESSAGE, UPDATED_MESSAGE,
};
use super::AppState;
use crate::error::EnvelopeError;
use crate::services::{EnvelopeService, TransferService};

/// `GET /`
pub async fn hello() -> &'static str {
    "hello world"
}

/// `POST /envelopes?title=&budget=`
pub async fn create_envelope(
    State(state): State<AppState>,
    query: Result<Query<CreateParams>, QueryRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let params = CreateParams::from_query(query)?;
    let (title, budget) = params.parse()?;
    let envelope = EnvelopeService::new(&state.storage).create(title, budget)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: CREATED_MESSAGE,
            envelope,
        }),
    ))
}

/// `GET /envelopes`
pub async fn list_envelopes(State(state): State<AppState>) -> ApiResult<Json<ListResponse>> {
    let snapshot = EnvelopeService::new(&state.storage).list()?;

    Ok(Json(ListResponse {
        envelopes: snapshot.envelopes,
        total_budget: snapshot.total_budget,
    }))
}

/// `GET /envelopes/:id`
pub async fn get_envelope(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EnvelopeResponse>> {
    let id = parse_id(&id)?;
    let envelope = EnvelopeService::new(&state.storage).get(id)?;

    Ok(Json(EnvelopeResponse { envelope }))
}

/// `PUT /envelopes/:id/update?budget=&title=`
///
/// The amount is validated before the id is resolved.
pub async fn update_envelope(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<UpdateParams>, QueryRejection>,
) -> ApiResult<Json<UpdatedResponse>> {
    let params = UpdateParams::from_query(query)?;
    let amount = params.amount()?;
    let id = parse_id(&id)?;

    let withdrawal =
        EnvelopeService::new(&state.storage).update(id, amount, params.title.as_deref())?;

    Ok(Json(UpdatedResponse {
        message: UPDATED_MESSAGE,
        envelope: withdrawal.after,
        total_budget: withdrawal.total_budget,
    }))
}

/// `DELETE /envelopes/:id`
///
/// Both outcomes have empty bodies.
pub async fn delete_envelope(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id).map_err(|e| ApiError::from(e).without_body())?;

    EnvelopeService::new(&state.storage)
        .delete(id)
        .map_err(|e| match e {
            EnvelopeError::NotFound { .. } => ApiError::from(e).without_body(),
            other => other.into(),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /envelopes/transfer/:from_id/:to_id?amount=`
pub async fn transfer(
    State(state): State<AppState>,
    Path((from_id, to_id)): Path<(String, String)>,
    query: Result<Query<TransferParams>, QueryRejection>,
) -> ApiResult<Json<TransferResponse>> {
    let (from_id, to_id) = parse_transfer_ids(&from_id, &to_id)?;
    let amount = TransferParams::from_query(query)?.amount()?;

    let outcome = TransferService::new(&state.storage)
        .transfer(from_id, to_id, amount)
        .map_err(|e| match e {
            EnvelopeError::InsufficientFunds { .. } => {
                let status = ApiError::from(e).status();
                ApiError::new(status, INSUFFICIENT_SOURCE_FUNDS_MESSAGE)
            }
            other => other.into(),
        })?;

    Ok(Json(TransferResponse {
        message: TRANSFER_MESSAGE,
        envelopes: outcome.envelopes,
    }))
}

/// `GET /audit?limit=`
pub async fn audit_log(
    State(state): State<AppState>,
    query: Result<Query<AuditParams>, QueryRejection>,
) -> ApiResult<Json<AuditResponse>> {
    let limit = AuditParams::from_query(query)?.limit();
    let entries = state.storage.audit.read_recent(limit)?;

    Ok(Json(AuditResponse { entries }))
}
