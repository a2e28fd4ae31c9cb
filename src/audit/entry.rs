//! Audit records
//!
//! One [`AuditEntry`] per successful mutation. Entries carry full envelope
//! snapshots rather than free-form JSON, so `/audit` consumers see the same
//! shape as the envelope endpoints.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::generate_diff;
use crate::models::{Amount, Envelope, EnvelopeId};

/// Kind of mutation recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    /// Withdrawal, optionally with a rename
    Update,
    Delete,
    Transfer,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded mutation
///
/// `envelope_ids` lists every envelope touched, source first for transfers.
/// `before` and `after` hold snapshots in the same order; a create has no
/// `before` and a delete has no `after`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub recorded_at: DateTime<Utc>,
    pub operation: Operation,
    pub envelope_ids: Vec<EnvelopeId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<Envelope>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<Envelope>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    fn record(operation: Operation, before: Vec<Envelope>, after: Vec<Envelope>) -> Self {
        let touched = if before.is_empty() { &after } else { &before };
        let envelope_ids = touched.iter().map(|e| e.id).collect();

        Self {
            recorded_at: Utc::now(),
            operation,
            envelope_ids,
            before,
            after,
            summary: None,
        }
    }

    pub fn created(envelope: &Envelope) -> Self {
        Self {
            summary: Some(format!("'{}' with {}", envelope.title, envelope.budget)),
            ..Self::record(Operation::Create, Vec::new(), vec![envelope.clone()])
        }
    }

    /// Withdrawal or rename; the summary lists the changed fields
    pub fn updated(before: &Envelope, after: &Envelope) -> Self {
        Self {
            summary: generate_diff(before, after),
            ..Self::record(Operation::Update, vec![before.clone()], vec![after.clone()])
        }
    }

    pub fn deleted(envelope: &Envelope) -> Self {
        Self {
            summary: Some(format!("'{}' with {}", envelope.title, envelope.budget)),
            ..Self::record(Operation::Delete, vec![envelope.clone()], Vec::new())
        }
    }

    /// Transfer of `amount`; `before` and `after` are `[source, destination]`
    pub fn transferred(before: [&Envelope; 2], after: [&Envelope; 2], amount: Amount) -> Self {
        let [from, to] = before;

        Self {
            summary: Some(format!("{} from '{}' to '{}'", amount, from.title, to.title)),
            ..Self::record(
                Operation::Transfer,
                before.iter().map(|e| (*e).clone()).collect(),
                after.iter().map(|e| (*e).clone()).collect(),
            )
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.envelope_ids.iter().map(|id| format!("#{}", id)).collect();

        write!(
            f,
            "[{}] {} {}",
            self.recorded_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            ids.join(" -> ")
        )?;

        match &self.summary {
            Some(summary) => write!(f, ": {}", summary),
            None => Ok(()),
        }
    }
}
