//! In-memory audit logger
//!
//! Keeps the most recent audit entries in a bounded ring. Nothing is written
//! to disk; each entry is also emitted as a `tracing` event so it shows up in
//! the service log.

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::error::{EnvelopeError, EnvelopeResult};

use super::entry::AuditEntry;

/// Bounded, append-only store of audit entries
pub struct AuditLogger {
    capacity: usize,
    entries: RwLock<VecDeque<AuditEntry>>,
}

impl AuditLogger {
    /// Create a logger that keeps at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Maximum number of entries retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Log an audit entry, evicting the oldest one when full
    pub fn log(&self, entry: AuditEntry) -> EnvelopeResult<()> {
        tracing::info!(
            target: "envelope_api::audit",
            operation = %entry.operation,
            envelopes = ?entry.envelope_ids,
            summary = entry.summary.as_deref().unwrap_or(""),
            "audit"
        );

        let mut entries = self.entries.write().map_err(|e| {
            EnvelopeError::Storage(format!("Failed to acquire audit write lock: {}", e))
        })?;

        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);

        Ok(())
    }

    /// All retained entries, oldest first
    pub fn read_all(&self) -> EnvelopeResult<Vec<AuditEntry>> {
        let entries = self.entries.read().map_err(|e| {
            EnvelopeError::Storage(format!("Failed to acquire audit read lock: {}", e))
        })?;

        Ok(entries.iter().cloned().collect())
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> EnvelopeResult<Vec<AuditEntry>> {
        let entries = self.entries.read().map_err(|e| {
            EnvelopeError::Storage(format!("Failed to acquire audit read lock: {}", e))
        })?;

        let start = entries.len().saturating_sub(count);
        Ok(entries.iter().skip(start).cloned().collect())
    }

    /// Number of retained entries
    pub fn entry_count(&self) -> EnvelopeResult<usize> {
        let entries = self.entries.read().map_err(|e| {
            EnvelopeError::Storage(format!("Failed to acquire audit read lock: {}", e))
        })?;

        Ok(entries.len())
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}
