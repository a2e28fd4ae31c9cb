//! Audit trail for the envelope service
//!
//! Records every successful create, update, delete and transfer with
//! before/after snapshots. The trail lives in memory only.
//!
//! - `AuditEntry`: a single record with timestamp, operation, the envelope
//!   ids touched and before/after envelope snapshots.
//! - `AuditLogger`: bounded in-memory store that also emits each entry as a
//!   `tracing` event.
//! - `generate_diff`: summary of what an update changed on an envelope.
//!
//! # Example
//!
//! ```rust,ignore
//! use envelope_api::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(1000);
//! logger.log(AuditEntry::updated(&before, &envelope))?;
//! for entry in logger.read_recent(10)? {
//!     println!("{}", entry);
//! }
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
