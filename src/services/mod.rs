//! Service layer for the envelope service
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, logging and audit recording.

pub mod envelope;
pub mod transfer;

pub use envelope::EnvelopeService;
pub use transfer::TransferService;
