//! Envelope API - in-memory envelope budgeting over HTTP
//!
//! Clients create envelopes (named budget buckets), list and fetch them,
//! withdraw from them, delete them and move funds between them. All state is
//! held in process memory and is lost on exit.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Server settings
//! - `error`: Custom error types
//! - `models`: Envelopes, ids and amounts
//! - `storage`: Lock-protected in-memory envelope store
//! - `services`: Business logic layer
//! - `audit`: In-memory audit trail
//! - `api`: axum router and handlers
//! - `server`: Listener and shutdown handling
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use envelope_api::config::Settings;
//!
//! let settings = Settings::default();
//! envelope_api::logging::init(settings.log_format)?;
//! envelope_api::server::serve(settings).await?;
//! ```

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;

pub use error::{EnvelopeError, EnvelopeResult};
