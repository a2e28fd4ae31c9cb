//! Configuration module for the envelope service
//!
//! This module provides the server settings: listen address, envelope id
//! assignment, audit capacity, CORS, and log format.

pub mod settings;

pub use settings::{IdStrategy, LogFormat, Settings};
