//! Logging setup
//!
//! Installs a global `tracing` subscriber. The filter comes from `RUST_LOG`;
//! when it is unset or cannot be parsed the filter is `info`, and an
//! unparseable value is reported once the subscriber is running.

use std::env;

use tracing::warn;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::error::{EnvelopeError, EnvelopeResult};

const DEFAULT_FILTER: &str = "info";

/// Initialize the global subscriber
///
/// Fails only if a subscriber is already installed.
pub fn init(format: LogFormat) -> EnvelopeResult<()> {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = build_filter(directives.as_deref())?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    };
    result.map_err(|e| EnvelopeError::Config(format!("Failed to initialize logging: {}", e)))?;

    if let Some(e) = rejected {
        warn!(error = %e, filter = DEFAULT_FILTER, "Ignoring invalid RUST_LOG");
    }

    Ok(())
}

/// Filter for the given directives, with the parse error if they were
/// replaced by the default
fn build_filter(directives: Option<&str>) -> EnvelopeResult<(EnvFilter, Option<ParseError>)> {
    let rejected = match directives {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => return Ok((filter, None)),
            Err(e) => Some(e),
        },
        None => None,
    };

    let filter = EnvFilter::try_new(DEFAULT_FILTER)
        .map_err(|e| EnvelopeError::Config(format!("Invalid log filter: {}", e)))?;

    Ok((filter, rejected))
}
