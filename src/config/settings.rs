//! Server settings for the envelope service
//!
//! Settings are assembled from command-line flags and environment variables
//! by the binary; there is no settings file.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::error::EnvelopeError;

/// How new envelope ids are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Strictly increasing counter; ids are never reused (default)
    #[default]
    Monotonic,
    /// `number of envelopes + 1`; may collide after deletions
    Length,
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Monotonic => write!(f, "monotonic"),
            IdStrategy::Length => write!(f, "length"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monotonic" => Ok(IdStrategy::Monotonic),
            "length" | "legacy" => Ok(IdStrategy::Length),
            other => Err(EnvelopeError::Config(format!(
                "Unknown id strategy '{}' (expected 'monotonic' or 'length')",
                other
            ))),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(EnvelopeError::Config(format!(
                "Unknown log format '{}' (expected 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Settings for the HTTP server and the envelope store
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address to bind
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Envelope id assignment rule
    pub id_strategy: IdStrategy,

    /// Maximum number of audit entries kept in memory
    pub audit_capacity: usize,

    /// Whether cross-origin requests are allowed from any origin
    pub cors_enabled: bool,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: Self::DEFAULT_PORT,
            id_strategy: IdStrategy::default(),
            audit_capacity: Self::DEFAULT_AUDIT_CAPACITY,
            cors_enabled: true,
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_AUDIT_CAPACITY: usize = 1000;

    /// Address the server binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check settings before the server starts
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if self.port == 0 {
            return Err(EnvelopeError::Config("Port must be non-zero".into()));
        }

        if self.audit_capacity == 0 {
            return Err(EnvelopeError::Config(
                "Audit capacity must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.id_strategy, IdStrategy::Monotonic);
        assert_eq!(settings.audit_capacity, 1000);
        assert!(settings.cors_enabled);
        assert_eq!(settings.log_format, LogFormat::Text);
        assert_eq!(settings.socket_addr().to_string(), "0.0.0.0:3000");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let settings = Settings {
            port: 0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, EnvelopeError::Config(_)));
    }

    #[test]
    fn test_validation_rejects_zero_audit_capacity() {
        let settings = Settings {
            audit_capacity: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_id_strategy_from_str() {
        assert_eq!("monotonic".parse::<IdStrategy>().unwrap(), IdStrategy::Monotonic);
        assert_eq!("LENGTH".parse::<IdStrategy>().unwrap(), IdStrategy::Length);
        assert_eq!("legacy".parse::<IdStrategy>().unwrap(), IdStrategy::Length);
        assert!("random".parse::<IdStrategy>().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
