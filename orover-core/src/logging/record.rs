//! The wire record forwarded to the log server (§4.7).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One log event, independent of the envelope taxonomy (the log server sits
/// below the bus and never decodes an [`crate::message::Envelope`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// The emitting actor's derived name.
    pub logger: String,
    /// Severity of the event.
    pub level: Severity,
    /// Rendered message text.
    pub message: String,
    /// When the event was recorded, local time (matches the envelope
    /// timestamp convention, §3).
    pub ts: DateTime<Local>,
}

/// Severity levels, ordered least to most severe, matching the
/// `loglevel` values §4.3 recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Parse a `loglevel` configuration value; unrecognized values fall
    /// back to `Info` (the fabric never raises on configuration content).
    pub fn from_config_value(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "DEBUG" => Self::Debug,
            "WARNING" | "WARN" => Self::Warning,
            "ERROR" => Self::Error,
            "CRITICAL" => Self::Critical,
            _ => Self::Info,
        }
    }

    /// Map a [`tracing::Level`] to the taxonomy used here.
    pub fn from_tracing_level(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warning,
            tracing::Level::ERROR => Self::Error,
        }
    }

    /// Upper-case name, as it would appear formatted in a log line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_config_value_falls_back_to_info() {
        assert_eq!(Severity::from_config_value("CHATTY"), Severity::Info);
        assert_eq!(Severity::from_config_value("debug"), Severity::Debug);
    }

    #[test]
    fn severities_order_least_to_most_severe() {
        assert!(Severity::Debug < Severity::Critical);
        assert!(Severity::Warning < Severity::Error);
    }
}
