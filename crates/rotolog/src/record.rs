//! Log record and severity types.
//!
//! This module provides:
//! - [`LogLevel`] — Severity levels for log records
//! - [`LogRecord`] — The record shape accepted by the writer facade

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log severity levels, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed debugging information
    Trace = 0,
    /// Debugging information
    Debug = 1,
    /// General information
    Info = 2,
    /// Warning conditions
    Warn = 3,
    /// Error conditions
    Error = 4,
}

impl LogLevel {
    /// Returns the lowercase string representation of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Returns the uppercase label used in formatted header lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Returns true if this level is at least as severe as the given level.
    #[must_use]
    pub fn is_at_least(&self, level: Self) -> bool {
        *self >= level
    }
}

/// A log record handed to the writer facade.
///
/// Records are immutable once constructed and are not retained by the
/// writer beyond the synchronous formatting step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the record was created
    pub timestamp: DateTime<Utc>,
    /// Severity level
    pub level: LogLevel,
    /// Name of the logger that produced the record
    pub logname: String,
    /// The log message
    pub message: String,
    /// Optional structured attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<serde_json::Value>,
}

impl LogRecord {
    /// Creates a record timestamped now, without attributes.
    #[must_use]
    pub fn new(level: LogLevel, logname: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logname: logname.into(),
            message: message.into(),
            attrs: None,
        }
    }

    /// Attaches structured attributes to the record.
    #[must_use]
    pub fn with_attrs(mut self, attrs: serde_json::Value) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Overrides the record timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn log_level_is_at_least() {
        assert!(LogLevel::Error.is_at_least(LogLevel::Trace));
        assert!(LogLevel::Error.is_at_least(LogLevel::Error));
        assert!(!LogLevel::Debug.is_at_least(LogLevel::Info));
    }

    #[test]
    fn log_level_labels() {
        assert_eq!(LogLevel::Trace.as_str(), "trace");
        assert_eq!(LogLevel::Trace.label(), "TRACE");
        assert_eq!(LogLevel::Error.as_str(), "error");
        assert_eq!(LogLevel::Error.label(), "ERROR");
    }

    #[test]
    fn log_level_serialization() {
        let json = serde_json::to_string(&LogLevel::Info).expect("serialize");
        assert_eq!(json, "\"info\"");

        let level: LogLevel = serde_json::from_str("\"warn\"").expect("deserialize");
        assert_eq!(level, LogLevel::Warn);
    }

    #[test]
    fn record_construction() {
        let record = LogRecord::new(LogLevel::Info, "app", "started");
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.logname, "app");
        assert_eq!(record.message, "started");
        assert!(record.attrs.is_none());
    }

    #[test]
    fn record_with_attrs() {
        let record = LogRecord::new(LogLevel::Debug, "app", "detail")
            .with_attrs(serde_json::json!({"a": 1}));
        assert_eq!(record.attrs, Some(serde_json::json!({"a": 1})));
    }

    #[test]
    fn record_serialization_skips_missing_attrs() {
        let record = LogRecord::new(LogLevel::Info, "app", "msg");
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("attrs"));
    }
}
