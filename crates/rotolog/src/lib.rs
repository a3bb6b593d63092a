//! # rotolog
//!
//! Rotating file log writer with audit-tracked retention.
//!
//! This crate provides:
//!
//! - [`LogRecord`] / [`LogLevel`] — The record shape accepted by the writer
//! - [`RotationConfig`] — Frequency, size threshold, retention, symlink and
//!   audit settings, validated fail-fast at construction
//! - [`format_record`] — The four-line record formatter
//! - [`StreamManager`] — Owns the active file and performs rotations
//! - [`AuditLedger`] — Persisted record of created files, bounding pruning
//!   to self-created files only
//! - [`RotatingFileWriter`] / [`LogWriter`] — The write/shutdown facade;
//!   logging failures never raise into the host application
//!
//! ## Example
//!
//! ```no_run
//! use rotolog::{
//!     Frequency, LogLevel, LogRecord, LogWriter, RetentionRule, RotatingFileWriter,
//!     RotationConfig,
//! };
//!
//! # fn main() -> rotolog::Result<()> {
//! let config = RotationConfig::new("logs/app")
//!     .with_frequency(Frequency::Daily)
//!     .with_extension(".log")
//!     .with_max_size(10 * 1024 * 1024)
//!     .with_retention(RetentionRule::keep_newest(10))
//!     .with_audit_file("logs/audit.json")
//!     .with_symlink(true);
//!
//! let writer = RotatingFileWriter::new(config)?;
//! writer.write(&LogRecord::new(LogLevel::Info, "app", "started"));
//! writer.shutdown();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
pub mod config;
pub mod error;
pub mod format;
pub mod prune;
pub mod record;
pub mod rotation;
pub mod stream;
pub mod writer;

// Re-export main types
pub use audit::{AuditEntry, AuditLedger};
pub use config::{
    FileOptions, Frequency, HashAlgorithm, RetentionRule, RotationConfig, DEFAULT_DATE_FORMAT,
    DEFAULT_SYMLINK_NAME,
};
pub use error::{Result, RotologError};
pub use format::{format_record, LINE_SEP};
pub use record::{LogLevel, LogRecord};
pub use stream::StreamManager;
pub use writer::{LogWriter, RotatingFileWriter};
