//! Writer facade.
//!
//! The public surface consumed by a logging framework: a two-part
//! [`LogWriter`] contract (write a record, shut down) over one owned
//! resource. Internal failures never reach the record producer; they are
//! reported on the `tracing` diagnostic channel instead.

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{error, warn};

use crate::config::RotationConfig;
use crate::error::Result;
use crate::format::{format_record, LINE_SEP};
use crate::record::LogRecord;
use crate::stream::StreamManager;

/// The write/shutdown contract exposed to the owning logging framework.
pub trait LogWriter: Send + Sync {
    /// Formats and persists one record. Never raises: internal errors
    /// are swallowed and reported as diagnostics.
    fn write(&self, record: &LogRecord);

    /// Flushes a final terminator and closes the stream. Idempotent;
    /// the owning framework invokes this once during graceful shutdown.
    fn shutdown(&self);
}

struct WriterState {
    stream: StreamManager,
    shut_down: bool,
}

/// Rotating file writer.
///
/// Construction validates the configuration and loads the audit ledger;
/// the first file is opened lazily on the first write. Concurrent calls
/// are serialized by an internal mutex, so the rotation check and the
/// close/prune/open sequence form one critical section relative to
/// writes.
pub struct RotatingFileWriter {
    state: Mutex<WriterState>,
}

impl RotatingFileWriter {
    /// Creates a writer for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. Misconfiguration
    /// fails here rather than silently per record.
    pub fn new(config: RotationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(WriterState {
                stream: StreamManager::new(config),
                shut_down: false,
            }),
        })
    }
}

impl LogWriter for RotatingFileWriter {
    fn write(&self, record: &LogRecord) {
        let mut state = self.state.lock();
        if state.shut_down {
            warn!(
                target: "rotolog",
                logname = %record.logname,
                "record dropped: writer already shut down"
            );
            return;
        }
        let rendered = format_record(record, state.stream.config().utc);
        if let Err(err) = state.stream.write(rendered.as_bytes(), Utc::now()) {
            error!(target: "rotolog", %err, "failed to persist log record");
        }
    }

    fn shutdown(&self) {
        let mut state = self.state.lock();
        if state.shut_down {
            return;
        }
        state.shut_down = true;
        if let Err(err) = state.stream.finish(LINE_SEP.as_bytes()) {
            error!(target: "rotolog", %err, "failed to close log stream");
        }
    }
}

impl Drop for RotatingFileWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
