//! Stream manager.
//!
//! Owns the currently open log file and coordinates handle swaps with the
//! rotation policy: on each write the policy is consulted, and a due
//! rotation runs close → audit → prune → open → symlink before the bytes
//! are appended. The clock is a parameter throughout so rotation behavior
//! is testable without waiting on wall time.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::audit::AuditLedger;
use crate::config::RotationConfig;
use crate::error::Result;
use crate::{prune, rotation};

/// The open file handle plus the rotation bucket it belongs to.
struct ActiveStream {
    file: File,
    path: PathBuf,
    key: String,
    bytes_written: u64,
}

/// Owns the active log file and performs rotations.
pub struct StreamManager {
    config: RotationConfig,
    ledger: AuditLedger,
    active: Option<ActiveStream>,
}

impl StreamManager {
    /// Creates a manager for the given configuration, loading the audit
    /// ledger. No file is opened until the first write.
    #[must_use]
    pub fn new(config: RotationConfig) -> Self {
        let ledger = AuditLedger::load(config.audit_file.clone(), config.hash_algorithm);
        Self {
            config,
            ledger,
            active: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Returns the audit ledger.
    #[must_use]
    pub const fn ledger(&self) -> &AuditLedger {
        &self.ledger
    }

    /// Returns the path of the active file, if one is open.
    #[must_use]
    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }

    /// Appends `bytes` to the active file, rotating first if the policy
    /// requires it. The first write ever opens the initial file.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem rejects the open or the write.
    pub fn write(&mut self, bytes: &[u8], now: DateTime<Utc>) -> Result<()> {
        self.roll_if_due(bytes.len() as u64, now)?;
        if let Some(active) = self.active.as_mut() {
            active.file.write_all(bytes)?;
            active.bytes_written += bytes.len() as u64;
        }
        Ok(())
    }

    /// Appends a final terminator to the active file, then closes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminator cannot be written.
    pub fn finish(&mut self, terminator: &[u8]) -> Result<()> {
        if let Some(active) = self.active.as_mut() {
            active.file.write_all(terminator)?;
        }
        self.close()
    }

    /// Flushes and closes the active file. Idempotent; safe to call with
    /// no open handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut active) = self.active.take() {
            active.file.flush()?;
        }
        Ok(())
    }

    fn roll_if_due(&mut self, pending: u64, now: DateTime<Utc>) -> Result<()> {
        let target = match &self.active {
            None => {
                let key = rotation::rotation_key(&self.config, now);
                let path = rotation::log_path(&self.config, &key, 0);
                Some((path, key))
            }
            Some(active) if rotation::time_rotation_due(&self.config, &active.key, now) => {
                let key = rotation::rotation_key(&self.config, now);
                let path = rotation::log_path(&self.config, &key, 0);
                Some((path, key))
            }
            // Size overflow stays inside the current time bucket: the key
            // is preserved and the filename gains the next free suffix.
            Some(active)
                if rotation::size_rotation_due(
                    self.config.max_size,
                    active.bytes_written,
                    pending,
                ) =>
            {
                let (path, _) = rotation::next_free_path(&self.config, &active.key);
                Some((path, active.key.clone()))
            }
            Some(_) => None,
        };

        if let Some((path, key)) = target {
            self.close()?;
            self.open_stream(path, key, now)?;
        }
        Ok(())
    }

    fn open_stream(&mut self, path: PathBuf, key: String, now: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = self.open_options().open(&path)?;
        let bytes_written = file.metadata()?.len();

        self.ledger.record(&path, now)?;
        prune::enforce(&self.config.retention, &mut self.ledger, now)?;

        // Best effort: a broken symlink must not cost the record that
        // triggered the rotation.
        if self.config.create_symlink {
            if let Err(err) = self.refresh_symlink(&path) {
                warn!(
                    target: "rotolog",
                    path = %path.display(),
                    %err,
                    "failed to update active-file symlink"
                );
            }
        }

        self.active = Some(ActiveStream {
            file,
            path,
            key,
            bytes_written,
        });
        Ok(())
    }

    fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.create(true);
        if self.config.file_options.append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        #[cfg(unix)]
        if let Some(mode) = self.config.file_options.mode {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        options
    }

    #[cfg(unix)]
    fn refresh_symlink(&self, target: &Path) -> Result<()> {
        let dir = target.parent().unwrap_or(Path::new("."));
        let link = dir.join(&self.config.symlink_name);
        if fs::symlink_metadata(&link).is_ok() {
            fs::remove_file(&link)?;
        }
        let name = target.file_name().map_or(target, Path::new);
        std::os::unix::fs::symlink(name, &link)?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn refresh_symlink(&self, _target: &Path) -> Result<()> {
        Ok(())
    }
}
