//! Persisted audit ledger.
//!
//! The ledger is the single source of truth for which rotated files this
//! writer created. Retention pruning only ever deletes files listed here,
//! so files placed next to the logs by anything else are never touched.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::HashAlgorithm;
use crate::error::Result;

/// One created log file, as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Path of the created file.
    pub file_path: PathBuf,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// Digest of the file path under the configured algorithm. A
    /// canonical identifier, not a digest of file contents.
    pub content_hash: String,
}

/// Ordered record of files this writer created, persisted as JSON.
#[derive(Debug)]
pub struct AuditLedger {
    path: Option<PathBuf>,
    algorithm: HashAlgorithm,
    entries: Vec<AuditEntry>,
}

impl AuditLedger {
    /// Loads the ledger from `path`, or starts an in-memory ledger when
    /// no path is configured.
    ///
    /// A missing file is an empty ledger, not an error. An unreadable or
    /// corrupt file is treated as empty with a diagnostic warning.
    #[must_use]
    pub fn load(path: Option<PathBuf>, algorithm: HashAlgorithm) -> Self {
        let entries = match &path {
            None => Vec::new(),
            Some(p) if !p.exists() => {
                info!(target: "rotolog", path = %p.display(), "audit ledger missing, starting empty");
                Vec::new()
            }
            Some(p) => match fs::read_to_string(p) {
                Ok(raw) => match serde_json::from_str(&raw) {
                    Ok(entries) => entries,
                    Err(err) => {
                        warn!(target: "rotolog", path = %p.display(), %err, "audit ledger corrupt, starting empty");
                        Vec::new()
                    }
                },
                Err(err) => {
                    warn!(target: "rotolog", path = %p.display(), %err, "audit ledger unreadable, starting empty");
                    Vec::new()
                }
            },
        };
        Self {
            path,
            algorithm,
            entries,
        }
    }

    /// Returns the entries in creation order.
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Returns true if `file_path` is listed in the ledger.
    #[must_use]
    pub fn contains(&self, file_path: &Path) -> bool {
        self.entries.iter().any(|e| e.file_path == file_path)
    }

    /// Records a newly created file and persists the ledger.
    ///
    /// Recording a path that is already listed is a no-op, so reopening
    /// an existing file after a restart does not duplicate its entry.
    pub fn record(&mut self, file_path: &Path, created_at: DateTime<Utc>) -> Result<()> {
        if self.contains(file_path) {
            return Ok(());
        }
        self.entries.push(AuditEntry {
            file_path: file_path.to_path_buf(),
            created_at,
            content_hash: digest(self.algorithm, file_path),
        });
        self.persist()
    }

    /// Removes the entry for `file_path` and persists the ledger.
    pub fn remove(&mut self, file_path: &Path) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.file_path != file_path);
        if self.entries.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Writes the ledger to disk via a temp sibling and an atomic
    /// rename, so a crash mid-update cannot corrupt durable entries.
    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = temp_sibling(path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "ledger".to_string(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!("{name}.tmp"))
}

fn digest(algorithm: HashAlgorithm, file_path: &Path) -> String {
    let bytes = file_path.to_string_lossy();
    match algorithm {
        HashAlgorithm::Sha256 => {
            let hash = Sha256::digest(bytes.as_bytes());
            format!("{hash:x}")
        }
        HashAlgorithm::Blake3 => blake3::hash(bytes.as_bytes()).to_hex().to_string(),
    }
}
