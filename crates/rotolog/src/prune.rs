//! Retention pruner.
//!
//! Enforces a [`RetentionRule`] against the audit ledger: files beyond
//! the count cap, or older than the age cap, are deleted from disk and
//! dropped from the ledger. Only ledger-listed files are ever deleted.

use std::fs;
use std::io;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::audit::{AuditEntry, AuditLedger};
use crate::config::RetentionRule;
use crate::error::Result;

/// Enforces the retention rule on the ledger at time `now`.
///
/// With `max_count` set, the oldest entries beyond the newest N are
/// removed. With `max_age_days` set, entries created before the cutoff
/// are removed. A rule with neither dimension is a no-op.
///
/// A failed file deletion is logged on the diagnostic channel and the
/// ledger entry is removed anyway; the ledger reflects intent, not
/// filesystem ground truth.
pub fn enforce(rule: &RetentionRule, ledger: &mut AuditLedger, now: DateTime<Utc>) -> Result<()> {
    if !rule.is_active() {
        return Ok(());
    }

    let victims: Vec<AuditEntry> = if let Some(max) = rule.max_count {
        let mut entries = ledger.entries().to_vec();
        entries.sort_by_key(|e| e.created_at);
        let excess = entries.len().saturating_sub(max);
        entries.truncate(excess);
        entries
    } else if let Some(days) = rule.max_age_days {
        let cutoff = now - Duration::days(days);
        ledger
            .entries()
            .iter()
            .filter(|e| e.created_at < cutoff)
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    for entry in victims {
        if let Err(err) = fs::remove_file(&entry.file_path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(
                    target: "rotolog",
                    path = %entry.file_path.display(),
                    %err,
                    "failed to delete rotated log file"
                );
            }
        }
        ledger.remove(&entry.file_path)?;
    }
    Ok(())
}
