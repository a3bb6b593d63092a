//! Writer configuration.
//!
//! This module provides:
//! - [`Frequency`] — Time-based rotation cadence
//! - [`HashAlgorithm`] — Digest algorithm for audit entries
//! - [`RetentionRule`] — Cap on retained rotated files
//! - [`FileOptions`] — Open flags for log files
//! - [`RotationConfig`] — Full configuration with fail-fast validation

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RotologError};

/// Default name for the stable symlink pointing at the active file.
pub const DEFAULT_SYMLINK_NAME: &str = "current.log";

/// Default date-format template (`YYYYMMDD` style key).
pub const DEFAULT_DATE_FORMAT: &str = "YMD";

/// How often the writer rotates to a new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// A fixed date key is stamped into the filename at open; the file
    /// never rotates on time (size rotation still applies).
    #[default]
    None,
    /// Rotate at midnight, local or UTC per [`RotationConfig::utc`].
    Daily,
    /// Rotate whenever the rendered date-format template changes.
    #[serde(rename = "custom")]
    CustomInterval,
    /// Rotate every minute. Intended for exercising the rotation path in
    /// accelerated tests.
    #[serde(rename = "test")]
    TestMinute,
}

impl Frequency {
    /// Returns the configuration string for this frequency.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::CustomInterval => "custom",
            Self::TestMinute => "test",
        }
    }
}

impl FromStr for Frequency {
    type Err = RotologError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "custom" => Ok(Self::CustomInterval),
            "test" => Ok(Self::TestMinute),
            other => Err(RotologError::InvalidFrequency(other.to_string())),
        }
    }
}

/// Digest algorithm used for audit-entry content hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 (default).
    #[default]
    Sha256,
    /// BLAKE3.
    Blake3,
}

impl HashAlgorithm {
    /// Returns the configuration string for this algorithm.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = RotologError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            other => Err(RotologError::UnsupportedHash(other.to_string())),
        }
    }
}

/// Cap on retained rotated files.
///
/// At most one of the two dimensions may be set; configuring both fails
/// validation. Both unset means no pruning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRule {
    /// Keep at most this many ledger-tracked files.
    pub max_count: Option<usize>,
    /// Delete ledger-tracked files older than this many days.
    pub max_age_days: Option<i64>,
}

impl RetentionRule {
    /// A rule that never prunes.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_count: None,
            max_age_days: None,
        }
    }

    /// Keep only the `count` most recently created files.
    #[must_use]
    pub const fn keep_newest(count: usize) -> Self {
        Self {
            max_count: Some(count),
            max_age_days: None,
        }
    }

    /// Delete files older than `days` days.
    #[must_use]
    pub const fn max_age(days: i64) -> Self {
        Self {
            max_count: None,
            max_age_days: Some(days),
        }
    }

    /// Returns true if either dimension is set.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.max_count.is_some() || self.max_age_days.is_some()
    }
}

/// Open flags for log files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    /// Append to an existing file instead of truncating it.
    pub append: bool,
    /// Unix permission mode for newly created files.
    pub mode: Option<u32>,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            append: true,
            mode: None,
        }
    }
}

/// Configuration for the rotating writer.
///
/// Built with chained `with_*` setters; [`RotationConfig::validate`] is
/// called at writer construction and rejects misconfiguration up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Base path for log files. A literal `%DATE%` in the file name is
    /// replaced with the rotation key; otherwise the key is appended.
    pub filename: PathBuf,
    /// Time-based rotation cadence.
    pub frequency: Frequency,
    /// Date-format template using `Y`/`M`/`D`/`H`/`m`/`s` tokens. Drives
    /// the rotation key for [`Frequency::CustomInterval`].
    pub date_format: String,
    /// Byte threshold for size-based rotation. Unset disables it.
    pub max_size: Option<u64>,
    /// Extension appended after the rotation key and size suffix,
    /// e.g. `".log"`.
    pub extension: Option<String>,
    /// Render date keys in UTC instead of local time.
    pub utc: bool,
    /// Retention rule enforced on rotation.
    pub retention: RetentionRule,
    /// Path of the persisted audit ledger. Unset keeps the ledger in
    /// memory only, which also disables pruning across restarts.
    pub audit_file: Option<PathBuf>,
    /// Digest algorithm for audit entries.
    pub hash_algorithm: HashAlgorithm,
    /// Maintain a stable symlink pointing at the active file.
    pub create_symlink: bool,
    /// Name of the symlink, created next to the active file.
    pub symlink_name: String,
    /// Open flags for log files.
    pub file_options: FileOptions,
}

impl RotationConfig {
    /// Creates a configuration for the given base path with defaults:
    /// no time or size rotation, no retention, no symlink, append mode.
    #[must_use]
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            frequency: Frequency::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_size: None,
            extension: None,
            utc: false,
            retention: RetentionRule::none(),
            audit_file: None,
            hash_algorithm: HashAlgorithm::default(),
            create_symlink: false,
            symlink_name: DEFAULT_SYMLINK_NAME.to_string(),
            file_options: FileOptions::default(),
        }
    }

    /// Sets the rotation frequency.
    #[must_use]
    pub const fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the date-format template.
    #[must_use]
    pub fn with_date_format(mut self, template: impl Into<String>) -> Self {
        self.date_format = template.into();
        self
    }

    /// Sets the size threshold in bytes.
    #[must_use]
    pub const fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Sets the filename extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Renders date keys in UTC.
    #[must_use]
    pub const fn with_utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    /// Sets the retention rule.
    #[must_use]
    pub const fn with_retention(mut self, retention: RetentionRule) -> Self {
        self.retention = retention;
        self
    }

    /// Sets the audit ledger path.
    #[must_use]
    pub fn with_audit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_file = Some(path.into());
        self
    }

    /// Sets the audit hash algorithm.
    #[must_use]
    pub const fn with_hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }

    /// Enables the stable symlink.
    #[must_use]
    pub const fn with_symlink(mut self, create: bool) -> Self {
        self.create_symlink = create;
        self
    }

    /// Sets the symlink name.
    #[must_use]
    pub fn with_symlink_name(mut self, name: impl Into<String>) -> Self {
        self.symlink_name = name.into();
        self
    }

    /// Sets the file open options.
    #[must_use]
    pub const fn with_file_options(mut self, options: FileOptions) -> Self {
        self.file_options = options;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty filename, a zero size threshold, a
    /// retention rule with both dimensions set, a zero count cap or a
    /// negative age cap, an
    /// empty date format with [`Frequency::CustomInterval`], or an empty
    /// symlink name when the symlink is enabled.
    pub fn validate(&self) -> Result<()> {
        if self.filename.as_os_str().is_empty() {
            return Err(RotologError::InvalidConfig(
                "filename must not be empty".to_string(),
            ));
        }
        if self.max_size == Some(0) {
            return Err(RotologError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }
        if self.retention.max_count.is_some() && self.retention.max_age_days.is_some() {
            return Err(RotologError::ConflictingRetention);
        }
        // A zero cap would prune the active file out from under its own
        // handle, losing every subsequent write.
        if self.retention.max_count == Some(0) {
            return Err(RotologError::InvalidConfig(
                "max_count must be greater than zero".to_string(),
            ));
        }
        if let Some(days) = self.retention.max_age_days {
            if days < 0 {
                return Err(RotologError::InvalidConfig(
                    "max_age_days must not be negative".to_string(),
                ));
            }
        }
        if self.frequency == Frequency::CustomInterval && self.date_format.is_empty() {
            return Err(RotologError::InvalidConfig(
                "custom frequency requires a date format".to_string(),
            ));
        }
        if self.create_symlink && self.symlink_name.is_empty() {
            return Err(RotologError::InvalidConfig(
                "symlink name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
