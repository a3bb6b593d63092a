//! Error types for the rotating writer.

use thiserror::Error;

/// Errors that can occur while configuring or running the writer.
#[derive(Debug, Error)]
pub enum RotologError {
    /// The configured rotation frequency string is not recognized.
    #[error("invalid rotation frequency: {0}")]
    InvalidFrequency(String),

    /// The configured audit hash algorithm is not supported.
    #[error("unsupported audit hash algorithm: {0}")]
    UnsupportedHash(String),

    /// A retention rule sets both a count cap and an age cap.
    #[error("retention rule sets both max_count and max_age_days")]
    ConflictingRetention,

    /// The configuration is invalid for some other reason.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for writer operations.
pub type Result<T> = std::result::Result<T, RotologError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = RotologError::InvalidFrequency("hourly".to_string());
        assert_eq!(err.to_string(), "invalid rotation frequency: hourly");

        let err = RotologError::UnsupportedHash("md4".to_string());
        assert_eq!(err.to_string(), "unsupported audit hash algorithm: md4");

        let err = RotologError::ConflictingRetention;
        assert_eq!(
            err.to_string(),
            "retention rule sets both max_count and max_age_days"
        );

        let err = RotologError::InvalidConfig("empty filename".to_string());
        assert_eq!(err.to_string(), "invalid configuration: empty filename");
    }

    #[test]
    fn error_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RotologError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RotologError>();
    }
}
