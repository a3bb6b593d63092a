//! Record formatting.
//!
//! Renders a [`LogRecord`] into the four-line byte layout appended to log
//! files: a header line, the message, the serialized attributes (or an
//! empty line), and a trailing blank line.

use chrono::Local;

use crate::record::LogRecord;

/// Line terminator used between the four lines of a formatted record.
pub const LINE_SEP: &str = "\r\n";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats one record into its on-disk representation.
///
/// Pure and deterministic for identical inputs and timezone setting. The
/// attributes line is the serialized JSON value; a serialization failure
/// is replaced with the stringified error and never propagated.
#[must_use]
pub fn format_record(record: &LogRecord, utc: bool) -> String {
    let timestamp = if utc {
        record.timestamp.format(TIMESTAMP_FORMAT).to_string()
    } else {
        record
            .timestamp
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    };

    let header = format!(
        "[{timestamp}] [{}] [{}]",
        record.level.label(),
        record.logname
    );

    let attrs = match &record.attrs {
        Some(value) => serde_json::to_string(value).unwrap_or_else(|err| err.to_string()),
        None => String::new(),
    };

    [header.as_str(), record.message.as_str(), attrs.as_str(), ""].join(LINE_SEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogLevel;
    use chrono::{TimeZone, Utc};

    fn make_record() -> LogRecord {
        LogRecord::new(LogLevel::Info, "app", "hello world").with_timestamp(
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 45)
                .single()
                .expect("valid timestamp"),
        )
    }

    #[test]
    fn four_lines_joined_by_crlf() {
        let rendered = format_record(&make_record(), true);
        let lines: Vec<&str> = rendered.split(LINE_SEP).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "[2024-03-15 12:30:45] [INFO] [app]");
        assert_eq!(lines[1], "hello world");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "");
        assert!(rendered.ends_with(LINE_SEP));
    }

    #[test]
    fn attrs_serialized_exactly() {
        let record = make_record().with_attrs(serde_json::json!({"a": 1}));
        let rendered = format_record(&record, true);
        let lines: Vec<&str> = rendered.split(LINE_SEP).collect();
        assert_eq!(lines[2], "{\"a\":1}");
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let record = make_record().with_attrs(serde_json::json!({"k": "v"}));
        assert_eq!(format_record(&record, true), format_record(&record, true));
    }

    #[test]
    fn level_label_in_header() {
        let record = LogRecord::new(LogLevel::Error, "core", "boom").with_timestamp(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        );
        let rendered = format_record(&record, true);
        assert!(rendered.starts_with("[2024-01-01 00:00:00] [ERROR] [core]"));
    }
}
