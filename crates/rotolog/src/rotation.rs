//! Rotation policy engine.
//!
//! Decides when the active stream must roll over and which file a write
//! lands in. All policy functions take the clock as a parameter so the
//! rotation path can be exercised without waiting on wall time.

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};

use crate::config::{Frequency, RotationConfig};

/// Placeholder in the configured filename that is replaced with the
/// rotation key.
pub const DATE_PLACEHOLDER: &str = "%DATE%";

/// Translates a `Y`/`M`/`D`/`H`/`m`/`s` token template into a strftime
/// format string. Runs of the same token collapse into one directive, so
/// `"YYYYMMDD"` and `"YMD"` both render as `%Y%m%d`. Any other character
/// passes through unchanged.
#[must_use]
pub fn translate_date_format(template: &str) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        let directive = match c {
            'Y' => Some("%Y"),
            'M' => Some("%m"),
            'D' => Some("%d"),
            'H' => Some("%H"),
            'm' => Some("%M"),
            's' => Some("%S"),
            _ => None,
        };
        match directive {
            Some(d) => {
                while chars.peek() == Some(&c) {
                    chars.next();
                }
                out.push_str(d);
            }
            None => out.push(c),
        }
    }
    out
}

fn stamp(config: &RotationConfig, format: &str, now: DateTime<Utc>) -> String {
    if config.utc {
        now.format(format).to_string()
    } else {
        now.with_timezone(&Local).format(format).to_string()
    }
}

/// Computes the rotation key for `now` under the configured frequency.
#[must_use]
pub fn rotation_key(config: &RotationConfig, now: DateTime<Utc>) -> String {
    match config.frequency {
        Frequency::None | Frequency::Daily => stamp(config, "%Y%m%d", now),
        Frequency::CustomInterval => {
            stamp(config, &translate_date_format(&config.date_format), now)
        }
        Frequency::TestMinute => stamp(config, "%Y%m%d%H%M", now),
    }
}

/// Returns true if the time-based policy requires leaving the stream
/// holding `current_key`. [`Frequency::None`] never rotates on time.
#[must_use]
pub fn time_rotation_due(config: &RotationConfig, current_key: &str, now: DateTime<Utc>) -> bool {
    match config.frequency {
        Frequency::None => false,
        _ => rotation_key(config, now) != current_key,
    }
}

/// Returns true if appending `pending` bytes to a stream holding
/// `current` bytes would exceed the size threshold.
///
/// The comparison is strict: a write landing exactly at the threshold
/// fills the file, and the write after that rotates.
#[must_use]
pub fn size_rotation_due(max_size: Option<u64>, current: u64, pending: u64) -> bool {
    max_size.is_some_and(|max| current + pending > max)
}

/// Builds the log file path for a rotation key and size-suffix index.
///
/// A literal `%DATE%` in the configured filename is replaced with the
/// key; otherwise the key is appended after a dot. An index greater than
/// zero adds a numeric suffix, and the configured extension goes last:
/// `{base}.{key}[.{n}]{ext}`.
#[must_use]
pub fn log_path(config: &RotationConfig, key: &str, index: u32) -> PathBuf {
    let base = config.filename.to_string_lossy();
    let mut path = if base.contains(DATE_PLACEHOLDER) {
        base.replace(DATE_PLACEHOLDER, key)
    } else {
        format!("{base}.{key}")
    };
    if index > 0 {
        path.push('.');
        path.push_str(&index.to_string());
    }
    if let Some(extension) = &config.extension {
        path.push_str(extension);
    }
    PathBuf::from(path)
}

/// Finds the first unused numeric suffix for `key`, starting at 1.
///
/// Used when a size rotation happens within a time bucket: the date key
/// stays the same and the filename gains the next free `.{n}` suffix.
#[must_use]
pub fn next_free_path(config: &RotationConfig, key: &str) -> (PathBuf, u32) {
    let mut index = 1;
    loop {
        let candidate = log_path(config, key, index);
        if !candidate.exists() {
            return (candidate, index);
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use test_case::test_case;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("valid timestamp")
    }

    fn utc_config(frequency: Frequency) -> RotationConfig {
        RotationConfig::new("logs/app")
            .with_frequency(frequency)
            .with_utc(true)
    }

    #[test_case("YMD", "%Y%m%d")]
    #[test_case("YYYYMMDD", "%Y%m%d")]
    #[test_case("YMDHm", "%Y%m%d%H%M")]
    #[test_case("Y-M-D", "%Y-%m-%d")]
    #[test_case("YMDHms", "%Y%m%d%H%M%S")]
    fn date_format_translation(template: &str, expected: &str) {
        assert_eq!(translate_date_format(template), expected);
    }

    #[test]
    fn rotation_key_per_frequency() {
        let now = at(2024, 3, 15, 10, 42, 7);
        assert_eq!(rotation_key(&utc_config(Frequency::None), now), "20240315");
        assert_eq!(rotation_key(&utc_config(Frequency::Daily), now), "20240315");
        assert_eq!(
            rotation_key(&utc_config(Frequency::TestMinute), now),
            "202403151042"
        );
        let custom = utc_config(Frequency::CustomInterval).with_date_format("YMDH");
        assert_eq!(rotation_key(&custom, now), "2024031510");
    }

    #[test]
    fn frequency_none_never_rotates_on_time() {
        let config = utc_config(Frequency::None);
        let opened = at(2024, 3, 15, 23, 59, 0);
        let key = rotation_key(&config, opened);
        assert!(!time_rotation_due(&config, &key, opened + Duration::days(30)));
    }

    #[test]
    fn daily_rotates_at_midnight() {
        let config = utc_config(Frequency::Daily);
        let before = at(2024, 3, 15, 23, 59, 59);
        let key = rotation_key(&config, before);
        assert!(!time_rotation_due(&config, &key, before));
        assert!(time_rotation_due(&config, &key, at(2024, 3, 16, 0, 0, 0)));
    }

    #[test]
    fn test_minute_rotates_every_70_seconds() {
        let config = utc_config(Frequency::TestMinute);
        let mut now = at(2024, 3, 15, 10, 0, 30);
        let mut key = rotation_key(&config, now);
        for _ in 0..3 {
            now += Duration::seconds(70);
            assert!(time_rotation_due(&config, &key, now));
            key = rotation_key(&config, now);
        }
    }

    #[test]
    fn custom_interval_follows_template_granularity() {
        let config = utc_config(Frequency::CustomInterval).with_date_format("YMDH");
        let now = at(2024, 3, 15, 10, 10, 0);
        let key = rotation_key(&config, now);
        assert!(!time_rotation_due(&config, &key, now + Duration::minutes(40)));
        assert!(time_rotation_due(&config, &key, now + Duration::hours(1)));
    }

    #[test]
    fn size_trigger_is_strict() {
        assert!(!size_rotation_due(None, 1000, 1000));
        assert!(!size_rotation_due(Some(100), 50, 50));
        assert!(size_rotation_due(Some(100), 50, 51));
        assert!(size_rotation_due(Some(100), 100, 1));
    }

    #[test]
    fn log_path_appends_key_and_extension() {
        let config = RotationConfig::new("logs/app").with_extension(".log");
        assert_eq!(
            log_path(&config, "20240315", 0),
            PathBuf::from("logs/app.20240315.log")
        );
        assert_eq!(
            log_path(&config, "20240315", 2),
            PathBuf::from("logs/app.20240315.2.log")
        );
    }

    #[test]
    fn log_path_substitutes_placeholder() {
        let config = RotationConfig::new("logs/app-%DATE%").with_extension(".log");
        assert_eq!(
            log_path(&config, "20240315", 0),
            PathBuf::from("logs/app-20240315.log")
        );
    }

    #[test]
    fn next_free_path_skips_existing_suffixes() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let config = RotationConfig::new(dir.path().join("app")).with_extension(".log");

        let (first, index) = next_free_path(&config, "20240315");
        assert_eq!(index, 1);

        std::fs::write(&first, b"taken").expect("write file");
        let (second, index) = next_free_path(&config, "20240315");
        assert_eq!(index, 2);
        assert_ne!(first, second);
    }
}
