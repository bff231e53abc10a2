//! Free-form timestamp normalization
//!
//! Evernote writes `created`/`updated` in ISO-8601 basic form
//! (`20231231T235959Z`), but hand-edited or third-party exports carry all
//! sorts of variants. Everything is reduced to milliseconds since the Unix
//! epoch.
//!
//! Timezone policy: text without an explicit offset is read as UTC. The
//! same input therefore yields the same output on every host. A trailing
//! `Z`, `UTC` or `GMT` marker is the same as no offset.
//!
//! Sub-millisecond digits are truncated toward zero, also before 1970.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,

    #[error("unrecognized date/time '{0}'")]
    Unrecognized(String),
}

/// Formats that carry their own UTC offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%a %b %e %H:%M:%S %z %Y",
];

/// Formats without an offset, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d %b %Y %H:%M:%S",
    "%a, %d %b %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
    "%a %b %e %H:%M:%S %Y",
    "%a %b %e %H:%M:%S UTC %Y",
    "%a %b %e %H:%M:%S GMT %Y",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%d %b %Y", "%B %d, %Y", "%b %d, %Y"];

/// Parse a free-form date/time into milliseconds since the Unix epoch.
///
/// Sub-millisecond precision is truncated, never rounded.
pub fn to_epoch_millis(text: &str) -> Result<i64, TimestampError> {
    let clean = text.trim();
    if clean.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(clean) {
        return Ok(truncated_millis(&dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(clean) {
        return Ok(truncated_millis(&dt));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(clean, format) {
            return Ok(truncated_millis(&dt));
        }
    }

    let naive = strip_utc_marker(clean);

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(truncated_millis(&dt.and_utc()));
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, format) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(truncated_millis(&dt.and_utc()));
            }
        }
    }

    Err(TimestampError::Unrecognized(clean.to_string()))
}

fn strip_utc_marker(text: &str) -> &str {
    for marker in ["Z", "z", "UTC", "GMT"] {
        if let Some(rest) = text.strip_suffix(marker) {
            return rest.trim_end();
        }
    }
    text
}

/// Milliseconds since the epoch, dropping sub-millisecond digits toward zero.
///
/// chrono's `timestamp_millis` floors, which differs for instants before 1970.
fn truncated_millis<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    let secs = dt.timestamp();
    let nanos = i64::from(dt.timestamp_subsec_nanos());
    if secs < 0 && nanos > 0 {
        (secs + 1) * 1000 - (1_000_000_000 - nanos) / 1_000_000
    } else {
        secs * 1000 + nanos / 1_000_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evernote_basic_format() {
        assert_eq!(to_epoch_millis("20230115T120000Z"), Ok(1673784000000));
        assert_eq!(to_epoch_millis("20231231T235959Z"), Ok(1704067199000));
    }

    #[test]
    fn test_iso_extended_formats() {
        assert_eq!(to_epoch_millis("2020-01-01T00:00:00Z"), Ok(1577836800000));
        assert_eq!(to_epoch_millis("2020-01-02T00:00:00Z"), Ok(1577923200000));
        assert_eq!(to_epoch_millis("2020-01-01T02:00:00+02:00"), Ok(1577836800000));
        assert_eq!(to_epoch_millis("2020-01-01 00:00:00"), Ok(1577836800000));
        assert_eq!(to_epoch_millis("2023-01-15 12:00:00 UTC"), Ok(1673784000000));
        assert_eq!(to_epoch_millis("2023-01-15 12:00:00 GMT"), Ok(1673784000000));
    }

    #[test]
    fn test_rfc2822_format() {
        assert_eq!(
            to_epoch_millis("Sun, 15 Jan 2023 12:00:00 +0000"),
            Ok(1673784000000)
        );
        assert_eq!(
            to_epoch_millis("Sun, 15 Jan 2023 07:00:00 -0500"),
            Ok(1673784000000)
        );
        // date(1) output
        assert_eq!(to_epoch_millis("Sun Jan 15 12:00:00 UTC 2023"), Ok(1673784000000));
        assert_eq!(to_epoch_millis("January 15, 2023 12:00"), Ok(1673784000000));
        assert_eq!(to_epoch_millis("January 15, 2023 12:00:00"), Ok(1673784000000));
    }

    #[test]
    fn test_naive_input_is_utc() {
        assert_eq!(to_epoch_millis("20230115T120000"), Ok(1673784000000));
        assert_eq!(to_epoch_millis("2023-01-15T12:00:00"), Ok(1673784000000));
    }

    #[test]
    fn test_date_only() {
        assert_eq!(to_epoch_millis("2020-01-01"), Ok(1577836800000));
        assert_eq!(to_epoch_millis("20200101"), Ok(1577836800000));
    }

    #[test]
    fn test_sub_millisecond_precision_truncates() {
        assert_eq!(
            to_epoch_millis("2020-01-01T00:00:00.123999Z"),
            Ok(1577836800123)
        );
        assert_eq!(
            to_epoch_millis("2020-01-01T00:00:00.9999Z"),
            Ok(1577836800999)
        );
    }

    #[test]
    fn test_pre_epoch_truncates_toward_zero() {
        assert_eq!(to_epoch_millis("1969-12-31T23:59:59.9995Z"), Ok(0));
        assert_eq!(to_epoch_millis("1969-12-31T23:59:58.5Z"), Ok(-1500));
        assert_eq!(to_epoch_millis("1969-12-31T23:59:59Z"), Ok(-1000));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(to_epoch_millis("  20230115T120000Z\n"), Ok(1673784000000));
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(to_epoch_millis(""), Err(TimestampError::Empty));
        assert_eq!(to_epoch_millis("   "), Err(TimestampError::Empty));
    }

    #[test]
    fn test_garbage_input_fails() {
        assert!(matches!(
            to_epoch_millis("not a date"),
            Err(TimestampError::Unrecognized(_))
        ));
        // February 30th is structurally invalid
        assert!(matches!(
            to_epoch_millis("2023-02-30T00:00:00Z"),
            Err(TimestampError::Unrecognized(_))
        ));
    }
}
