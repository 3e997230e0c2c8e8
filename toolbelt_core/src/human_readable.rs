//! Human readable formatting for byte counts and elapsed time

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

const BYTE_UNITS: &[&str] = &["bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count using 1024-based units
///
/// The value is rounded to one decimal and a trailing `.0` is dropped.
/// Negative counts keep their sign.
///
/// ```
/// use toolbelt_core::human_readable::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 bytes");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(-1024), "-1 KB");
/// ```
pub fn format_bytes(bytes: i64) -> String {
    let mut size = bytes.unsigned_abs() as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < BYTE_UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let rounded = (size * 10.0).round() / 10.0;
    let sign = if bytes < 0 { "-" } else { "" };

    if rounded.fract() == 0.0 {
        format!("{sign}{rounded:.0} {}", BYTE_UNITS[unit_index])
    } else {
        format!("{sign}{rounded:.1} {}", BYTE_UNITS[unit_index])
    }
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Describe how long ago something happened, e.g. `3 hours ago`
///
/// Seconds, minutes and hours report the matching component of the span
/// (so 90 minutes reads `1 hours ago`); days report the whole number of days.
/// Negative spans are treated as zero.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);

    let seconds = total % MINUTE;
    let minutes = (total / MINUTE) % 60;
    let hours = (total / HOUR) % 24;
    let days = total / DAY;

    match total {
        t if t < MINUTE => {
            if seconds == 1 {
                "one second ago".to_string()
            } else {
                format!("{seconds} seconds ago")
            }
        }
        t if t < 2 * MINUTE => "a minute ago".to_string(),
        t if t < 45 * MINUTE => format!("{minutes} minutes ago"),
        t if t < 90 * MINUTE => "an hour ago".to_string(),
        t if t < DAY => format!("{hours} hours ago"),
        t if t < 2 * DAY => "yesterday".to_string(),
        t if t < 30 * DAY => format!("{days} days ago"),
        t if t < 12 * 30 * DAY => {
            let months = days / 30;
            if months <= 1 {
                "one month ago".to_string()
            } else {
                format!("{months} months ago")
            }
        }
        _ => {
            let years = days / 365;
            if years <= 1 {
                "one year ago".to_string()
            } else {
                format!("{years} years ago")
            }
        }
    }
}

/// Describe the time between `then` and `now`
pub fn format_since<A: TimeZone, B: TimeZone>(then: DateTime<A>, now: DateTime<B>) -> String {
    format_elapsed(now.signed_duration_since(then))
}

/// Describe the time between `then` and the current instant
pub fn format_since_now<Tz: TimeZone>(then: DateTime<Tz>) -> String {
    format_since(then, Utc::now())
}
