//! Record value → `YYYY-MM-DD` conversion for date inputs.
//!
//! Date-only strings are passed through untouched; instants (RFC 3339
//! strings, epoch milliseconds) are converted to the calendar date in the
//! viewer's time zone, matching what a native date control would show.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Format accepted and produced by `<input type="date">`.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// True when `s` is exactly `YYYY-MM-DD` (shape only, like the native control).
#[must_use]
pub fn is_input_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b
            .iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

/// Format a record value for display in a date input, in local time.
///
/// Returns an empty string for empty or unrecognised values.
#[must_use]
pub fn format_input_date(value: &Value) -> String {
    format_input_date_in(value, &Local)
}

/// Same as [`format_input_date`] with an explicit time zone.
///
/// ```
/// use adminform_core::date::format_input_date_in;
/// use chrono::Utc;
/// use serde_json::json;
///
/// assert_eq!(format_input_date_in(&json!("2010-01-04"), &Utc), "2010-01-04");
/// assert_eq!(format_input_date_in(&json!("2010-01-04T23:30:00Z"), &Utc), "2010-01-04");
/// assert_eq!(format_input_date_in(&json!(null), &Utc), "");
/// ```
#[must_use]
pub fn format_input_date_in<Tz: TimeZone>(value: &Value, tz: &Tz) -> String {
    let formatted = match value {
        Value::Null => return String::new(),
        Value::String(s) if s.is_empty() => return String::new(),
        Value::String(s) if is_input_date(s) => return s.clone(),
        Value::String(s) => from_string(s, tz),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.with_timezone(tz).date_naive()),
        _ => None,
    };

    match formatted {
        Some(date) => date.format(INPUT_DATE_FORMAT).to_string(),
        None => {
            log::warn!("cannot display {value} in a date input");
            String::new()
        }
    }
}

fn from_string<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz).date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.date())
}
