//! Non-failing field coercion
//!
//! Every function here returns `Option`: malformed text is an ordinary
//! outcome of reading user uploads, never an error. Formats are fixed in
//! code so results do not depend on the host locale.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts accepted for `MeterReadingDateTime`, tried in order
///
/// Slash-separated dates are day-first. Month-first layouts are not accepted.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only layouts, interpreted as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse a 32-bit integer independently of the host locale
///
/// Surrounding whitespace and a single leading sign are accepted; thousands
/// separators, decimals and anything else are not.
pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Parse a reading timestamp
///
/// RFC 3339 values carrying an offset are normalized to UTC; every other
/// layout is taken as-is.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
