//! Heterogeneous date parsing into epoch-millisecond instants.
//!
//! Cells arrive as JSON values: numbers are epoch stamps whose unit is
//! disambiguated by magnitude; strings try a generic RFC 3339 parse first,
//! then an ordered explicit format list (day-first variants before ISO).
//! Naive date-times are anchored as UTC so all downstream arithmetic is
//! zone-free and deterministic.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Epoch values below this are seconds, at or above it milliseconds.
pub const EPOCH_SECONDS_THRESHOLD: i64 = 10_000_000_000;

const DATE_TIME_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Parse a raw cell into an instant. `None` drops the row upstream.
pub fn parse_instant(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(epoch_to_ms(i))
            } else {
                n.as_f64().map(|f| epoch_to_ms(f as i64))
            }
        }
        Value::String(s) => parse_instant_str(s),
        _ => None,
    }
}

/// Parse a date string, trying the generic form first and then the
/// explicit format list in order. First valid result wins.
pub fn parse_instant_str(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    // Bare epoch stamps exported as text.
    if let Ok(n) = s.parse::<i64>() {
        return Some(epoch_to_ms(n));
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }
    None
}

/// Disambiguate an epoch stamp by magnitude.
pub fn epoch_to_ms(value: i64) -> i64 {
    if value.abs() < EPOCH_SECONDS_THRESHOLD {
        value * 1_000
    } else {
        value
    }
}

/// Format an instant as `DD.MM.YYYY HH:MM` for tabular export.
pub fn format_instant(ms: i64) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.naive_utc().format("%d.%m.%Y %H:%M").to_string(),
        None => String::new(),
    }
}
