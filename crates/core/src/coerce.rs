//! Primitive coercers for loosely-typed upstream values.
//!
//! Every function here is total: `null`, absent, and malformed inputs map
//! to a defined empty value (`false`, `None`, `""`, or the `"—"`
//! placeholder) instead of an error. Mappers compose these to degrade
//! gracefully on partial payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Placeholder rendered wherever a display value is missing.
pub const DISPLAY_PLACEHOLDER: &str = "—";

const TRUTHY_TOKENS: &[&str] = &["true", "1", "yes", "on"];

/// Interprets the boolean-ish representations the backend has been seen to
/// emit. Anything not in the truthy set is `false`, including null/absent.
pub fn coerce_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => {
            number.as_i64() == Some(1) || number.as_f64() == Some(1.0)
        }
        Value::String(text) => {
            let token = text.trim().to_ascii_lowercase();
            TRUTHY_TOKENS.contains(&token.as_str())
        }
        _ => false,
    }
}

/// Trims and converts empty strings to `None`, the wire representation of
/// "absent" for optional URL fields.
pub fn empty_to_null(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes a time to the canonical zero-padded `HH:MM:SS` wire format.
/// `HH:MM` gains a `:00` seconds part; anything unparseable is `None`.
/// Idempotent on its own output.
pub fn ensure_time_with_seconds(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()?;
    Some(time.format("%H:%M:%S").to_string())
}

/// Extracts the leading `HH:MM` of any string that starts with a valid
/// time, which is what `<input type="time">` controls expect. One-digit
/// hours are accepted and re-padded. Everything else maps to the empty
/// string.
pub fn format_time_input_value(value: &str) -> String {
    leading_time(value.trim())
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Renders a canonical time as 12-hour `h:mm AM/PM` for display. Hour 0 is
/// shown as 12 AM, hour 12 as 12 PM. Unparseable input gets the
/// placeholder.
pub fn format_time_with_meridiem(value: &str) -> String {
    match ensure_time_with_seconds(value) {
        Some(canonical) => {
            // ensure_time_with_seconds only emits parseable times
            match NaiveTime::parse_from_str(&canonical, "%H:%M:%S") {
                Ok(time) => time.format("%-I:%M %p").to_string(),
                Err(_) => DISPLAY_PLACEHOLDER.to_string(),
            }
        }
        None => DISPLAY_PLACEHOLDER.to_string(),
    }
}

/// Trimmed value, or the placeholder when absent/empty.
pub fn format_display_value(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DISPLAY_PLACEHOLDER.to_string(),
    }
}

/// Display-only `MM-DD-YYYY` rendering of a canonical date. Never crosses
/// the wire.
pub fn format_display_date(value: &str) -> String {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%m-%d-%Y").to_string(),
        Err(_) => DISPLAY_PLACEHOLDER.to_string(),
    }
}

/// Canonical `YYYY-MM-DD` from a date-ish value: a string already carrying
/// the canonical prefix is truncated to it, otherwise a full datetime parse
/// supplies the date part.
pub fn coerce_date_string(value: &Value) -> Option<String> {
    let Value::String(text) = value else {
        return None;
    };
    let trimmed = text.trim();
    if let Some(prefix) = trimmed.get(0..10) {
        if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() {
            return Some(prefix.to_string());
        }
    }
    parse_full_datetime(trimmed).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// `HH:MM` from a time-ish value: leading time extraction first, full
/// datetime parse second. Seconds are intentionally dropped; callers that
/// need the wire format run the result through [`ensure_time_with_seconds`].
pub fn coerce_time_string(value: &Value) -> Option<String> {
    let Value::String(text) = value else {
        return None;
    };
    let trimmed = text.trim();
    if let Some(time) = leading_time(trimmed) {
        return Some(time.format("%H:%M").to_string());
    }
    parse_full_datetime(trimmed).map(|dt| dt.format("%H:%M").to_string())
}

/// Leading `HH:MM` or `H:MM` prefix of a time-shaped string.
fn leading_time(text: &str) -> Option<NaiveTime> {
    for len in [5, 4] {
        if let Some(prefix) = text.get(0..len) {
            if let Ok(time) = NaiveTime::parse_from_str(prefix, "%H:%M") {
                return Some(time);
            }
        }
    }
    None
}

/// Numeric entries of a JSON array, dropping anything that does not coerce
/// to a finite number. Non-arrays map to the empty vec.
pub fn coerce_number_array(value: &Value) -> Vec<i64> {
    let Value::Array(entries) = value else {
        return Vec::new();
    };
    entries.iter().filter_map(coerce_number).collect()
}

pub(crate) fn coerce_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_to_i64)),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_to_i64))
        }
        _ => None,
    }
}

// fractional values are dropped, not truncated: 2.5 is not a weekday
fn integral_to_i64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn parse_full_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_utc());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
