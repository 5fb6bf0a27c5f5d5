//! Generic payload extractors.
//!
//! The backend exposes the same logical field under several key names
//! depending on the endpoint, and wraps collections in inconsistent
//! envelopes. Rather than scattering per-field candidate lists across call
//! sites, every alias list lives here as a declarative table and is
//! consumed by the generic pickers below. List order is the precedence
//! rule: the first key that resolves wins.

use serde_json::Value;
use uuid::Uuid;

pub const ID_KEYS: &[&str] = &["id", "event_id", "instance_id", "eventId", "uuid"];
pub const MASTER_ID_KEYS: &[&str] = &["event_id", "master_event_id", "eventId"];
pub const TITLE_KEYS: &[&str] = &["title", "name", "event_title"];
pub const DESCRIPTION_KEYS: &[&str] = &["description", "event_description"];
pub const BAR_ID_KEYS: &[&str] = &["bar_id", "barId", "venue_id"];
pub const TAG_ID_KEYS: &[&str] = &["event_tag_id", "eventTagId", "tag_id"];
pub const DATE_KEYS: &[&str] = &["date", "start_date", "recurrence_start_date"];
pub const START_TIME_KEYS: &[&str] = &["start_time", "startTime"];
pub const END_TIME_KEYS: &[&str] = &["end_time", "endTime"];
pub const START_DATETIME_KEYS: &[&str] =
    &["start_datetime", "startDateTime", "start_at", "starts_at", "start"];
pub const END_DATETIME_KEYS: &[&str] =
    &["end_datetime", "endDateTime", "end_at", "ends_at", "end"];
pub const IMAGE_URL_KEYS: &[&str] = &["image_url", "imageUrl"];
pub const EXTERNAL_LINK_KEYS: &[&str] = &["external_link", "externalLink", "url"];
pub const TAG_ROW_ID_KEYS: &[&str] = &["id", "tag_id", "event_tag_id"];
pub const TAG_NAME_KEYS: &[&str] = &["name", "title", "label"];
pub const EVENT_START_DATE_KEYS: &[&str] = &["recurrence_start_date", "start_date", "date"];
pub const RECURRENCE_PATTERN_KEYS: &[&str] = &["recurrence_pattern", "recurrencePattern"];
pub const RECURRENCE_DAYS_KEYS: &[&str] = &["recurrence_days", "recurrenceDays"];
pub const RECURRENCE_END_DATE_KEYS: &[&str] = &["recurrence_end_date", "recurrenceEndDate"];
pub const RECURRENCE_END_OCCURRENCES_KEYS: &[&str] =
    &["recurrence_end_occurrences", "recurrenceEndOccurrences"];
pub const RECURRENCE_END_MODE_KEYS: &[&str] = &["recurrence_end_mode", "recurrenceEndMode"];

/// Envelope keys the backend wraps collections in, probed in order.
const CONTAINER_KEYS: &[&str] = &["data", "results", "items", "events", "instances", "tags"];

/// Envelope probing depth: handles `{data: {results: [...]}}` but stops
/// short of scanning arbitrary nesting.
const MAX_UNWRAP_DEPTH: usize = 2;

/// First alias holding a non-empty string, trimmed.
pub fn pick_string(source: &Value, keys: &[&str]) -> Option<String> {
    let object = source.as_object()?;
    for key in keys {
        if let Some(Value::String(text)) = object.get(*key) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// First alias whose value survives the given coercer. This is the generic
/// form the date/time pickers build on, since those fields need coercion
/// beyond "is a non-empty string".
pub fn pick_with<T>(
    source: &Value,
    keys: &[&str],
    coerce: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let object = source.as_object()?;
    keys.iter().find_map(|key| object.get(*key).and_then(&coerce))
}

/// Like [`pick_string`], but identifiers may also arrive as numbers, which
/// are stringified.
pub fn pick_id(source: &Value, keys: &[&str]) -> Option<String> {
    let object = source.as_object()?;
    for key in keys {
        match object.get(*key) {
            Some(Value::String(text)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(number)) => {
                if number.as_f64().is_some_and(f64::is_finite) {
                    return Some(number.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Resolves an event identifier, synthesizing a fresh UUID when the payload
/// carries none. Every normalized record gets a usable id, even from
/// malformed upstream rows.
pub fn extract_event_id(source: &Value) -> String {
    if let Some(id) = pick_id(source, ID_KEYS) {
        return id;
    }
    let fallback = Uuid::new_v4().to_string();
    tracing::warn!(fallback_id = %fallback, "event payload carried no id, synthesizing one");
    fallback
}

/// Unwraps whatever collection envelope the backend chose this time: a bare
/// array passes through, otherwise container aliases are probed recursively
/// up to two levels for the first non-empty array. Nothing found means `[]`.
pub fn unwrap_collection(payload: &Value) -> Vec<Value> {
    if let Value::Array(entries) = payload {
        return entries.clone();
    }
    probe_containers(payload, MAX_UNWRAP_DEPTH).unwrap_or_default()
}

fn probe_containers(payload: &Value, depth: usize) -> Option<Vec<Value>> {
    if depth == 0 {
        return None;
    }
    let object = payload.as_object()?;
    for key in CONTAINER_KEYS {
        match object.get(*key) {
            Some(Value::Array(entries)) if !entries.is_empty() => {
                return Some(entries.clone());
            }
            Some(inner @ Value::Object(_)) => {
                if let Some(found) = probe_containers(inner, depth - 1) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}

/// Single-entity endpoints sometimes wrap the record in `{data: {...}}` and
/// sometimes return it bare.
pub fn unwrap_single_event_payload(payload: &Value) -> &Value {
    match payload.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    }
}
