//! Shape mappers between the backend's wire payloads, the calendar display
//! projection, and the editable form states.
//!
//! Every mapper is total. Optional fields that fail to resolve fall back to
//! the form defaults; the only thing that drops a record entirely is a
//! calendar row with no resolvable date.

use serde_json::Value;

use crate::calendar::CalendarEvent;
use crate::coerce::{
    coerce_boolean, coerce_date_string, coerce_number, coerce_number_array, coerce_time_string,
    empty_to_null, ensure_time_with_seconds, format_time_input_value,
};
use crate::extract::{
    self, extract_event_id, pick_id, pick_string, pick_with, unwrap_collection,
    unwrap_single_event_payload,
};
use crate::models::event::{
    CreateMasterEventRequest, EventFormState, MasterEventEditFormState, Recurrence,
    RecurrenceEndMode, RecurrencePattern, UpdateMasterEventRequest,
};
use crate::models::instance::{InstanceEditFormState, UpdateInstanceRequest};
use crate::models::tag::EventTag;

const UNTITLED_EVENT: &str = "Untitled Event";

/// An instance form together with the owning master event's id, recovered
/// from the payload's alias keys. `None` means the instance is orphaned and
/// the caller decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedInstance {
    pub form: InstanceEditFormState,
    pub master_event_id: Option<String>,
}

/// Normalizes one raw calendar row. A row whose date cannot be resolved
/// from either the date aliases or the start-datetime aliases is dropped;
/// everything else degrades to defaults.
pub fn normalize_remote_event(raw: &Value) -> Option<CalendarEvent> {
    let date = pick_with(raw, extract::DATE_KEYS, coerce_date_string)
        .or_else(|| pick_with(raw, extract::START_DATETIME_KEYS, coerce_date_string));
    let Some(date) = date else {
        tracing::debug!("dropping calendar row with no resolvable date");
        return None;
    };

    let start_time = pick_with(raw, extract::START_TIME_KEYS, coerce_time_string)
        .or_else(|| pick_with(raw, extract::START_DATETIME_KEYS, coerce_time_string));
    let end_time = pick_with(raw, extract::END_TIME_KEYS, coerce_time_string)
        .or_else(|| pick_with(raw, extract::END_DATETIME_KEYS, coerce_time_string));

    Some(CalendarEvent {
        id: extract_event_id(raw),
        title: pick_string(raw, extract::TITLE_KEYS)
            .unwrap_or_else(|| UNTITLED_EVENT.to_string()),
        date,
        start_time,
        end_time,
    })
}

/// Normalizes a whole calendar response, whatever envelope it arrived in.
/// Dateless rows are dropped, not batch-fatal.
pub fn extract_event_collection(payload: &Value) -> Vec<CalendarEvent> {
    unwrap_collection(payload)
        .iter()
        .filter_map(normalize_remote_event)
        .collect()
}

/// Builds an editable form from an API event payload, starting from the
/// form defaults and overwriting only the fields that resolve. Recurrence
/// patterns outside the closed enum are ignored, keeping `none`.
pub fn map_api_event_to_form_state(
    payload: &Value,
    fallback_bar_id: Option<&str>,
) -> EventFormState {
    let source = unwrap_single_event_payload(payload);
    let mut form = EventFormState::initial();

    if let Some(bar_id) = pick_id(source, extract::BAR_ID_KEYS) {
        form.bar_id = bar_id;
    } else if let Some(fallback) = fallback_bar_id {
        form.bar_id = fallback.to_string();
    }
    if let Some(title) = pick_string(source, extract::TITLE_KEYS) {
        form.title = title;
    }
    if let Some(description) = pick_string(source, extract::DESCRIPTION_KEYS) {
        form.description = description;
    }
    if let Some(start_date) = pick_with(source, extract::EVENT_START_DATE_KEYS, coerce_date_string)
    {
        form.start_date = start_date;
    }
    form.start_time = resolve_canonical_time(
        source,
        extract::START_TIME_KEYS,
        extract::START_DATETIME_KEYS,
    );
    form.end_time =
        resolve_canonical_time(source, extract::END_TIME_KEYS, extract::END_DATETIME_KEYS);
    form.image_url = pick_string(source, extract::IMAGE_URL_KEYS);
    form.external_link = pick_string(source, extract::EXTERNAL_LINK_KEYS);
    if let Some(tag_id) = pick_id(source, extract::TAG_ID_KEYS) {
        form.event_tag_id = tag_id;
    }

    let pattern = pick_string(source, extract::RECURRENCE_PATTERN_KEYS)
        .and_then(|raw| RecurrencePattern::parse(&raw))
        .unwrap_or(RecurrencePattern::None);
    let days = pick_with(source, extract::RECURRENCE_DAYS_KEYS, |value| {
        Some(coerce_number_array(value))
    })
    .unwrap_or_default()
    .into_iter()
    .filter_map(|day| u8::try_from(day).ok())
    .collect();
    let end_mode = pick_string(source, extract::RECURRENCE_END_MODE_KEYS)
        .and_then(|raw| RecurrenceEndMode::parse(&raw));
    let end_date = pick_with(source, extract::RECURRENCE_END_DATE_KEYS, coerce_date_string);
    let end_occurrences = pick_with(source, extract::RECURRENCE_END_OCCURRENCES_KEYS, |value| {
        coerce_number(value).and_then(|n| u32::try_from(n).ok())
    })
    .filter(|n| *n > 0);

    form.recurrence = Recurrence::from_parts(pattern, days, end_mode, end_date, end_occurrences);
    form
}

/// Builds the per-occurrence override form from an instance payload and
/// recovers the owning master event's id.
pub fn map_instance_payload_to_form_state(payload: &Value) -> MappedInstance {
    let source = unwrap_single_event_payload(payload);
    let mut form = InstanceEditFormState::empty();

    if let Some(date) = pick_with(source, extract::DATE_KEYS, coerce_date_string) {
        form.date = date;
    }
    // HH:MM:SS from the wire, HH:MM into the time-input controls
    form.custom_start_time = pick_string(source, &["custom_start_time"])
        .map(|raw| format_time_input_value(&raw))
        .unwrap_or_default();
    form.custom_end_time = pick_string(source, &["custom_end_time"])
        .map(|raw| format_time_input_value(&raw))
        .unwrap_or_default();
    form.custom_title = pick_string(source, &["custom_title"]).unwrap_or_default();
    form.custom_description = pick_string(source, &["custom_description"]).unwrap_or_default();
    form.custom_external_link =
        pick_string(source, &["custom_external_link"]).unwrap_or_default();
    form.custom_image_url = pick_string(source, &["custom_image_url"]).unwrap_or_default();
    form.custom_event_tag_id = pick_id(source, &["custom_event_tag_id"]).unwrap_or_default();
    form.is_cancelled = source.get("is_cancelled").is_some_and(coerce_boolean);

    MappedInstance {
        form,
        master_event_id: pick_id(source, extract::MASTER_ID_KEYS),
    }
}

/// Edit-mode mapping of a master event: the event form plus the series
/// cancellation flag, taken from `cancel_all_instances` when present and
/// `is_cancelled` otherwise.
pub fn map_master_payload_to_form_state(
    payload: &Value,
    fallback_bar_id: Option<&str>,
) -> MasterEventEditFormState {
    let source = unwrap_single_event_payload(payload);
    let event = map_api_event_to_form_state(source, fallback_bar_id);
    let is_cancelled = match source.get("cancel_all_instances") {
        Some(flag) => coerce_boolean(flag),
        None => source.get("is_cancelled").is_some_and(coerce_boolean),
    };
    MasterEventEditFormState {
        event,
        is_cancelled,
    }
}

/// Outgoing create payload. The recurrence projection is structural: the
/// day list is empty for every non-weekly pattern, and exactly one of the
/// end fields is set, matching the selected end condition.
pub fn build_master_event_create_request(form: &EventFormState) -> CreateMasterEventRequest {
    CreateMasterEventRequest {
        bar_id: form.bar_id.trim().to_string(),
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        recurrence_start_date: form.start_date.clone(),
        start_time: ensure_time_with_seconds(&form.start_time),
        end_time: ensure_time_with_seconds(&form.end_time),
        image_url: form.image_url.as_deref().and_then(empty_to_null),
        event_tag_id: form.event_tag_id.trim().to_string(),
        external_link: form.external_link.as_deref().and_then(empty_to_null),
        recurrence_pattern: form.recurrence_pattern(),
        recurrence_days: form.recurrence_days().to_vec(),
        recurrence_end_date: form.recurrence_end_date(),
        recurrence_end_occurrences: form.recurrence_end_occurrences(),
    }
}

/// Outgoing update payload. `regenerate_instances` is always `false`:
/// editing a master never triggers server-side regeneration of the series.
pub fn build_master_event_update_request(
    form: &MasterEventEditFormState,
) -> UpdateMasterEventRequest {
    let base = build_master_event_create_request(&form.event);
    UpdateMasterEventRequest {
        bar_id: base.bar_id,
        title: base.title,
        description: base.description,
        recurrence_start_date: base.recurrence_start_date,
        start_time: base.start_time,
        end_time: base.end_time,
        image_url: base.image_url,
        event_tag_id: base.event_tag_id,
        external_link: base.external_link,
        recurrence_pattern: base.recurrence_pattern,
        recurrence_days: base.recurrence_days,
        recurrence_end_date: base.recurrence_end_date,
        recurrence_end_occurrences: base.recurrence_end_occurrences,
        cancel_all_instances: form.is_cancelled,
        regenerate_instances: false,
    }
}

/// Outgoing instance override payload. Empty custom fields become `None`,
/// which the backend reads as "inherit from the master".
pub fn build_instance_update_request(form: &InstanceEditFormState) -> UpdateInstanceRequest {
    UpdateInstanceRequest {
        date: form.date.clone(),
        custom_start_time: ensure_time_with_seconds(&form.custom_start_time),
        custom_end_time: ensure_time_with_seconds(&form.custom_end_time),
        custom_title: empty_to_null(&form.custom_title),
        custom_description: empty_to_null(&form.custom_description),
        custom_event_tag_id: empty_to_null(&form.custom_event_tag_id),
        custom_external_link: empty_to_null(&form.custom_external_link),
        custom_image_url: empty_to_null(&form.custom_image_url),
        is_cancelled: form.is_cancelled,
    }
}

/// Flat tag lookup list from whatever envelope the tags endpoint used.
/// Rows without a resolvable id are dropped.
pub fn normalize_event_tags(payload: &Value) -> Vec<EventTag> {
    unwrap_collection(payload)
        .iter()
        .filter_map(|row| {
            let id = pick_id(row, extract::TAG_ROW_ID_KEYS)?;
            let name = pick_string(row, extract::TAG_NAME_KEYS).unwrap_or_default();
            Some(EventTag { id, name })
        })
        .collect()
}

fn resolve_canonical_time(source: &Value, time_keys: &[&str], datetime_keys: &[&str]) -> String {
    pick_with(source, time_keys, canonical_time_from_value)
        .or_else(|| {
            pick_with(source, datetime_keys, coerce_time_string)
                .and_then(|raw| ensure_time_with_seconds(&raw))
        })
        .unwrap_or_default()
}

/// Wire times are already `HH:MM:SS`, so normalization must not shave the
/// seconds off; only values that fail the direct normalization go through
/// the lossier `HH:MM` extraction.
fn canonical_time_from_value(value: &Value) -> Option<String> {
    let text = value.as_str()?;
    ensure_time_with_seconds(text)
        .or_else(|| coerce_time_string(value).and_then(|raw| ensure_time_with_seconds(&raw)))
}
