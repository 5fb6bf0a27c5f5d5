use barhop_core::mappers::{
    build_instance_update_request, build_master_event_create_request,
    build_master_event_update_request, extract_event_collection,
    map_api_event_to_form_state, map_instance_payload_to_form_state,
    map_master_payload_to_form_state, normalize_event_tags, normalize_remote_event,
};
use barhop_core::models::event::{
    EndCondition, EventFormState, MasterEventEditFormState, Recurrence, RecurrenceEndMode,
    RecurrencePattern,
};
use barhop_core::models::instance::InstanceEditFormState;
use barhop_core::models::tag::EventTag;
use pretty_assertions::assert_eq;
use serde_json::json;

fn trivia_form() -> EventFormState {
    let mut form = EventFormState::initial_on(
        chrono::NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
    );
    form.bar_id = "7".to_string();
    form.title = "Trivia".to_string();
    form.start_time = "19:00:00".to_string();
    form.end_time = "21:00:00".to_string();
    form.event_tag_id = "3".to_string();
    form.recurrence = Recurrence::Weekly {
        days: vec![1, 3],
        end: EndCondition::AfterCount(10),
    };
    form
}

#[test]
fn test_normalize_remote_event_resolves_aliased_fields() {
    let row = json!({
        "event_id": 9,
        "name": "Vinyl Night",
        "start_date": "2024-05-02",
        "startTime": "21:00:00",
        "endTime": "23:30:00",
    });
    let event = normalize_remote_event(&row).expect("row has a date");
    assert_eq!(event.id, "9");
    assert_eq!(event.title, "Vinyl Night");
    assert_eq!(event.date, "2024-05-02");
    assert_eq!(event.start_time, Some("21:00".to_string()));
    assert_eq!(event.end_time, Some("23:30".to_string()));
}

#[test]
fn test_normalize_remote_event_falls_back_to_datetimes() {
    let row = json!({"start_at": "2024-05-03T18:30:00Z"});
    let event = normalize_remote_event(&row).expect("datetime supplies the date");
    assert_eq!(event.title, "Untitled Event");
    assert_eq!(event.date, "2024-05-03");
    assert_eq!(event.start_time, Some("18:30".to_string()));
    assert_eq!(event.end_time, None);
}

#[test]
fn test_normalize_remote_event_drops_dateless_rows() {
    assert_eq!(normalize_remote_event(&json!({"title": "Ghost"})), None);
}

#[test]
fn test_extract_event_collection_unwraps_envelopes_and_skips_bad_rows() {
    let payload = json!({
        "data": {
            "events": [
                {"id": 1, "title": "A", "date": "2024-05-01"},
                {"title": "dateless"},
                {"id": 2, "title": "B", "date": "2024-05-02"},
            ]
        }
    });
    let events = extract_event_collection(&payload);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "1");
    assert_eq!(events[1].id, "2");
}

#[test]
fn test_map_api_event_uses_fallback_bar_id_and_ignores_bad_patterns() {
    let payload = json!({
        "title": "Open Mic",
        "recurrence_pattern": "fortnightly",
    });
    let form = map_api_event_to_form_state(&payload, Some("11"));
    assert_eq!(form.bar_id, "11");
    assert_eq!(form.title, "Open Mic");
    assert_eq!(form.recurrence_pattern(), RecurrencePattern::None);
}

#[test]
fn test_map_api_event_infers_end_mode_from_occurrences() {
    let payload = json!({
        "bar_id": 2,
        "recurrence_pattern": "daily",
        "recurrence_end_occurrences": 5,
    });
    let form = map_api_event_to_form_state(&payload, None);
    assert_eq!(form.bar_id, "2");
    assert_eq!(form.recurrence_pattern(), RecurrencePattern::Daily);
    assert_eq!(
        form.recurrence_end_mode(),
        Some(RecurrenceEndMode::Occurrences)
    );
    assert_eq!(form.recurrence_end_occurrences(), Some(5));
    assert_eq!(form.recurrence_end_date(), None);
}

#[test]
fn test_map_master_payload_to_form_state() {
    let payload = json!({
        "title": "Karaoke",
        "start_time": "20:00:00",
        "end_time": "23:00:00",
        "event_tag_id": 5,
        "recurrence_pattern": "monthly",
        "recurrence_end_date": "2024-12-31T00:00:00Z",
    });
    let master = map_master_payload_to_form_state(&payload, Some("4"));
    assert_eq!(master.event.bar_id, "4");
    assert_eq!(master.event.title, "Karaoke");
    assert_eq!(master.event.start_time, "20:00:00");
    assert_eq!(master.event.end_time, "23:00:00");
    assert_eq!(master.event.event_tag_id, "5");
    assert_eq!(master.event.recurrence_pattern(), RecurrencePattern::Monthly);
    assert_eq!(
        master.event.recurrence_end_mode(),
        Some(RecurrenceEndMode::Date)
    );
    assert_eq!(
        master.event.recurrence_end_date(),
        Some("2024-12-31".to_string())
    );
    assert!(!master.is_cancelled);
}

#[test]
fn test_map_master_payload_preserves_wire_seconds() {
    let payload = json!({
        "title": "Late Set",
        "start_time": "20:00:30",
        "end_time": "01:15:45",
    });
    let master = map_master_payload_to_form_state(&payload, None);
    assert_eq!(master.event.start_time, "20:00:30");
    assert_eq!(master.event.end_time, "01:15:45");

    // round-tripping the form back to the wire keeps the seconds too
    let request = build_master_event_create_request(&master.event);
    assert_eq!(request.start_time, Some("20:00:30".to_string()));
    assert_eq!(request.end_time, Some("01:15:45".to_string()));
}

#[test]
fn test_map_master_payload_reads_cancellation_aliases() {
    let cancelled = map_master_payload_to_form_state(
        &json!({"data": {"title": "X", "cancel_all_instances": "1"}}),
        None,
    );
    assert!(cancelled.is_cancelled);

    let legacy = map_master_payload_to_form_state(&json!({"is_cancelled": true}), None);
    assert!(legacy.is_cancelled);
}

#[test]
fn test_map_instance_payload_to_form_state() {
    let payload = json!({
        "data": {
            "date": "2024-07-04",
            "custom_start_time": "22:00:00",
            "custom_title": "Fireworks Edition",
            "is_cancelled": "1",
            "event_id": 12,
        }
    });
    let mapped = map_instance_payload_to_form_state(&payload);
    assert_eq!(mapped.form.date, "2024-07-04");
    assert_eq!(mapped.form.custom_start_time, "22:00");
    assert_eq!(mapped.form.custom_end_time, "");
    assert_eq!(mapped.form.custom_title, "Fireworks Edition");
    assert!(mapped.form.is_cancelled);
    assert_eq!(mapped.master_event_id, Some("12".to_string()));
}

#[test]
fn test_map_instance_payload_flags_orphans() {
    let mapped = map_instance_payload_to_form_state(&json!({"date": "2024-07-05"}));
    assert_eq!(mapped.master_event_id, None);
}

#[test]
fn test_build_master_event_create_request() {
    let request = build_master_event_create_request(&trivia_form());
    assert_eq!(request.bar_id, "7");
    assert_eq!(request.title, "Trivia");
    assert_eq!(request.recurrence_start_date, "2024-06-01");
    assert_eq!(request.start_time, Some("19:00:00".to_string()));
    assert_eq!(request.end_time, Some("21:00:00".to_string()));
    assert_eq!(request.recurrence_pattern, RecurrencePattern::Weekly);
    assert_eq!(request.recurrence_days, vec![1, 3]);
    assert_eq!(request.recurrence_end_date, None);
    assert_eq!(request.recurrence_end_occurrences, Some(10));
    assert_eq!(request.image_url, None);
    assert_eq!(request.external_link, None);
}

#[test]
fn test_build_master_event_create_request_clears_days_outside_weekly() {
    let mut form = trivia_form();
    form.set_recurrence_pattern(RecurrencePattern::Monthly);
    let request = build_master_event_create_request(&form);
    assert_eq!(request.recurrence_days, Vec::<u8>::new());
    assert_eq!(request.recurrence_end_occurrences, Some(10));
}

#[test]
fn test_build_master_event_update_request_never_regenerates() {
    let master = MasterEventEditFormState {
        event: trivia_form(),
        is_cancelled: true,
    };
    let request = build_master_event_update_request(&master);
    assert!(request.cancel_all_instances);
    assert!(!request.regenerate_instances);
    assert_eq!(request.recurrence_days, vec![1, 3]);
}

#[test]
fn test_build_instance_update_request_maps_empty_to_inherit() {
    let mut form = InstanceEditFormState::empty();
    form.date = "2024-07-04".to_string();
    form.custom_start_time = "20:00".to_string();
    form.custom_title = "  ".to_string();
    form.custom_event_tag_id = "9".to_string();

    let request = build_instance_update_request(&form);
    assert_eq!(request.date, "2024-07-04");
    assert_eq!(request.custom_start_time, Some("20:00:00".to_string()));
    assert_eq!(request.custom_end_time, None);
    assert_eq!(request.custom_title, None);
    assert_eq!(request.custom_event_tag_id, Some("9".to_string()));
    assert!(!request.is_cancelled);
}

#[test]
fn test_normalize_event_tags() {
    let payload = json!({
        "success": true,
        "data": {"tags": [
            {"id": 1, "name": "Trivia"},
            {"name": "no id, dropped"},
            {"id": "2", "name": "Karaoke"},
        ]}
    });
    let tags = normalize_event_tags(&payload);
    assert_eq!(
        tags,
        vec![
            EventTag {
                id: "1".to_string(),
                name: "Trivia".to_string()
            },
            EventTag {
                id: "2".to_string(),
                name: "Karaoke".to_string()
            },
        ]
    );
}
