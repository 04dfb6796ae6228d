//! Tests for scheduling policy defaults, parsing and window resolution.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use slot_engine::policy::parse_hhmm;
use slot_engine::{SchedulingPolicy, SlotError};

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

#[test]
fn default_is_nine_to_five_without_buffer() {
    let policy = SchedulingPolicy::default();
    assert_eq!(policy.work_start, hm(9, 0));
    assert_eq!(policy.work_end, hm(17, 0));
    assert_eq!(policy.default_buffer().unwrap(), Duration::zero());
}

#[test]
fn window_for_resolves_the_day_in_utc() {
    let policy = SchedulingPolicy::default();
    let window = policy
        .window_for(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap())
        .unwrap();
    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap());
    assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 3, 16, 17, 0, 0).unwrap());
    assert_eq!(window.duration(), Duration::hours(8));
}

#[test]
fn inverted_working_hours_are_rejected() {
    let policy = SchedulingPolicy {
        work_start: hm(18, 0),
        work_end: hm(8, 0),
        default_buffer_minutes: 0,
    };
    let err = policy
        .window_for(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap())
        .unwrap_err();
    assert!(matches!(err, SlotError::InvalidConfig { field: "window", .. }));
}

#[test]
fn negative_default_buffer_is_rejected() {
    let policy = SchedulingPolicy {
        default_buffer_minutes: -15,
        ..SchedulingPolicy::default()
    };
    assert_eq!(policy.default_buffer().unwrap_err().field(), "buffer");
}

#[test]
fn deserializes_hhmm_times_with_defaults_for_missing_fields() {
    let json = r#"{"work_start": "08:30", "default_buffer_minutes": 10}"#;
    let policy: SchedulingPolicy = serde_json::from_str(json).unwrap();
    assert_eq!(policy.work_start, hm(8, 30));
    assert_eq!(policy.work_end, hm(17, 0));
    assert_eq!(policy.default_buffer_minutes, 10);
}

#[test]
fn rejects_malformed_time() {
    let json = r#"{"work_start": "half past eight"}"#;
    let err = serde_json::from_str::<SchedulingPolicy>(json).unwrap_err();
    assert!(err.to_string().contains("expected HH:MM"));
}

#[test]
fn serializes_back_to_hhmm() {
    let value = serde_json::to_value(SchedulingPolicy::default()).unwrap();
    assert_eq!(value["work_start"], "09:00");
    assert_eq!(value["work_end"], "17:00");
}

#[test]
fn parse_hhmm_accepts_optional_seconds() {
    assert_eq!(parse_hhmm("07:45"), Some(hm(7, 45)));
    assert_eq!(parse_hhmm("07:45:00"), Some(hm(7, 45)));
    assert_eq!(parse_hhmm("7pm"), None);
    assert_eq!(parse_hhmm("25:00"), None);
}
