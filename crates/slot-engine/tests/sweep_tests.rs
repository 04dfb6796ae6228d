//! Tests for sweeping a working window for free slots.

use chrono::{DateTime, Duration, TimeZone, Utc};
use slot_engine::{find_free_slots, first_free_slot, FreeSlot, SlotError, TimeInterval, WorkingWindow};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn iv(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeInterval {
    TimeInterval {
        start: at(start_hour, start_min),
        end: at(end_hour, end_min),
    }
}

fn nine_to_five() -> WorkingWindow {
    WorkingWindow::new(at(9, 0), at(17, 0)).unwrap()
}

fn starts(slots: &[FreeSlot]) -> Vec<DateTime<Utc>> {
    slots.iter().map(|s| s.start).collect()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn empty_day_yields_one_slot_at_window_start() {
    let slots = find_free_slots(&[], &nine_to_five(), Duration::minutes(60)).unwrap();
    assert_eq!(starts(&slots), vec![at(9, 0)]);
}

#[test]
fn short_leading_gap_is_rejected() {
    // Gap 09:00-10:00 is only 60 minutes; 90 are needed.
    let blocked = vec![iv(10, 0, 11, 0)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(90)).unwrap();
    assert_eq!(starts(&slots), vec![at(11, 0)]);
}

#[test]
fn each_fitting_gap_yields_one_slot_at_its_start() {
    let blocked = vec![iv(10, 0, 11, 0), iv(13, 0, 14, 0)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(60)).unwrap();
    assert_eq!(starts(&slots), vec![at(9, 0), at(11, 0), at(14, 0)]);
}

#[test]
fn exact_fit_is_accepted() {
    let blocked = vec![iv(10, 0, 16, 0)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(60)).unwrap();
    assert_eq!(starts(&slots), vec![at(9, 0), at(16, 0)]);
}

#[test]
fn block_covering_the_window_yields_nothing() {
    let blocked = vec![iv(8, 0, 18, 0)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(15)).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn zero_length_window_yields_nothing() {
    let window = WorkingWindow::new(at(9, 0), at(9, 0)).unwrap();
    let slots = find_free_slots(&[], &window, Duration::minutes(1)).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn block_before_the_window_advances_cursor_only_if_it_reaches_in() {
    // 08:00-09:30 overlaps the start of the window; 07:00-08:00 does not.
    let blocked = vec![iv(7, 0, 8, 0), iv(8, 0, 9, 30)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(60)).unwrap();
    assert_eq!(starts(&slots), vec![at(9, 30)]);
}

#[test]
fn blocks_after_the_window_are_ignored() {
    let blocked = vec![iv(18, 0, 19, 0), iv(20, 0, 21, 0)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(60)).unwrap();
    assert_eq!(starts(&slots), vec![at(9, 0)]);
}

#[test]
fn block_starting_at_window_end_still_closes_the_tail() {
    let blocked = vec![iv(10, 0, 16, 30), iv(17, 0, 18, 0)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(45)).unwrap();
    // 16:30-17:00 is only 30 minutes.
    assert_eq!(starts(&slots), vec![at(9, 0)]);
}

#[test]
fn duplicate_blocks_never_move_the_cursor_back() {
    let blocked = vec![iv(10, 0, 12, 0), iv(10, 30, 11, 0)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(60)).unwrap();
    assert_eq!(starts(&slots), vec![at(9, 0), at(12, 0)]);
}

#[test]
fn slots_never_extend_past_the_window() {
    let blocked = vec![iv(9, 0, 16, 15)];
    let slots = find_free_slots(&blocked, &nine_to_five(), Duration::minutes(60)).unwrap();
    assert!(slots.is_empty());
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn non_positive_duration_is_rejected() {
    for minutes in [0, -5] {
        let err = find_free_slots(&[], &nine_to_five(), Duration::minutes(minutes)).unwrap_err();
        assert!(
            matches!(err, SlotError::InvalidConfig { field: "duration_needed", .. }),
            "duration {minutes} should be rejected"
        );
    }
}

#[test]
fn inverted_window_is_rejected() {
    let window = WorkingWindow {
        start: at(17, 0),
        end: at(9, 0),
    };
    let err = find_free_slots(&[], &window, Duration::minutes(30)).unwrap_err();
    assert!(matches!(err, SlotError::InvalidConfig { field: "window", .. }));

    let err = WorkingWindow::new(at(17, 0), at(9, 0)).unwrap_err();
    assert_eq!(err.field(), "window");
}

// ── First fit ───────────────────────────────────────────────────────────────

#[test]
fn first_free_slot_returns_earliest_fit() {
    let blocked = vec![iv(9, 30, 10, 0), iv(11, 0, 12, 0)];
    let slot = first_free_slot(&blocked, &nine_to_five(), Duration::minutes(60)).unwrap();
    assert_eq!(slot, Some(FreeSlot { start: at(10, 0) }));
}

#[test]
fn first_free_slot_is_none_when_nothing_fits() {
    let blocked = vec![iv(9, 0, 17, 0)];
    let slot = first_free_slot(&blocked, &nine_to_five(), Duration::minutes(1)).unwrap();
    assert_eq!(slot, None);
}

#[test]
fn free_slot_span_and_wire_format() {
    let slot = FreeSlot { start: at(11, 0) };
    assert_eq!(slot.span(Duration::minutes(90)), iv(11, 0, 12, 30));
    assert_eq!(slot.to_rfc3339(), "2026-03-16T11:00:00+00:00");
}
