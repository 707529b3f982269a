//! Tests for the day availability predicate and the month-grid helper.
//!
//! The host works Monday-Friday 09:00-17:00 UTC. 2026-03-13 is a Friday and
//! 2026-03-16 a Monday.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use slot_engine::{
    bookable_dates, is_date_bookable, slots_for_date, BookableQuery, BusyInterval,
    EventTypeAvailabilityConfig, HostAvailability, PeriodType, SlotError, TimeRange, WorkingHours,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn host() -> HostAvailability {
    HostAvailability {
        working_hours: vec![WorkingHours::new(1..=5, TimeRange::from_hm((9, 0), (17, 0)))],
        date_overrides: vec![],
        time_zone: "UTC".to_string(),
    }
}

fn query_on(day: &str, event_type: EventTypeAvailabilityConfig) -> BookableQuery {
    BookableQuery {
        date: DateTime::parse_from_rfc3339(&format!("{day}T00:00:00Z")).unwrap(),
        now: Utc.with_ymd_and_hms(2026, 3, 13, 8, 0, 0).unwrap(),
        event_type,
        availability: host(),
        busy_intervals: vec![],
        users_with_busy_intervals: vec![],
    }
}

fn range_event() -> EventTypeAvailabilityConfig {
    let mut event = EventTypeAvailabilityConfig::new(30);
    event.period_type = PeriodType::Range;
    event.period_start_date = Some(Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap());
    event.period_end_date = Some(Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap());
    event
}

fn rolling_event(days: u32, count_calendar_days: bool) -> EventTypeAvailabilityConfig {
    let mut event = EventTypeAvailabilityConfig::new(30);
    event.period_type = PeriodType::Rolling;
    event.period_days = Some(days);
    event.period_count_calendar_days = Some(count_calendar_days);
    event
}

// ── Range ───────────────────────────────────────────────────────────────────

#[test]
fn range_boundary_days_are_bookable() {
    assert!(is_date_bookable(&query_on("2026-03-16", range_event())).unwrap());
    assert!(is_date_bookable(&query_on("2026-03-20", range_event())).unwrap());
}

#[test]
fn days_outside_range_are_not_bookable() {
    assert!(!is_date_bookable(&query_on("2026-03-13", range_event())).unwrap());
    assert!(!is_date_bookable(&query_on("2026-03-23", range_event())).unwrap());
}

#[test]
fn month_grid_for_range_is_the_range_weekdays() {
    let q = query_on("2026-03-01", range_event());
    let dates = bookable_dates(&q, date("2026-03-01"), date("2026-03-31")).unwrap();

    assert_eq!(
        dates,
        vec![
            date("2026-03-16"),
            date("2026-03-17"),
            date("2026-03-18"),
            date("2026-03-19"),
            date("2026-03-20"),
        ]
    );
}

// ── Rolling ─────────────────────────────────────────────────────────────────

#[test]
fn rolling_business_days_from_friday_reach_wednesday() {
    let q = query_on("2026-03-13", rolling_event(3, false));
    let dates = bookable_dates(&q, date("2026-03-13"), date("2026-03-20")).unwrap();

    assert_eq!(
        dates,
        vec![
            date("2026-03-13"),
            date("2026-03-16"),
            date("2026-03-17"),
            date("2026-03-18"),
        ]
    );
}

#[test]
fn rolling_calendar_days_from_friday_reach_monday() {
    let q = query_on("2026-03-13", rolling_event(3, true));
    let dates = bookable_dates(&q, date("2026-03-13"), date("2026-03-20")).unwrap();

    assert_eq!(dates, vec![date("2026-03-13"), date("2026-03-16")]);
}

#[test]
fn rolling_without_period_days_is_a_contract_violation() {
    let mut event = rolling_event(3, false);
    event.period_days = None;

    assert!(matches!(
        is_date_bookable(&query_on("2026-03-16", event)),
        Err(SlotError::MissingPeriodField {
            field: "periodDays",
            ..
        })
    ));
}

// ── Slot-backed checks ──────────────────────────────────────────────────────

#[test]
fn fully_booked_day_is_not_bookable() {
    let mut q = query_on("2026-03-17", range_event());
    q.busy_intervals = vec![BusyInterval::new(
        Utc.with_ymd_and_hms(2026, 3, 17, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 17, 18, 0, 0).unwrap(),
    )];

    assert!(!is_date_bookable(&q).unwrap());
}

#[test]
fn unlimited_still_needs_a_slot() {
    let event = EventTypeAvailabilityConfig::new(30);

    assert!(is_date_bookable(&query_on("2026-03-16", event.clone())).unwrap());
    assert!(!is_date_bookable(&query_on("2026-03-15", event)).unwrap());
}

#[test]
fn today_after_hours_is_not_bookable() {
    let mut q = query_on("2026-03-13", EventTypeAvailabilityConfig::new(30));
    q.now = Utc.with_ymd_and_hms(2026, 3, 13, 16, 45, 0).unwrap();

    assert!(!is_date_bookable(&q).unwrap());
}

#[test]
fn slots_for_date_honours_period() {
    assert!(slots_for_date(&query_on("2026-03-23", range_event()))
        .unwrap()
        .is_empty());
    assert_eq!(
        slots_for_date(&query_on("2026-03-16", range_event()))
            .unwrap()
            .len(),
        16
    );
}

#[test]
fn slot_interval_overrides_step() {
    let mut event = EventTypeAvailabilityConfig::new(60);
    event.slot_interval = Some(30);

    let slots = slots_for_date(&query_on("2026-03-16", event)).unwrap();
    assert_eq!(slots.len(), 15);
}

// ── Configuration parsing ───────────────────────────────────────────────────

#[test]
fn config_parses_from_event_type_json() {
    let config = EventTypeAvailabilityConfig::from_json(
        r#"{
            "length": 45,
            "slotInterval": null,
            "minimumBookingNotice": 120,
            "beforeEventBuffer": 10,
            "afterEventBuffer": 5,
            "periodType": "ROLLING",
            "periodDays": 14,
            "periodCountCalendarDays": true,
            "periodStartDate": null,
            "periodEndDate": null
        }"#,
    )
    .unwrap();

    assert_eq!(config.frequency(), 45);
    assert_eq!(config.minimum_booking_notice, 120);
    assert_eq!(config.period_type, PeriodType::Rolling);
}

#[test]
fn config_ignores_fields_of_inactive_period_type() {
    let config = EventTypeAvailabilityConfig::from_json(
        r#"{"length": 30, "periodType": "UNLIMITED", "periodDays": 0, "periodStartDate": null}"#,
    );
    assert!(config.is_ok());
}

#[test]
fn config_rejects_unknown_period_type() {
    let config = EventTypeAvailabilityConfig::from_json(r#"{"length": 30, "periodType": "WEEKLY"}"#);
    assert!(matches!(config, Err(SlotError::Config(_))));
}

#[test]
fn config_rejects_range_without_end() {
    let config = EventTypeAvailabilityConfig::from_json(
        r#"{"length": 30, "periodType": "RANGE", "periodStartDate": "2026-03-16T00:00:00Z"}"#,
    );
    assert!(matches!(
        config,
        Err(SlotError::MissingPeriodField {
            field: "periodEndDate",
            ..
        })
    ));
}

#[test]
fn config_rejects_zero_length() {
    assert!(EventTypeAvailabilityConfig::from_json(r#"{"length": 0}"#).is_err());
}
