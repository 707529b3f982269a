//! Month-grid rendering cost: one `is_date_bookable` per day, sharing one
//! busy snapshot.

use std::hint::black_box;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{
    bookable_dates, compute_slots, BookableQuery, BusyInterval, EventTypeAvailabilityConfig,
    HostAvailability, SlotQuery, TimeRange, WorkingHours,
};

fn busy_snapshot() -> Vec<BusyInterval> {
    let first = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
    (0..31)
        .flat_map(|day| {
            let base = first + Duration::days(day);
            [
                BusyInterval::new(base, base + Duration::minutes(30)),
                BusyInterval::new(base + Duration::hours(4), base + Duration::hours(5)),
            ]
        })
        .collect()
}

fn month_query() -> BookableQuery {
    BookableQuery {
        date: DateTime::parse_from_rfc3339("2026-03-01T00:00:00+01:00").unwrap(),
        now: Utc.with_ymd_and_hms(2026, 2, 27, 12, 0, 0).unwrap(),
        event_type: EventTypeAvailabilityConfig::new(30),
        availability: HostAvailability {
            working_hours: vec![WorkingHours::new(1..=5, TimeRange::from_hm((9, 0), (17, 0)))],
            date_overrides: vec![],
            time_zone: "America/New_York".to_string(),
        },
        busy_intervals: busy_snapshot(),
        users_with_busy_intervals: vec![],
    }
}

fn bench_month_grid(c: &mut Criterion) {
    let query = month_query();
    let from = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();

    c.bench_function("bookable_dates/march", |b| {
        b.iter(|| bookable_dates(black_box(&query), from, to).unwrap())
    });
}

fn bench_single_day(c: &mut Criterion) {
    let query: SlotQuery = month_query().slot_query();

    c.bench_function("compute_slots/one_day", |b| {
        b.iter(|| compute_slots(black_box(&query)).unwrap())
    });
}

criterion_group!(benches, bench_month_grid, bench_single_day);
criterion_main!(benches);
