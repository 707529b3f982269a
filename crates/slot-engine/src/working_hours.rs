//! Weekly working hours, per-date overrides, and their projection onto
//! concrete instants.
//!
//! Times are minutes of day in the schedule's own time zone. Rows are never
//! mutated in place; the per-date ranges are recomputed from the rows on every
//! call.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::{merge_intervals, Interval};
use crate::tz::localize;

/// Minutes in a day. Valid as an `end_time`, meaning "until midnight".
pub const MINUTES_PER_DAY: u16 = 1440;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A timezone-naive `[start_time, end_time)` range, in minutes of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: u16,
    pub end_time: u16,
}

impl TimeRange {
    pub fn new(start_time: u16, end_time: u16) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Build from `hh:mm` components. `(24, 0)` is accepted as the end of day.
    pub fn from_hm(start: (u16, u16), end: (u16, u16)) -> Self {
        Self::new(start.0 * 60 + start.1, end.0 * 60 + end.1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_time >= MINUTES_PER_DAY || self.end_time > MINUTES_PER_DAY {
            return Err(SlotError::InvalidWorkingHours(format!(
                "{} is outside the day",
                self
            )));
        }
        if self.start_time >= self.end_time {
            return Err(SlotError::InvalidWorkingHours(format!(
                "{} does not end after it starts (split overnight ranges with WorkingHours::overnight)",
                self
            )));
        }
        Ok(())
    }

    /// Place the range on `date` in `tz`.
    fn on_date(&self, date: NaiveDate, tz: &Tz) -> Interval {
        let midnight = date.and_time(NaiveTime::MIN);
        Interval::new(
            localize(tz, midnight + Duration::minutes(i64::from(self.start_time))),
            localize(tz, midnight + Duration::minutes(i64::from(self.end_time))),
        )
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} - {:02}:{:02}",
            self.start_time / 60,
            self.start_time % 60,
            self.end_time / 60,
            self.end_time % 60
        )
    }
}

/// One persisted availability row: a time range repeated on a set of weekdays.
///
/// Weekday indices run 0 (Sunday) through 6 (Saturday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub days: Vec<u8>,
    pub start_time: u16,
    pub end_time: u16,
}

impl WorkingHours {
    pub fn new(days: impl IntoIterator<Item = u8>, range: TimeRange) -> Self {
        let mut days: Vec<u8> = days.into_iter().collect();
        days.sort_unstable();
        days.dedup();
        Self {
            days,
            start_time: range.start_time,
            end_time: range.end_time,
        }
    }

    /// Split an overnight range (`end <= start`) into two date-bound rows.
    ///
    /// The head runs from `start` to midnight on `days`; the tail runs from
    /// midnight to `end` on the following weekday of each. A range that does
    /// not cross midnight comes back as a single row.
    pub fn overnight(days: impl IntoIterator<Item = u8>, start_time: u16, end_time: u16) -> Vec<Self> {
        let days: Vec<u8> = days.into_iter().collect();
        if start_time < end_time {
            return vec![Self::new(days, TimeRange::new(start_time, end_time))];
        }
        let mut rows = vec![Self::new(
            days.iter().copied(),
            TimeRange::new(start_time, MINUTES_PER_DAY),
        )];
        if end_time > 0 {
            rows.push(Self::new(
                days.iter().map(|d| (d % 7 + 1) % 7),
                TimeRange::new(0, end_time),
            ));
        }
        rows
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn applies_to(&self, weekday: u8) -> bool {
        self.days.contains(&weekday)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(day) = self.days.iter().find(|d| **d > 6) {
            return Err(SlotError::InvalidWorkingHours(format!(
                "weekday index {} is not in 0..=6",
                day
            )));
        }
        self.range().validate()
    }
}

impl fmt::Display for WorkingHours {
    /// `"Mon - Fri, 09:00 - 17:00"`; non-contiguous days are comma-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups: Vec<(u8, u8)> = Vec::new();
        for &day in &self.days {
            match groups.last_mut() {
                Some((_, last)) if *last + 1 == day => *last = day,
                _ => groups.push((day, day)),
            }
        }
        let name = |d: u8| DAY_NAMES.get(usize::from(d)).copied().unwrap_or("?");
        let days: Vec<String> = groups
            .iter()
            .map(|&(first, last)| {
                if first == last {
                    name(first).to_string()
                } else {
                    format!("{} - {}", name(first), name(last))
                }
            })
            .collect();
        write!(f, "{}, {}", days.join(", "), self.range())
    }
}

/// Exceptional availability for one date, replacing the weekday rows.
///
/// An override with no ranges marks the date as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateOverride {
    pub date: NaiveDate,
    #[serde(default)]
    pub ranges: Vec<TimeRange>,
}

impl DateOverride {
    pub fn unavailable(date: NaiveDate) -> Self {
        Self {
            date,
            ranges: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.ranges.iter().try_for_each(TimeRange::validate)
    }
}

/// Seven per-weekday range lists, index 0 = Sunday.
///
/// This is the shape a schedule editor works with; [`WorkingHours`] rows are
/// the grouped, persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule(pub [Vec<TimeRange>; 7]);

impl Default for Schedule {
    /// Monday through Friday, 09:00 - 17:00.
    fn default() -> Self {
        let business = vec![TimeRange::from_hm((9, 0), (17, 0))];
        Schedule([
            Vec::new(),
            business.clone(),
            business.clone(),
            business.clone(),
            business.clone(),
            business,
            Vec::new(),
        ])
    }
}

impl Schedule {
    /// Explode grouped rows into per-weekday lists (sorted, duplicates removed).
    pub fn from_working_hours(rows: &[WorkingHours]) -> Result<Self> {
        let mut days: [Vec<TimeRange>; 7] = Default::default();
        for row in rows {
            row.validate()?;
            for &day in &row.days {
                days[usize::from(day)].push(row.range());
            }
        }
        for ranges in days.iter_mut() {
            ranges.sort();
            ranges.dedup();
        }
        Ok(Schedule(days))
    }

    /// Group weekdays back into rows: one row per distinct range, listing every
    /// weekday that has it. Rows are ordered by range.
    pub fn to_working_hours(&self) -> Vec<WorkingHours> {
        let mut grouped: BTreeMap<TimeRange, Vec<u8>> = BTreeMap::new();
        for (day, ranges) in (0u8..).zip(self.0.iter()) {
            for range in ranges {
                grouped.entry(*range).or_default().push(day);
            }
        }
        grouped
            .into_iter()
            .map(|(range, days)| WorkingHours::new(days, range))
            .collect()
    }
}

/// The default Monday-Friday 09:00 - 17:00 rows.
pub fn default_working_hours() -> Vec<WorkingHours> {
    Schedule::default().to_working_hours()
}

/// Weekday index for `date`, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_sunday() is always in 0..7.
    date.weekday().num_days_from_sunday() as u8
}

/// Available instants on one organizer-local `date`.
///
/// Overrides for the date replace the weekday rows entirely (an override with
/// no ranges yields nothing). Output is sorted and non-overlapping.
pub fn ranges_for_date(
    date: NaiveDate,
    working_hours: &[WorkingHours],
    overrides: &[DateOverride],
    tz: &Tz,
) -> Vec<Interval> {
    let mut matching = overrides.iter().filter(|o| o.date == date).peekable();

    let local: Vec<TimeRange> = if matching.peek().is_some() {
        matching.flat_map(|o| o.ranges.iter().copied()).collect()
    } else {
        let weekday = weekday_index(date);
        working_hours
            .iter()
            .filter(|row| row.applies_to(weekday))
            .map(WorkingHours::range)
            .collect()
    };

    merge_intervals(local.iter().map(|range| range.on_date(date, tz)))
}

/// Available instants inside `window`, gathered from every organizer-local
/// date the window touches, clipped, then merged so that ranges meeting at
/// organizer midnight become one contiguous range.
pub fn ranges_within(
    window: &Interval,
    working_hours: &[WorkingHours],
    overrides: &[DateOverride],
    tz: &Tz,
) -> Vec<Interval> {
    if window.is_empty() {
        return Vec::new();
    }
    let first = window.start.with_timezone(tz).date_naive();
    let last = (window.end - Duration::seconds(1)).with_timezone(tz).date_naive();

    let clipped = first
        .iter_days()
        .take_while(|date| *date <= last)
        .flat_map(|date| ranges_for_date(date, working_hours, overrides, tz))
        .filter_map(|range| range.clip(window));

    merge_intervals(clipped)
}
