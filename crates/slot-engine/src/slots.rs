//! Slot generation for one invitee-local day.
//!
//! The working ranges the invitee's day touches are projected into that day,
//! walked in `frequency`-minute steps, trimmed by the booking cutoff, then
//! passed through the busy filter. The computation is pure: identical queries
//! produce identical, identically ordered slots.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::busy::{filter_busy, Buffers, UserBusy};
use crate::config::validate_durations;
use crate::error::Result;
use crate::interval::BusyInterval;
use crate::tz::{parse_time_zone, InviteeDay};
use crate::working_hours::{ranges_within, DateOverride, WorkingHours};

/// A bookable start time. `users` is filled only for round-robin queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
}

impl Slot {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            time,
            users: Vec::new(),
        }
    }
}

/// Everything needed to compute the slots of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    /// Invitee-local date; its embedded offset fixes the day window.
    pub invitee_date: DateTime<FixedOffset>,
    /// The reference clock for the booking notice.
    pub now: DateTime<Utc>,
    pub frequency: i64,
    pub event_length: i64,
    pub working_hours: Vec<WorkingHours>,
    #[serde(default)]
    pub date_overrides: Vec<DateOverride>,
    /// IANA zone the working hours and overrides are expressed in.
    pub organizer_time_zone: String,
    #[serde(default)]
    pub minimum_booking_notice: i64,
    #[serde(default)]
    pub busy_intervals: Vec<BusyInterval>,
    #[serde(default)]
    pub before_event_buffer: i64,
    #[serde(default)]
    pub after_event_buffer: i64,
    #[serde(default)]
    pub users_with_busy_intervals: Vec<UserBusy>,
}

impl SlotQuery {
    pub fn validate(&self) -> Result<()> {
        validate_durations(
            self.event_length,
            self.frequency,
            self.minimum_booking_notice,
            self.before_event_buffer,
            self.after_event_buffer,
        )?;
        self.working_hours.iter().try_for_each(WorkingHours::validate)?;
        self.date_overrides.iter().try_for_each(DateOverride::validate)
    }

    pub fn invitee_day(&self) -> InviteeDay {
        InviteeDay::from_anchor(self.invitee_date)
    }

    fn buffers(&self) -> Buffers {
        Buffers {
            before: self.before_event_buffer,
            after: self.after_event_buffer,
        }
    }
}

/// The earliest start a slot on `day` may have.
///
/// `now + notice` is measured from the day's midnight, rounded up to whole
/// minutes and then up to a multiple of `frequency`. A cutoff before the day
/// starts leaves the whole day open; one past its end closes it.
pub fn booking_cutoff(
    now: DateTime<Utc>,
    minimum_booking_notice: i64,
    frequency: i64,
    day: &InviteeDay,
) -> DateTime<Utc> {
    let Some(earliest) = Duration::try_minutes(minimum_booking_notice)
        .and_then(|notice| now.checked_add_signed(notice))
    else {
        return DateTime::<Utc>::MAX_UTC;
    };
    let day_start = day.start();
    if earliest <= day_start {
        return day_start;
    }
    if earliest >= day.end() {
        return earliest;
    }
    let elapsed = earliest - day_start;
    let mut minutes = elapsed.num_minutes();
    if elapsed > Duration::minutes(minutes) {
        minutes += 1;
    }
    let rounded = match minutes % frequency {
        0 => minutes,
        rest => minutes - rest + frequency,
    };
    Duration::try_minutes(rounded)
        .and_then(|offset| day_start.checked_add_signed(offset))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Compute every bookable slot start on the query's invitee day.
///
/// Returns an empty list when nothing is bookable. Errors only on contract
/// violations: malformed working hours, non-positive length or frequency,
/// negative notice or buffers, a duration above
/// [`MAX_DURATION_MINUTES`](crate::config::MAX_DURATION_MINUTES), or an
/// unknown time zone.
pub fn compute_slots(query: &SlotQuery) -> Result<Vec<Slot>> {
    query.validate()?;
    let tz = parse_time_zone(&query.organizer_time_zone)?;
    let day = query.invitee_day();

    let ranges = ranges_within(
        &day.window(),
        &query.working_hours,
        &query.date_overrides,
        &tz,
    );
    let cutoff = booking_cutoff(
        query.now,
        query.minimum_booking_notice,
        query.frequency,
        &day,
    );
    let step = Duration::minutes(query.frequency);
    let length = Duration::minutes(query.event_length);

    let mut candidates = Vec::new();
    for range in &ranges {
        let mut start = range.start;
        while let Some(end) = start.checked_add_signed(length) {
            if end > range.end {
                break;
            }
            if start >= cutoff {
                candidates.push(Slot::at(start));
            }
            match start.checked_add_signed(step) {
                Some(next) => start = next,
                None => break,
            }
        }
    }
    candidates.sort_by_key(|s| s.time);
    candidates.dedup_by_key(|s| s.time);
    let generated = candidates.len();

    let slots = filter_busy(
        candidates,
        query.event_length,
        &query.busy_intervals,
        &query.users_with_busy_intervals,
        query.buffers(),
    );

    debug!(
        "{} (offset {}): {} working ranges, {} candidates, {} bookable",
        day.date(),
        day.offset(),
        ranges.len(),
        generated,
        slots.len()
    );

    Ok(slots)
}
