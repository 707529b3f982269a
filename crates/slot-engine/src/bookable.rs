//! Day-level availability: whether a date can be offered in a date picker.
//!
//! A date is bookable only when the period policy admits it AND a full slot
//! computation for it, busy times and buffers included, yields at least one
//! slot. Callers rendering many dates share one busy snapshot by reusing the
//! same [`BookableQuery`].

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::busy::UserBusy;
use crate::config::EventTypeAvailabilityConfig;
use crate::error::Result;
use crate::interval::BusyInterval;
use crate::slots::{compute_slots, Slot, SlotQuery};
use crate::tz::InviteeDay;
use crate::working_hours::{DateOverride, WorkingHours};

/// The host's schedule as the engine consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostAvailability {
    pub working_hours: Vec<WorkingHours>,
    #[serde(default)]
    pub date_overrides: Vec<DateOverride>,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookableQuery {
    /// Invitee-local date; its embedded offset fixes the day window.
    pub date: DateTime<FixedOffset>,
    pub now: DateTime<Utc>,
    pub event_type: EventTypeAvailabilityConfig,
    pub availability: HostAvailability,
    #[serde(default)]
    pub busy_intervals: Vec<BusyInterval>,
    #[serde(default)]
    pub users_with_busy_intervals: Vec<UserBusy>,
}

impl BookableQuery {
    /// The slot query for this query's date.
    pub fn slot_query(&self) -> SlotQuery {
        self.slot_query_on(InviteeDay::from_anchor(self.date))
    }

    fn slot_query_on(&self, day: InviteeDay) -> SlotQuery {
        let event = &self.event_type;
        SlotQuery {
            invitee_date: day.anchor(),
            now: self.now,
            frequency: event.frequency(),
            event_length: event.length,
            working_hours: self.availability.working_hours.clone(),
            date_overrides: self.availability.date_overrides.clone(),
            organizer_time_zone: self.availability.time_zone.clone(),
            minimum_booking_notice: event.minimum_booking_notice,
            busy_intervals: self.busy_intervals.clone(),
            before_event_buffer: event.before_event_buffer,
            after_event_buffer: event.after_event_buffer,
            users_with_busy_intervals: self.users_with_busy_intervals.clone(),
        }
    }

    fn bookable_on(&self, day: InviteeDay) -> Result<bool> {
        let policy = self.event_type.period_policy()?;
        if !policy.permits(&day, self.now) {
            debug!(
                "{} is outside the {} booking period",
                day.date(),
                policy.period_type()
            );
            return Ok(false);
        }
        Ok(!compute_slots(&self.slot_query_on(day))?.is_empty())
    }
}

/// Whether the query's date has at least one bookable slot inside the period.
pub fn is_date_bookable(query: &BookableQuery) -> Result<bool> {
    query.event_type.validate()?;
    query.bookable_on(InviteeDay::from_anchor(query.date))
}

/// Slots for the query's date, or none when the period excludes the date.
pub fn slots_for_date(query: &BookableQuery) -> Result<Vec<Slot>> {
    query.event_type.validate()?;
    let day = InviteeDay::from_anchor(query.date);
    let policy = query.event_type.period_policy()?;
    if !policy.permits(&day, query.now) {
        return Ok(Vec::new());
    }
    compute_slots(&query.slot_query_on(day))
}

/// Every bookable date in `from..=to`, evaluated in the query date's offset.
pub fn bookable_dates(query: &BookableQuery, from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>> {
    query.event_type.validate()?;
    let anchor = InviteeDay::from_anchor(query.date);
    let mut dates = Vec::new();
    for date in from.iter_days().take_while(|d| *d <= to) {
        if query.bookable_on(anchor.with_date(date))? {
            dates.push(date);
        }
    }
    debug!("{} of the dates {}..={} are bookable", dates.len(), from, to);
    Ok(dates)
}
