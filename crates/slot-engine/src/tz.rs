//! Time zone helpers: IANA zone parsing, wall-clock resolution across DST
//! transitions, and the invitee's fixed-offset day window.
//!
//! Nothing here consults a process-wide "current timezone". Every zone and
//! offset is passed in explicitly.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::interval::Interval;

/// Parse an IANA zone name such as `"America/New_York"`.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Resolve a wall-clock time in `tz` to an instant.
///
/// - Unambiguous times map directly.
/// - Times repeated by a DST fold resolve to the earliest instant.
/// - Times skipped by a DST gap are shifted forward by the gap length
///   (02:30 during a spring-forward becomes 03:30 in the new offset).
pub fn localize(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Interpret the skipped wall time with the offset in effect before
            // the gap. Gaps last at most a day and offsets stay within ±14h, so
            // the instant two days earlier precedes the transition.
            let before = local - Duration::days(2);
            let offset = tz.offset_from_utc_datetime(&before).fix();
            (local - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
        }
    }
}

/// An invitee-local calendar date pinned to one UTC offset.
///
/// The day window is always `[00:00, 24:00)` in that offset, i.e. exactly
/// 1440 minutes, regardless of any DST transition in the invitee's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviteeDay {
    date: NaiveDate,
    offset: FixedOffset,
}

impl InviteeDay {
    pub fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        Self { date, offset }
    }

    /// Take the local date and offset embedded in an RFC 3339 anchor.
    pub fn from_anchor(anchor: DateTime<FixedOffset>) -> Self {
        Self {
            date: anchor.date_naive(),
            offset: *anchor.offset(),
        }
    }

    /// Anchor `date` in `tz` using the offset in effect at local midnight.
    pub fn in_time_zone(date: NaiveDate, tz: &Tz) -> Self {
        let midnight = localize(tz, date.and_time(NaiveTime::MIN));
        let offset = tz.offset_from_utc_datetime(&midnight.naive_utc()).fix();
        Self { date, offset }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The instant of local midnight opening this day.
    pub fn start(&self) -> DateTime<Utc> {
        (self.date.and_time(NaiveTime::MIN)
            - Duration::seconds(i64::from(self.offset.local_minus_utc())))
        .and_utc()
    }

    /// The exclusive end of the day window.
    pub fn end(&self) -> DateTime<Utc> {
        self.start() + Duration::days(1)
    }

    pub fn window(&self) -> Interval {
        Interval::new(self.start(), self.end())
    }

    /// The same offset, another date.
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            date,
            offset: self.offset,
        }
    }

    /// The local date of `instant` seen from this day's offset.
    pub fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// RFC 3339 anchor at local midnight, the inverse of [`InviteeDay::from_anchor`].
    pub fn anchor(&self) -> DateTime<FixedOffset> {
        self.start().with_timezone(&self.offset)
    }
}
