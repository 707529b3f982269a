//! Booking horizon policies: how far ahead (or inside which dates) an invitee
//! may book.
//!
//! All comparisons happen at day granularity in the invitee's offset, and the
//! boundary days themselves are inside the horizon.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;
use crate::tz::InviteeDay;

/// The persisted discriminant of a period policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodType {
    #[default]
    Unlimited,
    Rolling,
    Range,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Unlimited => "UNLIMITED",
            PeriodType::Rolling => "ROLLING",
            PeriodType::Range => "RANGE",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNLIMITED" => Ok(PeriodType::Unlimited),
            "ROLLING" => Ok(PeriodType::Rolling),
            "RANGE" => Ok(PeriodType::Range),
            other => Err(SlotError::InvalidPeriodType(other.to_string())),
        }
    }
}

/// A resolved period policy carrying only the fields its type uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodPolicy {
    Unlimited,
    Rolling {
        days: u32,
        count_calendar_days: bool,
    },
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl PeriodPolicy {
    pub fn period_type(&self) -> PeriodType {
        match self {
            PeriodPolicy::Unlimited => PeriodType::Unlimited,
            PeriodPolicy::Rolling { .. } => PeriodType::Rolling,
            PeriodPolicy::Range { .. } => PeriodType::Range,
        }
    }

    /// Earliest bookable date seen from `day`'s offset, if bounded.
    pub fn first_day(&self, day: &InviteeDay) -> Option<NaiveDate> {
        match self {
            PeriodPolicy::Range { start, .. } => Some(day.local_date_of(*start)),
            PeriodPolicy::Unlimited | PeriodPolicy::Rolling { .. } => None,
        }
    }

    /// Last bookable date seen from `day`'s offset, if bounded.
    ///
    /// For a rolling window this is today (in that offset) plus `days`
    /// calendar days, or plus `days` business days when calendar counting is
    /// off.
    pub fn last_day(&self, day: &InviteeDay, now: DateTime<Utc>) -> Option<NaiveDate> {
        match self {
            PeriodPolicy::Unlimited => None,
            PeriodPolicy::Rolling {
                days,
                count_calendar_days,
            } => {
                let today = day.local_date_of(now);
                Some(if *count_calendar_days {
                    add_calendar_days(today, *days)
                } else {
                    add_business_days(today, *days)
                })
            }
            PeriodPolicy::Range { end, .. } => Some(day.local_date_of(*end)),
        }
    }

    /// Whether `day` falls inside the horizon. Boundary days are inside.
    pub fn permits(&self, day: &InviteeDay, now: DateTime<Utc>) -> bool {
        let date = day.date();
        let after_start = self.first_day(day).map_or(true, |first| date >= first);
        let before_end = self.last_day(day, now).map_or(true, |last| date <= last);
        after_start && before_end
    }
}

fn add_calendar_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Add `days` business days (Monday through Friday) to `date`.
///
/// Weekends are skipped; holidays are not considered. Zero returns `date`
/// unchanged even when it is a weekend day. Saturates at `NaiveDate::MAX`.
pub fn add_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    if days == 0 {
        return date;
    }
    let mut current = date;
    let mut remaining = days;
    // From a weekend the first business day is the following Monday.
    if !is_business_day(current) {
        current = match next_business_day(current) {
            Some(monday) => monday,
            None => return NaiveDate::MAX,
        };
        remaining -= 1;
    }
    // Five business days from a weekday always land exactly one week later.
    let weeks = u64::from(remaining / 5);
    current = match current.checked_add_days(Days::new(weeks * 7)) {
        Some(date) => date,
        None => return NaiveDate::MAX,
    };
    for _ in 0..remaining % 5 {
        current = match next_business_day(current) {
            Some(date) => date,
            None => return NaiveDate::MAX,
        };
    }
    current
}

fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut next = date.succ_opt()?;
    while !is_business_day(next) {
        next = next.succ_opt()?;
    }
    Some(next)
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
