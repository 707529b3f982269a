//! Event type availability configuration.
//!
//! Mirrors the booking application's event type record. Only the fields that
//! the active `periodType` uses are checked; the rest are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::period::{PeriodPolicy, PeriodType};

/// Upper bound for every duration field: one hundred years, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 100 * 366 * 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeAvailabilityConfig {
    /// Event duration in minutes.
    pub length: i64,
    /// Step between slot starts; falls back to `length`.
    #[serde(default)]
    pub slot_interval: Option<i64>,
    #[serde(default)]
    pub minimum_booking_notice: i64,
    #[serde(default)]
    pub before_event_buffer: i64,
    #[serde(default)]
    pub after_event_buffer: i64,
    #[serde(default)]
    pub period_type: PeriodType,
    #[serde(default)]
    pub period_days: Option<u32>,
    #[serde(default)]
    pub period_count_calendar_days: Option<bool>,
    #[serde(default)]
    pub period_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub period_end_date: Option<DateTime<Utc>>,
}

impl EventTypeAvailabilityConfig {
    /// An unlimited-horizon event of `length` minutes with no notice or buffers.
    pub fn new(length: i64) -> Self {
        Self {
            length,
            slot_interval: None,
            minimum_booking_notice: 0,
            before_event_buffer: 0,
            after_event_buffer: 0,
            period_type: PeriodType::Unlimited,
            period_days: None,
            period_count_calendar_days: None,
            period_start_date: None,
            period_end_date: None,
        }
    }

    /// Parse and validate a JSON event type record.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The slot step in minutes.
    pub fn frequency(&self) -> i64 {
        self.slot_interval.unwrap_or(self.length)
    }

    pub fn validate(&self) -> Result<()> {
        validate_durations(
            self.length,
            self.frequency(),
            self.minimum_booking_notice,
            self.before_event_buffer,
            self.after_event_buffer,
        )?;
        self.period_policy().map(|_| ())
    }

    /// Resolve the active period type into a policy.
    pub fn period_policy(&self) -> Result<PeriodPolicy> {
        match self.period_type {
            PeriodType::Unlimited => Ok(PeriodPolicy::Unlimited),
            PeriodType::Rolling => {
                let days = self.period_days.ok_or(SlotError::MissingPeriodField {
                    period_type: "ROLLING",
                    field: "periodDays",
                })?;
                Ok(PeriodPolicy::Rolling {
                    days,
                    count_calendar_days: self.period_count_calendar_days.unwrap_or(false),
                })
            }
            PeriodType::Range => {
                let start = self.period_start_date.ok_or(SlotError::MissingPeriodField {
                    period_type: "RANGE",
                    field: "periodStartDate",
                })?;
                let end = self.period_end_date.ok_or(SlotError::MissingPeriodField {
                    period_type: "RANGE",
                    field: "periodEndDate",
                })?;
                Ok(PeriodPolicy::Range { start, end })
            }
        }
    }
}

/// Reject non-positive lengths/steps, negative notice or buffers, and any
/// value above [`MAX_DURATION_MINUTES`].
pub(crate) fn validate_durations(
    event_length: i64,
    frequency: i64,
    minimum_booking_notice: i64,
    before_event_buffer: i64,
    after_event_buffer: i64,
) -> Result<()> {
    let positive = [("eventLength", event_length), ("frequency", frequency)];
    for (field, value) in positive {
        if value <= 0 || value > MAX_DURATION_MINUTES {
            return Err(SlotError::InvalidDuration { field, value });
        }
    }
    let non_negative = [
        ("minimumBookingNotice", minimum_booking_notice),
        ("beforeEventBuffer", before_event_buffer),
        ("afterEventBuffer", after_event_buffer),
    ];
    for (field, value) in non_negative {
        if !(0..=MAX_DURATION_MINUTES).contains(&value) {
            return Err(SlotError::InvalidDuration { field, value });
        }
    }
    Ok(())
}
