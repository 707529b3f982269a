//! Error types for slot-engine operations.
//!
//! Only contract violations are errors. A day with no bookable slots is a
//! valid, empty result and never surfaces here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Invalid duration for {field}: {value} minutes")]
    InvalidDuration { field: &'static str, value: i64 },

    #[error("Invalid period type: {0}")]
    InvalidPeriodType(String),

    #[error("Period type {period_type} requires {field}")]
    MissingPeriodField {
        period_type: &'static str,
        field: &'static str,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
