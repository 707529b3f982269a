//! # slot-engine
//!
//! Deterministic booking-slot computation for a scheduling application.
//!
//! Given a host's weekly working hours, per-date overrides, the event type's
//! booking rules (length, step, notice, buffers, booking horizon) and a
//! snapshot of busy intervals, the engine computes which start times an
//! invitee may book on a given day and whether a day is selectable at all.
//!
//! The engine is synchronous and pure. It performs no I/O and never reads the
//! clock: "now" and every time zone are explicit inputs. Fetching bookings and
//! external calendar busy times is the caller's job.
//!
//! ## Modules
//!
//! - [`slots`] — Slot generation for one invitee-local day (`compute_slots`)
//! - [`busy`] — Busy-interval filtering, buffers, round-robin candidates
//! - [`period`] — Booking horizon policies and business-day arithmetic
//! - [`bookable`] — Day availability predicate and month-grid helper
//! - [`working_hours`] — Weekly rows, date overrides, schedule conversions
//! - [`assignee`] — Pluggable round-robin assignee selection
//! - [`config`] — Event type availability configuration
//! - [`interval`] — Half-open intervals, overlap and merging
//! - [`tz`] — Time zone parsing, DST-safe wall time resolution, invitee day
//! - [`error`] — Error types

pub mod assignee;
pub mod bookable;
pub mod busy;
pub mod config;
pub mod error;
pub mod interval;
pub mod period;
pub mod slots;
pub mod tz;
pub mod working_hours;

pub use assignee::{AssigneeStrategy, FewestBookings, FirstAvailable};
pub use bookable::{bookable_dates, is_date_bookable, slots_for_date, BookableQuery, HostAvailability};
pub use busy::{merge_busy_sources, BusySource, UserBusy};
pub use config::EventTypeAvailabilityConfig;
pub use error::SlotError;
pub use interval::{BusyInterval, Interval};
pub use period::{PeriodPolicy, PeriodType};
pub use slots::{compute_slots, Slot, SlotQuery};
pub use tz::InviteeDay;
pub use working_hours::{DateOverride, Schedule, TimeRange, WorkingHours};
