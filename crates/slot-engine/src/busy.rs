//! Busy-interval filtering with buffers and round-robin candidates.
//!
//! A slot `[s, s + length)` is rejected by a busy interval `[b.start, b.end)`
//! when `s < b.end + after && b.start - before < s + length`, i.e. the
//! buffer-padded busy interval overlaps the slot. Touching edges do not count.

use chrono::{DateTime, Duration, Utc};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::interval::{merge_intervals, BusyInterval, Interval};
use crate::slots::Slot;

/// One round-robin candidate and the intervals during which they are busy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBusy {
    pub username: String,
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
}

/// Busy intervals reported by one calendar source (a booking table, a
/// connected external calendar, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusySource {
    /// Opaque identifier for this source (e.g., "bookings", "work-google").
    pub source_id: String,
    pub busy: Vec<BusyInterval>,
}

/// Flatten every source into one sorted, non-overlapping busy snapshot.
pub fn merge_busy_sources(sources: &[BusySource]) -> Vec<BusyInterval> {
    merge_intervals(sources.iter().flat_map(|s| s.busy.iter().copied()))
}

/// Buffer settings applied around every busy interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buffers {
    pub before: i64,
    pub after: i64,
}

/// True when `[start, start + event_length)` hits any buffer-padded busy interval.
pub fn conflicts_with_busy(
    start: DateTime<Utc>,
    event_length: i64,
    busy: &[BusyInterval],
    buffers: Buffers,
) -> bool {
    let end = Duration::try_minutes(event_length)
        .and_then(|length| start.checked_add_signed(length))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let slot = Interval::new(start, end);
    busy.iter()
        .any(|b| b.padded(buffers.before, buffers.after).overlaps(&slot))
}

/// Remove slots that collide with busy time.
///
/// With no round-robin candidates only `shared` applies and `users` stays
/// empty. With candidates, a slot survives when at least one candidate is free
/// of both `shared` and their own busy list; the free usernames are recorded
/// on the slot in input order.
pub fn filter_busy(
    slots: Vec<Slot>,
    event_length: i64,
    shared: &[BusyInterval],
    users: &[UserBusy],
    buffers: Buffers,
) -> Vec<Slot> {
    slots
        .into_iter()
        .filter_map(|mut slot| {
            if conflicts_with_busy(slot.time, event_length, shared, buffers) {
                trace!("slot {} rejected: overlaps shared busy time", slot.time);
                return None;
            }
            if users.is_empty() {
                return Some(slot);
            }
            slot.users = users
                .iter()
                .filter(|u| !conflicts_with_busy(slot.time, event_length, &u.busy, buffers))
                .map(|u| u.username.clone())
                .collect();
            if slot.users.is_empty() {
                trace!("slot {} rejected: no round-robin candidate is free", slot.time);
                return None;
            }
            Some(slot)
        })
        .collect()
}
