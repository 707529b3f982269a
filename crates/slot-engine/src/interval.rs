//! Half-open time intervals and the merge/overlap primitives built on them.
//!
//! Two intervals overlap when `a.start < b.end && b.start < a.end`.
//! Adjacent intervals (one ends exactly when the other starts) do NOT overlap,
//! but they are coalesced by [`merge_intervals`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A period during which a host (or one round-robin candidate) is committed.
///
/// Sourced from confirmed bookings and external calendar free/busy queries.
pub type BusyInterval = Interval;

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// True when the interval contains no instant.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared by both intervals, or `None` when they do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> Option<i64> {
        if !self.overlaps(other) {
            return None;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        Some((end - start).num_minutes())
    }

    /// Grow the interval by `before` minutes at the start and `after` at the end.
    ///
    /// Saturates at the representable range of instants.
    pub fn padded(&self, before: i64, after: i64) -> Interval {
        let before = Duration::try_minutes(before).unwrap_or(Duration::MAX);
        let after = Duration::try_minutes(after).unwrap_or(Duration::MAX);
        Interval {
            start: self
                .start
                .checked_sub_signed(before)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: self
                .end
                .checked_add_signed(after)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Restrict the interval to `window`; `None` when nothing remains.
    pub fn clip(&self, window: &Interval) -> Option<Interval> {
        let clipped = Interval {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        };
        (!clipped.is_empty()).then_some(clipped)
    }
}

/// Merge overlapping or adjacent intervals.
///
/// Empty intervals are dropped. Returns a sorted, non-overlapping list.
pub fn merge_intervals(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.into_iter().filter(|i| !i.is_empty()).collect();

    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
