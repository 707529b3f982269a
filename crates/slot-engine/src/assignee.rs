//! Choosing one organizer among the round-robin candidates free for a slot.
//!
//! The slot engine only reports who is free; picking one of them is a policy
//! supplied by the caller through [`AssigneeStrategy`].

use std::collections::HashMap;

use crate::slots::Slot;

/// A fairness policy over free candidates.
pub trait AssigneeStrategy {
    /// Pick one of `candidates`, or `None` when the list is empty.
    ///
    /// `booking_counts` maps usernames to their number of upcoming bookings;
    /// missing names count as zero.
    fn select_assignee<'a>(
        &self,
        candidates: &'a [String],
        booking_counts: &HashMap<String, usize>,
    ) -> Option<&'a str>;
}

/// The candidate with the fewest upcoming bookings; ties go to the candidate
/// listed first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestBookings;

impl AssigneeStrategy for FewestBookings {
    fn select_assignee<'a>(
        &self,
        candidates: &'a [String],
        booking_counts: &HashMap<String, usize>,
    ) -> Option<&'a str> {
        candidates
            .iter()
            .min_by_key(|c| booking_counts.get(*c).copied().unwrap_or(0))
            .map(String::as_str)
    }
}

/// Always the first listed candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl AssigneeStrategy for FirstAvailable {
    fn select_assignee<'a>(
        &self,
        candidates: &'a [String],
        _booking_counts: &HashMap<String, usize>,
    ) -> Option<&'a str> {
        candidates.first().map(String::as_str)
    }
}

/// Apply `strategy` to the free users recorded on `slot`.
pub fn assign<'a>(
    slot: &'a Slot,
    strategy: &dyn AssigneeStrategy,
    booking_counts: &HashMap<String, usize>,
) -> Option<&'a str> {
    strategy.select_assignee(&slot.users, booking_counts)
}
