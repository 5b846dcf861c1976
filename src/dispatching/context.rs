//! Scheduling context for dispatching rule evaluation.

use chrono::NaiveDateTime;

/// State of the slot being filled, passed to every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Timestamp of the slot being filled.
    pub slot_time: NaiveDateTime,
}

impl SchedulingContext {
    /// Creates a context for the given slot.
    pub fn at_slot(slot_time: NaiveDateTime) -> Self {
        Self { slot_time }
    }

    /// Seconds from `last_aired` to the slot, negated: `last_aired - slot`.
    ///
    /// Never-aired shows get `i64::MIN`, so they outrank everything.
    pub fn distance_seconds(&self, last_aired: Option<NaiveDateTime>) -> i64 {
        match last_aired {
            Some(at) => (at - self.slot_time).num_seconds(),
            None => i64::MIN,
        }
    }
}
