//! Rotation scheduler, range clearing and the last-aired cache.
//!
//! # Algorithm
//!
//! [`Scheduler::generate`] walks the calendar one day at a time and fills
//! every open slot with the head episode of the show that has been off
//! the air longest (lower priority number on ties). Committed days are
//! reused on later runs, so a run can be resumed from any date it already
//! covered.
//!
//! [`Scheduler::clear_range`] reverts a date span, returning episodes to
//! their shows in sorted position.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//!   (list scheduling with dispatching rules)
//! - Kleinrock (1976), "Queueing Systems", Vol. 2 (round-robin fairness)

mod cache;
mod clearing;
mod rotation;

#[cfg(test)]
mod laws;

pub use cache::LastAiredCache;
pub use clearing::ClearSummary;
pub use rotation::{RunOutcome, RunRequest, Scheduler, StopReason};
