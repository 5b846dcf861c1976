//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for candidates that should win.

use super::{Candidate, DispatchingRule, RuleScore, SchedulingContext};

/// Longest absence first.
///
/// Score is `last_aired - slot_time` in seconds: the further back the last
/// airing, the lower the score. Shows that never aired score `i64::MIN`.
#[derive(Debug, Clone, Copy)]
pub struct Recency;

impl DispatchingRule for Recency {
    fn name(&self) -> &'static str {
        "RECENCY"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, context: &SchedulingContext) -> RuleScore {
        context.distance_seconds(candidate.last_aired)
    }

    fn description(&self) -> &'static str {
        "Longest Absence First"
    }
}

/// Show priority (lower number first).
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SchedulingContext) -> RuleScore {
        RuleScore::from(candidate.show.priority)
    }

    fn description(&self) -> &'static str {
        "Show Priority"
    }
}
