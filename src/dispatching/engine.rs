//! Rule engine for ranking slot candidates.
//!
//! Applies rules in sequence, consulting the next rule only on ties, and
//! finishes with a configurable [`TieBreaker`].

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{rules, Candidate, DispatchingRule, RuleScore, SchedulingContext};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreaker {
    /// Keep the input order (show registration order).
    #[default]
    RegistrationOrder,
    /// Deterministic by show name (lexicographic).
    ByName,
}

/// A composable rule engine for candidate ranking.
///
/// # Example
/// ```
/// use u_rotation::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Recency)
///     .with_tie_breaker(rules::Priority);
/// assert_eq!(engine.rule_names(), vec!["RECENCY", "PRIORITY"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::RegistrationOrder,
        }
    }

    /// The rotation ranking: longest absence, then priority.
    pub fn rotation() -> Self {
        Self::new()
            .with_rule(rules::Recency)
            .with_tie_breaker(rules::Priority)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a rule consulted only when all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Sorts candidates best first.
    ///
    /// Returns indices into the input slice. The sort is stable, so with
    /// [`TieBreaker::RegistrationOrder`] full ties keep input order.
    pub fn sort_indices(&self, candidates: &[Candidate<'_>], context: &SchedulingContext) -> Vec<usize> {
        let scores: Vec<Vec<RuleScore>> = candidates
            .iter()
            .map(|candidate| self.evaluate(candidate, context))
            .collect();

        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| {
            scores[a]
                .cmp(&scores[b])
                .then_with(|| self.break_tie(&candidates[a], &candidates[b]))
        });
        indices
    }

    /// Index of the best candidate.
    pub fn select_best(&self, candidates: &[Candidate<'_>], context: &SchedulingContext) -> Option<usize> {
        self.sort_indices(candidates, context).first().copied()
    }

    /// Scores from each rule, in evaluation order.
    pub fn evaluate(&self, candidate: &Candidate<'_>, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(candidate, context))
            .collect()
    }

    fn break_tie(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        match self.tie_breaker {
            TieBreaker::RegistrationOrder => Ordering::Equal,
            TieBreaker::ByName => a.show.id.cmp(&b.show.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::rotation()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
