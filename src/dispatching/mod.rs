//! Dispatching rules and rule engine for slot filling.
//!
//! For each open slot the scheduler gathers one [`Candidate`] per eligible
//! show and asks a [`RuleEngine`] to rank them. The canonical ranking is
//! [`RuleEngine::rotation`]: longest-absent show first, lower priority
//! number on ties.
//!
//! # Usage
//!
//! ```
//! use u_rotation::dispatching::{rules, RuleEngine, TieBreaker};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Recency)
//!     .with_tie_breaker(rules::Priority)
//!     .with_final_tie_breaker(TieBreaker::ByName);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use chrono::NaiveDateTime;
use std::fmt::Debug;

use crate::models::{Episode, Show};

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (chosen first).
pub type RuleScore = i64;

/// What a show offers for a slot.
///
/// `Exhausted` is a sentinel for a show whose queue is empty. It can win the
/// ranking (which halts a run that opted in) but is never assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offer<'a> {
    /// The show's head episode, available at the slot.
    Episode(&'a Episode),
    /// The show has nothing left.
    Exhausted,
}

/// A show competing for one slot.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The competing show.
    pub show: &'a Show,
    /// When the show last aired, `None` if never.
    pub last_aired: Option<NaiveDateTime>,
    /// What it would put in the slot.
    pub offer: Offer<'a>,
}

impl Candidate<'_> {
    /// Whether this is an exhausted placeholder.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.offer, Offer::Exhausted)
    }
}

/// A rule that scores a candidate for a slot.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "RECENCY").
    fn name(&self) -> &'static str;

    /// Scores a candidate; lower wins.
    fn evaluate(&self, candidate: &Candidate<'_>, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
