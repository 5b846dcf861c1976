//! Episode availability predicates.
//!
//! A predicate decides whether an episode may air at a candidate slot
//! timestamp. Predicates are a closed set of variants evaluated by
//! [`Availability::permits`]; they carry no captured state and have no
//! side effects.
//!
//! # Composition
//! An episode is available at a timestamp iff **every** predicate in its
//! list permits it. An empty list is always available.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// A single availability rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// No restriction.
    Always,
    /// Slot timestamp must be at or after the given instant.
    NotBefore(NaiveDateTime),
    /// Slot must fall on one of the listed weekdays.
    OnWeekdays(Vec<Weekday>),
}

impl Availability {
    /// Restricts to the given weekdays.
    pub fn on_weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self::OnWeekdays(days.into_iter().collect())
    }

    /// Restricts to Friday slots.
    pub fn fridays() -> Self {
        Self::OnWeekdays(vec![Weekday::Fri])
    }

    /// Restricts to Saturday slots.
    pub fn saturdays() -> Self {
        Self::OnWeekdays(vec![Weekday::Sat])
    }

    /// Whether this rule accepts the slot timestamp.
    pub fn permits(&self, slot: NaiveDateTime) -> bool {
        match self {
            Self::Always => true,
            Self::NotBefore(release) => slot >= *release,
            Self::OnWeekdays(days) => days.contains(&slot.weekday()),
        }
    }
}

/// Conjunction over a predicate list. Empty = always available.
pub fn all_permit(rules: &[Availability], slot: NaiveDateTime) -> bool {
    rules.iter().all(|rule| rule.permits(slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_always() {
        assert!(Availability::Always.permits(at(2025, 8, 13, 18)));
    }

    #[test]
    fn test_not_before_is_inclusive() {
        let release = at(2025, 8, 10, 21);
        let rule = Availability::NotBefore(release);
        assert!(!rule.permits(at(2025, 8, 10, 18)));
        assert!(rule.permits(release)); // exactly at release
        assert!(rule.permits(at(2025, 8, 11, 18)));
    }

    #[test]
    fn test_weekday_restriction() {
        // 2025-08-15 is a Friday, 2025-08-16 a Saturday
        assert!(Availability::fridays().permits(at(2025, 8, 15, 18)));
        assert!(!Availability::fridays().permits(at(2025, 8, 16, 18)));
        assert!(Availability::saturdays().permits(at(2025, 8, 16, 12)));

        let weekend = Availability::on_weekdays([Weekday::Sat, Weekday::Sun]);
        assert!(weekend.permits(at(2025, 8, 17, 12)));
        assert!(!weekend.permits(at(2025, 8, 18, 18)));
    }

    #[test]
    fn test_conjunction() {
        let rules = vec![
            Availability::NotBefore(at(2025, 8, 14, 0)),
            Availability::fridays(),
        ];
        assert!(!all_permit(&rules, at(2025, 8, 8, 18))); // Friday, too early
        assert!(!all_permit(&rules, at(2025, 8, 14, 18))); // released, Thursday
        assert!(all_permit(&rules, at(2025, 8, 15, 18)));
        assert!(all_permit(&[], at(1970, 1, 1, 0)));
    }
}
