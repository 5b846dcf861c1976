//! Calendar store.
//!
//! Maps each committed date to its [`CalendarDay`]. Keys are kept ordered,
//! so the earliest and latest dates are always at hand and backward scans
//! walk dates from latest to earliest.
//!
//! # Week Boundaries
//! Renderers lay the calendar out in Sunday-to-Saturday weeks:
//! [`earliest_sunday`](CalendarStore::earliest_sunday) is the Sunday on or
//! before the earliest date, [`latest_saturday`](CalendarStore::latest_saturday)
//! the Saturday on or after the latest date.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{CalendarDay, ShowId};

/// Committed calendar days keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarStore {
    days: BTreeMap<NaiveDate, CalendarDay>,
}

impl CalendarStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Day for a date, if committed.
    pub fn get(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.get(&date)
    }

    /// Whether a date is committed.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Commits a day, replacing any day already stored for its date.
    pub fn insert(&mut self, day: CalendarDay) -> Option<CalendarDay> {
        self.days.insert(day.date, day)
    }

    /// Removes and returns the day for a date.
    pub fn remove(&mut self, date: NaiveDate) -> Option<CalendarDay> {
        self.days.remove(&date)
    }

    /// Number of committed days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no day is committed.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Earliest committed date.
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Latest committed date.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// Sunday on or before the earliest date.
    pub fn earliest_sunday(&self) -> Option<NaiveDate> {
        let earliest = self.earliest_date()?;
        let back = i64::from(earliest.weekday().num_days_from_sunday());
        earliest.checked_sub_signed(Duration::days(back))
    }

    /// Saturday on or after the latest date.
    pub fn latest_saturday(&self) -> Option<NaiveDate> {
        let latest = self.latest_date()?;
        let ahead = 6 - i64::from(latest.weekday().num_days_from_sunday());
        latest.checked_add_signed(Duration::days(ahead))
    }

    /// Committed days within `[start, end]`, in date order.
    ///
    /// Empty when `end < start`.
    pub fn days_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl DoubleEndedIterator<Item = &CalendarDay> {
        let range = if start <= end {
            Some(RangeInclusive::new(start, end))
        } else {
            None
        };
        range
            .into_iter()
            .flat_map(move |range| self.days.range(range).map(|(_, day)| day))
    }

    /// All committed days in date order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CalendarDay> {
        self.days.values()
    }

    /// Most recent slot time holding an episode of `show`.
    ///
    /// Scans from the latest date backward, latest slot first within a day.
    pub fn last_aired(&self, show: &ShowId) -> Option<NaiveDateTime> {
        self.days.values().rev().find_map(|day| {
            day.slots()
                .iter()
                .rev()
                .find(|slot| slot.episode().is_some_and(|ep| &ep.show == show))
                .map(|slot| slot.time)
        })
    }
}
