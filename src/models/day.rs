//! Slots and calendar days.
//!
//! A [`CalendarDay`] is a date with an ordered list of [`Slot`]s and
//! free-text notes. Days come in two flavours:
//!
//! - **Default**: generated from a [`DayPattern`] (dinner every day, lunch
//!   on the pattern's lunch days).
//! - **Special**: authored ahead of time as a [`SpecialDay`] and
//!   materialized once, the first time the scheduler reaches its date.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::Episode;
use crate::error::{Result, ScheduleError};

/// Slot times used for generated days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPattern {
    /// Lunch slot time.
    pub lunch: NaiveTime,
    /// Dinner slot time (present on every default day).
    pub dinner: NaiveTime,
    /// Weekdays that also get a lunch slot.
    pub lunch_days: Vec<Weekday>,
}

impl Default for DayPattern {
    fn default() -> Self {
        Self {
            lunch: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
            dinner: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            lunch_days: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl DayPattern {
    /// Whether the date gets a lunch slot.
    pub fn has_lunch(&self, date: NaiveDate) -> bool {
        self.lunch_days.contains(&date.weekday())
    }
}

/// One bookable timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Air time.
    pub time: NaiveDateTime,
    episode: Option<Episode>,
}

impl Slot {
    /// Creates an open slot.
    pub fn open(time: NaiveDateTime) -> Self {
        Self { time, episode: None }
    }

    /// Assigned episode, if any.
    pub fn episode(&self) -> Option<&Episode> {
        self.episode.as_ref()
    }

    /// Whether an episode is assigned.
    pub fn is_assigned(&self) -> bool {
        self.episode.is_some()
    }

    /// Assigns an episode. A filled slot must be cleared first.
    pub fn assign(&mut self, episode: Episode) -> Result<()> {
        if self.episode.is_some() {
            return Err(ScheduleError::SlotOccupied(self.time));
        }
        self.episode = Some(episode);
        Ok(())
    }

    /// Removes and returns the assigned episode.
    pub fn clear(&mut self) -> Option<Episode> {
        self.episode.take()
    }
}

/// How a calendar day was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayKind {
    /// Generated from the day pattern.
    Default,
    /// Materialized from a [`SpecialDay`].
    Special,
}

/// A date's slots and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date.
    pub date: NaiveDate,
    /// Origin of this day.
    pub kind: DayKind,
    /// Free-text notes.
    pub notes: Vec<String>,
    slots: Vec<Slot>,
}

impl CalendarDay {
    /// Builds a default day: lunch on lunch days, dinner always.
    pub fn generated(date: NaiveDate, pattern: &DayPattern) -> Self {
        let mut day = Self {
            date,
            kind: DayKind::Default,
            notes: Vec::new(),
            slots: Vec::new(),
        };
        if pattern.has_lunch(date) {
            day.add_slot(pattern.lunch);
        }
        day.add_slot(pattern.dinner);
        day
    }

    /// Slots in time order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Mutable slot access by index.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// Mutable iteration over all slots.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots.iter_mut()
    }

    /// Adds an open slot at the given time of day, keeping time order.
    pub fn add_slot(&mut self, time: NaiveTime) {
        let at = self.date.and_time(time);
        let position = self.slots.partition_point(|slot| slot.time <= at);
        self.slots.insert(position, Slot::open(at));
    }

    /// Episodes assigned on this day, in slot order.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.slots.iter().filter_map(Slot::episode)
    }

    /// Number of slots without an episode.
    pub fn open_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_assigned()).count()
    }
}

/// Slot time authored on a special day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotTime {
    /// The pattern's lunch time.
    Lunch,
    /// The pattern's dinner time.
    Dinner,
    /// An explicit time of day.
    At(NaiveTime),
}

impl SlotTime {
    /// Resolves against a day pattern.
    pub fn resolve(self, pattern: &DayPattern) -> NaiveTime {
        match self {
            Self::Lunch => pattern.lunch,
            Self::Dinner => pattern.dinner,
            Self::At(time) => time,
        }
    }
}

/// A manually authored day that overrides the default pattern.
///
/// A special day with no slots blocks scheduling on its date entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDay {
    /// The date this authoring applies to.
    pub date: NaiveDate,
    /// Slots to create.
    pub slots: Vec<SlotTime>,
    /// Notes carried onto the calendar day verbatim.
    pub notes: Vec<String>,
}

impl SpecialDay {
    /// Creates a special day with no slots and no notes.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slots: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Adds a lunch slot.
    pub fn with_lunch_slot(self) -> Self {
        self.with_slot(SlotTime::Lunch)
    }

    /// Adds a dinner slot.
    pub fn with_dinner_slot(self) -> Self {
        self.with_slot(SlotTime::Dinner)
    }

    /// Adds a slot.
    pub fn with_slot(mut self, slot: SlotTime) -> Self {
        self.slots.push(slot);
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Builds the calendar day for this authoring.
    pub fn materialize(&self, pattern: &DayPattern) -> CalendarDay {
        let mut day = CalendarDay {
            date: self.date,
            kind: DayKind::Special,
            notes: self.notes.clone(),
            slots: Vec::with_capacity(self.slots.len()),
        };
        for slot in &self.slots {
            day.add_slot(slot.resolve(pattern));
        }
        day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn hour(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_default_weekday_has_dinner_only() {
        // 2025-08-13 is a Wednesday
        let day = CalendarDay::generated(date(8, 13), &DayPattern::default());
        assert_eq!(day.kind, DayKind::Default);
        assert_eq!(day.slots().len(), 1);
        assert_eq!(day.slots()[0].time, date(8, 13).and_time(hour(18)));
        assert!(day.notes.is_empty());
    }

    #[test]
    fn test_default_weekend_has_lunch_and_dinner() {
        let pattern = DayPattern::default();
        for d in [date(8, 16), date(8, 17)] {
            let day = CalendarDay::generated(d, &pattern);
            let times: Vec<_> = day.slots().iter().map(|s| s.time.time()).collect();
            assert_eq!(times, vec![hour(12), hour(18)]);
        }
    }

    #[test]
    fn test_slot_assign_requires_clear() {
        let mut slot = Slot::open(date(8, 13).and_time(hour(18)));
        slot.assign(Episode::numbered("A", 1)).unwrap();

        let err = slot.assign(Episode::numbered("B", 1)).unwrap_err();
        assert!(matches!(err, ScheduleError::SlotOccupied(_)));
        assert_eq!(slot.episode().unwrap().show.as_str(), "A");

        let cleared = slot.clear().unwrap();
        assert_eq!(cleared.show.as_str(), "A");
        assert!(!slot.is_assigned());
        slot.assign(Episode::numbered("B", 1)).unwrap();
    }

    #[test]
    fn test_special_day_materialize() {
        let special = SpecialDay::new(date(8, 24))
            .with_dinner_slot()
            .with_lunch_slot()
            .with_note("start AppleTV+ trial on prime");
        let day = special.materialize(&DayPattern::default());

        assert_eq!(day.kind, DayKind::Special);
        let times: Vec<_> = day.slots().iter().map(|s| s.time.time()).collect();
        assert_eq!(times, vec![hour(12), hour(18)]); // time-ordered
        assert_eq!(day.notes, vec!["start AppleTV+ trial on prime".to_string()]);
    }

    #[test]
    fn test_special_day_without_slots() {
        let day = SpecialDay::new(date(9, 30))
            .with_note("HAMILTON")
            .materialize(&DayPattern::default());
        assert!(day.slots().is_empty());
        assert_eq!(day.open_slot_count(), 0);
        assert_eq!(day.notes, vec!["HAMILTON".to_string()]);
    }

    #[test]
    fn test_custom_pattern_and_explicit_slot() {
        let pattern = DayPattern {
            lunch: hour(13),
            dinner: hour(20),
            lunch_days: vec![Weekday::Wed],
        };
        let day = CalendarDay::generated(date(8, 13), &pattern);
        let times: Vec<_> = day.slots().iter().map(|s| s.time.time()).collect();
        assert_eq!(times, vec![hour(13), hour(20)]);

        let special = SpecialDay::new(date(8, 14))
            .with_slot(SlotTime::At(hour(9)))
            .with_dinner_slot()
            .materialize(&pattern);
        let times: Vec<_> = special.slots().iter().map(|s| s.time.time()).collect();
        assert_eq!(times, vec![hour(9), hour(20)]);
    }
}
