//! Range clearing.
//!
//! Reverts committed days: every assigned episode goes back to its show's
//! queue in sorted position and the day leaves the store. Consumed special
//! days are not returned to the pending set.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::Scheduler;
use crate::error::{Result, ScheduleError};
use crate::models::{DayKind, Episode};

/// What a [`Scheduler::clear_range`] call removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearSummary {
    /// Calendar days deleted from the store.
    pub days_removed: usize,
    /// Episodes returned to their shows.
    pub episodes_restored: usize,
    /// Special days among the removed days (not re-pended).
    pub special_days_dropped: usize,
}

impl Scheduler {
    /// Clears `[start, end]`, `end` defaulting to the latest committed date.
    ///
    /// A range outside the store (or an empty store) is a no-op. The
    /// last-aired cache is invalidated unconditionally. Every affected
    /// show is checked before anything is mutated, so an unknown show
    /// leaves the store untouched.
    pub fn clear_range(&mut self, start: NaiveDate, end: Option<NaiveDate>) -> Result<ClearSummary> {
        self.cache.invalidate();

        let (Some(earliest), Some(latest)) =
            (self.calendar.earliest_date(), self.calendar.latest_date())
        else {
            return Ok(ClearSummary::default());
        };
        let start = start.max(earliest);
        let end = end.unwrap_or(latest).min(latest);
        if start > end {
            debug!(start = %start, end = %end, "clear range outside the calendar");
            return Ok(ClearSummary::default());
        }

        for day in self.calendar.days_between(start, end) {
            if let Some(orphan) = day.episodes().find(|ep| self.show(&ep.show).is_none()) {
                return Err(ScheduleError::UnknownShow(orphan.show.clone()));
            }
        }

        let dates: Vec<NaiveDate> = self
            .calendar
            .days_between(start, end)
            .map(|day| day.date)
            .collect();

        let mut summary = ClearSummary::default();
        for date in dates {
            let Some(mut day) = self.calendar.remove(date) else {
                continue;
            };
            for slot in day.slots_mut() {
                if let Some(episode) = slot.clear() {
                    self.restore_episode(episode)?;
                    summary.episodes_restored += 1;
                }
            }
            if day.kind == DayKind::Special {
                summary.special_days_dropped += 1;
            }
            summary.days_removed += 1;
        }

        info!(
            start = %start,
            end = %end,
            days = summary.days_removed,
            episodes = summary.episodes_restored,
            "cleared calendar range"
        );
        Ok(summary)
    }

    /// Returns an episode to its show, reactivating a finished show.
    pub(super) fn restore_episode(&mut self, episode: Episode) -> Result<()> {
        if let Some(entry) = self.active.iter_mut().find(|e| e.show.id == episode.show) {
            return entry.show.restore(episode);
        }

        let Some(position) = self.finished.iter().position(|e| e.show.id == episode.show) else {
            return Err(ScheduleError::UnknownShow(episode.show));
        };
        let mut entry = self.finished.remove(position);
        if let Err(err) = entry.show.restore(episode) {
            self.finished.insert(position, entry);
            return Err(err);
        }
        debug!(show = %entry.show.id, "finished show reactivated");
        self.insert_active(entry);
        Ok(())
    }
}
