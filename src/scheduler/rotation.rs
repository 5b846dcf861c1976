//! Rotation scheduler.
//!
//! # Algorithm
//!
//! 1. Advance a date cursor one day at a time from the request start.
//! 2. Resolve the day: reuse a committed day, else materialize a pending
//!    special day, else generate a default day.
//! 3. For each open slot, rank every eligible show with the rule engine
//!    (longest absence, then priority) and assign the winner's head episode.
//! 4. Commit the day and continue until the end date, an unfillable slot,
//!    or (if requested) an exhausted show winning a slot.
//! 5. Retire shows whose queues emptied during the run.
//!
//! # Complexity
//! O(d * s * n log n) where d=days, s=slots/day, n=active shows.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::cache::LastAiredCache;
use crate::config::SchedulerConfig;
use crate::dispatching::{Candidate, Offer, RuleEngine, SchedulingContext};
use crate::error::{Result, ScheduleError};
use crate::models::{CalendarDay, CalendarStore, Episode, Show, ShowId, SpecialDay};
use crate::validation::validate_catalog;

/// Parameters of one scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    /// First date to process.
    pub start: NaiveDate,
    /// Last date to process (inclusive). `None` = until the run halts.
    pub end: Option<NaiveDate>,
    /// Halt when an exhausted show wins a slot. `None` = config default.
    pub stop_at_first_exhausted_show: Option<bool>,
}

impl RunRequest {
    /// Creates an open-ended run from `start`.
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            end: None,
            stop_at_first_exhausted_show: None,
        }
    }

    /// Sets the inclusive end date.
    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Overrides the exhaustion-halt flag.
    pub fn with_stop_at_first_exhausted_show(mut self, stop: bool) -> Self {
        self.stop_at_first_exhausted_show = Some(stop);
        self
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The cursor passed the requested end date.
    EndReached,
    /// A slot had no eligible show. The day was not committed.
    NoCandidates,
    /// An exhausted show won a slot and the run opted to halt.
    /// The partially filled day was committed.
    ExhaustedShow,
}

/// Result of a scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Last date processed: the end date, the day before an unfillable
    /// day, or the day an exhausted show halted the run.
    pub stopped_at: NaiveDate,
    /// Why the run stopped.
    pub reason: StopReason,
    /// Episodes assigned during this run.
    pub assigned: usize,
    /// Days committed during this run (including reused days).
    pub days_committed: usize,
}

/// A registered show with its registration sequence number.
#[derive(Debug, Clone)]
pub(super) struct ShowEntry {
    pub(super) seq: u64,
    pub(super) show: Show,
}

impl ShowEntry {
    /// Pops the head episode for a slot this show won.
    fn take_head(&mut self, time: NaiveDateTime) -> Result<Episode> {
        self.show.pop_front().ok_or_else(|| {
            ScheduleError::Invariant(format!(
                "show '{}' won slot {time} with an empty queue",
                self.show.id
            ))
        })
    }
}

enum DayOrigin {
    Stored,
    Special(SpecialDay),
    Generated,
}

enum DayFill {
    Complete,
    Exhausted,
    NoCandidates,
}

enum Pick {
    Show(usize),
    Exhausted,
    Nothing,
}

/// Rotation scheduler: owns the shows, pending special days, the calendar
/// store, and the last-aired cache.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_rotation::models::Show;
/// use u_rotation::scheduler::{RunRequest, Scheduler, StopReason};
/// use u_rotation::SchedulerConfig;
///
/// let mut scheduler = Scheduler::new(SchedulerConfig::default());
/// scheduler.register_show(Show::new("A").with_priority(1).with_episodes(1, 2, None)).unwrap();
/// scheduler.register_show(Show::new("B").with_priority(2).with_episodes(1, 2, None)).unwrap();
///
/// let monday = NaiveDate::from_ymd_opt(2025, 8, 11).unwrap();
/// let request = RunRequest::new(monday).with_stop_at_first_exhausted_show(false);
/// let outcome = scheduler.generate(&request).unwrap();
///
/// assert_eq!(outcome.reason, StopReason::NoCandidates);
/// assert_eq!(outcome.assigned, 4);
/// assert_eq!(scheduler.calendar().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    rule_engine: RuleEngine,
    pub(super) active: Vec<ShowEntry>,
    pub(super) finished: Vec<ShowEntry>,
    special_days: BTreeMap<NaiveDate, SpecialDay>,
    pub(super) calendar: CalendarStore,
    pub(super) cache: LastAiredCache,
    next_seq: u64,
}

impl Scheduler {
    /// Creates a scheduler with the rotation ranking.
    pub fn new(config: SchedulerConfig) -> Self {
        let rule_engine = RuleEngine::rotation().with_final_tie_breaker(config.tie_breaker);
        Self {
            config,
            rule_engine,
            active: Vec::new(),
            finished: Vec::new(),
            special_days: BTreeMap::new(),
            calendar: CalendarStore::new(),
            cache: LastAiredCache::new(),
            next_seq: 0,
        }
    }

    /// Validates a catalog and registers all of it.
    pub fn from_catalog(
        config: SchedulerConfig,
        shows: Vec<Show>,
        special_days: Vec<SpecialDay>,
    ) -> Result<Self> {
        config.validate()?;
        validate_catalog(&shows, &special_days).map_err(ScheduleError::InvalidCatalog)?;

        let mut scheduler = Self::new(config);
        for show in shows {
            scheduler.register_show(show)?;
        }
        for day in special_days {
            scheduler.register_special_day(day);
        }
        Ok(scheduler)
    }

    /// Replaces the ranking engine.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Registers a show. Names must be unique across active and finished
    /// shows, and the queue must be sorted and hold only the show's own
    /// episodes (deserialized shows can break both).
    pub fn register_show(&mut self, show: Show) -> Result<()> {
        if self.show(&show.id).is_some() {
            return Err(ScheduleError::DuplicateShow(show.id));
        }
        validate_catalog(std::slice::from_ref(&show), &[]).map_err(ScheduleError::InvalidCatalog)?;
        debug!(show = %show.id, priority = show.priority, episodes = show.len(), "registered show");
        let entry = ShowEntry {
            seq: self.next_seq,
            show,
        };
        self.next_seq += 1;
        self.insert_active(entry);
        Ok(())
    }

    /// Registers a special day, returning any authoring it replaces.
    pub fn register_special_day(&mut self, day: SpecialDay) -> Option<SpecialDay> {
        if self.calendar.contains(day.date) {
            warn!(date = %day.date, "special day registered for an already committed date");
        }
        let date = day.date;
        let replaced = self.special_days.insert(date, day);
        if replaced.is_some() {
            warn!(date = %date, "special day replaced an earlier registration");
        }
        replaced
    }

    /// Runs the scheduler over the requested range.
    pub fn generate(&mut self, request: &RunRequest) -> Result<RunOutcome> {
        let stop_on_exhausted = request
            .stop_at_first_exhausted_show
            .unwrap_or(self.config.stop_at_first_exhausted_show);
        info!(
            start = %request.start,
            end = ?request.end,
            stop_on_exhausted,
            shows = self.active.len(),
            "starting rotation run"
        );

        self.warm_cache();

        let mut assigned = 0;
        let mut days_committed = 0;
        let mut cursor = request.start;
        let (stopped_at, reason) = loop {
            if request.end.is_some_and(|end| cursor > end) {
                break (previous_day(cursor)?, StopReason::EndReached);
            }

            let (mut day, origin) = self.resolve_day(cursor);
            let mut filled = Vec::new();
            let fill = self.fill_day(&mut day, stop_on_exhausted, &mut filled)?;
            match fill {
                DayFill::Complete => {
                    assigned += filled.len();
                    days_committed += 1;
                    self.commit(day, &origin);
                }
                DayFill::Exhausted => {
                    assigned += filled.len();
                    days_committed += 1;
                    self.commit(day, &origin);
                    break (cursor, StopReason::ExhaustedShow);
                }
                DayFill::NoCandidates => {
                    self.discard(day, origin, &filled)?;
                    break (previous_day(cursor)?, StopReason::NoCandidates);
                }
            }

            cursor = cursor
                .succ_opt()
                .ok_or(ScheduleError::DateOverflow(cursor))?;
        };

        self.retire_exhausted_shows();
        info!(
            stopped_at = %stopped_at,
            reason = ?reason,
            assigned,
            days_committed,
            "rotation run finished"
        );
        Ok(RunOutcome {
            stopped_at,
            reason,
            assigned,
            days_committed,
        })
    }

    /// Most recent airing of a show, `None` if it never aired.
    pub fn last_aired(&mut self, show: &ShowId) -> Result<Option<NaiveDateTime>> {
        if self.show(show).is_none() {
            return Err(ScheduleError::UnknownShow(show.clone()));
        }
        Ok(self.cache.lookup(show, &self.calendar))
    }

    /// Drops all memoized last-aired times.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Ranking engine in use.
    pub fn rule_engine(&self) -> &RuleEngine {
        &self.rule_engine
    }

    /// Committed calendar.
    pub fn calendar(&self) -> &CalendarStore {
        &self.calendar
    }

    /// Committed days within `[start, end]`.
    pub fn days_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl DoubleEndedIterator<Item = &CalendarDay> {
        self.calendar.days_between(start, end)
    }

    /// Shows still in rotation, in priority order.
    pub fn shows(&self) -> impl Iterator<Item = &Show> {
        self.active.iter().map(|entry| &entry.show)
    }

    /// Shows retired with empty queues.
    pub fn finished_shows(&self) -> impl Iterator<Item = &Show> {
        self.finished.iter().map(|entry| &entry.show)
    }

    /// Active then finished shows.
    pub fn all_shows(&self) -> impl Iterator<Item = &Show> {
        self.shows().chain(self.finished_shows())
    }

    /// Looks up a show by id, active or finished.
    pub fn show(&self, id: &ShowId) -> Option<&Show> {
        self.all_shows().find(|show| &show.id == id)
    }

    /// Special days not yet materialized, by date.
    pub fn pending_special_days(&self) -> impl Iterator<Item = &SpecialDay> {
        self.special_days.values()
    }

    /// Unscheduled episodes of active shows, show by show in queue order.
    pub fn remaining_episodes(&self) -> impl Iterator<Item = &Episode> {
        self.shows().flat_map(Show::episodes)
    }

    /// Inserts by (priority, registration order).
    pub(super) fn insert_active(&mut self, entry: ShowEntry) {
        let key = (entry.show.priority, entry.seq);
        let position = self
            .active
            .partition_point(|queued| (queued.show.priority, queued.seq) <= key);
        self.active.insert(position, entry);
    }

    // Every active show gets a cache entry while all committed days are
    // still in the store; resolve_day takes days out while filling them.
    fn warm_cache(&mut self) {
        for entry in &self.active {
            self.cache.lookup(&entry.show.id, &self.calendar);
        }
    }

    fn resolve_day(&mut self, date: NaiveDate) -> (CalendarDay, DayOrigin) {
        if let Some(day) = self.calendar.remove(date) {
            trace!(date = %date, "reusing committed day");
            return (day, DayOrigin::Stored);
        }
        if let Some(special) = self.special_days.remove(&date) {
            let day = special.materialize(&self.config.day_pattern);
            return (day, DayOrigin::Special(special));
        }
        (
            CalendarDay::generated(date, &self.config.day_pattern),
            DayOrigin::Generated,
        )
    }

    fn fill_day(
        &mut self,
        day: &mut CalendarDay,
        stop_on_exhausted: bool,
        filled: &mut Vec<usize>,
    ) -> Result<DayFill> {
        let open: Vec<(usize, NaiveDateTime)> = day
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_assigned())
            .map(|(index, slot)| (index, slot.time))
            .collect();

        for (index, time) in open {
            let position = match self.pick(time, stop_on_exhausted) {
                Pick::Show(position) => position,
                Pick::Exhausted => return Ok(DayFill::Exhausted),
                Pick::Nothing => return Ok(DayFill::NoCandidates),
            };
            let (Some(slot), Some(entry)) = (day.slot_mut(index), self.active.get_mut(position))
            else {
                return Err(ScheduleError::Invariant(format!(
                    "slot {index} or show position {position} vanished while filling {}",
                    day.date
                )));
            };
            let episode = entry.take_head(time)?;
            let show = episode.show.clone();
            debug!(show = %show, episode = %episode.label, slot = %time, "assigned episode");
            slot.assign(episode)?;
            self.cache.record(&show, time);
            filled.push(index);
        }
        Ok(DayFill::Complete)
    }

    fn pick(&mut self, time: NaiveDateTime, stop_on_exhausted: bool) -> Pick {
        let context = SchedulingContext::at_slot(time);
        let mut candidates = Vec::with_capacity(self.active.len());
        let mut positions = Vec::with_capacity(self.active.len());

        for (position, entry) in self.active.iter().enumerate() {
            let offer = match entry.show.head() {
                Some(episode) if episode.is_available(time) => Offer::Episode(episode),
                Some(_) => continue,
                None if stop_on_exhausted => Offer::Exhausted,
                None => continue,
            };
            let last_aired = self.cache.lookup(&entry.show.id, &self.calendar);
            candidates.push(Candidate {
                show: &entry.show,
                last_aired,
                offer,
            });
            positions.push(position);
        }

        trace!(slot = %time, candidates = candidates.len(), "ranking candidates");
        match self.rule_engine.select_best(&candidates, &context) {
            None => Pick::Nothing,
            Some(best) if candidates[best].is_exhausted() => Pick::Exhausted,
            Some(best) => Pick::Show(positions[best]),
        }
    }

    fn commit(&mut self, day: CalendarDay, origin: &DayOrigin) {
        if matches!(origin, DayOrigin::Special(_)) {
            debug!(date = %day.date, notes = day.notes.len(), "materialized special day");
        }
        self.calendar.insert(day);
    }

    // Undo this run's assignments on a day that cannot be completed.
    fn discard(&mut self, mut day: CalendarDay, origin: DayOrigin, filled: &[usize]) -> Result<()> {
        for &index in filled {
            if let Some(episode) = day.slot_mut(index).and_then(|slot| slot.clear()) {
                self.restore_episode(episode)?;
            }
        }
        if !filled.is_empty() {
            self.cache.invalidate();
        }
        debug!(date = %day.date, rolled_back = filled.len(), "discarded unfillable day");

        match origin {
            DayOrigin::Stored => {
                self.calendar.insert(day);
            }
            DayOrigin::Special(special) => {
                self.special_days.insert(special.date, special);
            }
            DayOrigin::Generated => {}
        }
        Ok(())
    }

    fn retire_exhausted_shows(&mut self) {
        let (exhausted, active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|entry| entry.show.is_exhausted());
        self.active = active;
        for entry in exhausted {
            info!(show = %entry.show.id, "show exhausted, retired from rotation");
            self.finished.push(entry);
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

fn previous_day(date: NaiveDate) -> Result<NaiveDate> {
    date.pred_opt().ok_or(ScheduleError::DateOverflow(date))
}
