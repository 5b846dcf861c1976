//! Show model.
//!
//! A show is a priority-ranked queue of not-yet-scheduled episodes. The
//! queue is always sorted ascending by episode order; the scheduler pops
//! from the front only, and restitution re-inserts in sorted position.

use std::collections::VecDeque;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Episode, ShowId};
use crate::error::{Result, ScheduleError};

/// A show and its pending episode queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    /// Unique identity (the show name).
    pub id: ShowId,
    /// Ranking priority. Lower = wins ties.
    pub priority: i32,
    /// Display colour/category tag for renderers.
    pub color: Option<i32>,
    queue: VecDeque<Episode>,
}

impl Show {
    /// Creates a show with an empty queue and priority 0.
    pub fn new(name: impl Into<ShowId>) -> Self {
        Self {
            id: name.into(),
            priority: 0,
            color: None,
            queue: VecDeque::new(),
        }
    }

    /// Show name.
    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the display colour.
    pub fn with_color(mut self, color: i32) -> Self {
        self.color = Some(color);
        self
    }

    /// Adds an episode, adopting it into this show.
    pub fn with_episode(mut self, mut episode: Episode) -> Self {
        episode.show = self.id.clone();
        self.insert_sorted(episode);
        self
    }

    /// Adds numbered episodes `start..=end`, all released at `available_at`
    /// (if given), and marks the last one final.
    pub fn with_episodes(mut self, start: i64, end: i64, available_at: Option<NaiveDateTime>) -> Self {
        for number in start..=end {
            let episode = Episode::numbered(self.id.clone(), number).with_release_opt(available_at);
            self.insert_sorted(episode);
        }
        self.finalize_last_episode()
    }

    /// Adds numbered episodes `start..=end` released one week apart,
    /// beginning at `first_release`, and marks the last one final.
    pub fn with_weekly_episodes(mut self, first_release: NaiveDateTime, start: i64, end: i64) -> Self {
        for number in start..=end {
            let release = first_release + Duration::days(7 * (number - start));
            let episode = Episode::numbered(self.id.clone(), number).with_release(release);
            self.insert_sorted(episode);
        }
        self.finalize_last_episode()
    }

    /// Marks the last queued episode final.
    pub fn finalize_last_episode(mut self) -> Self {
        if let Some(last) = self.queue.back_mut() {
            last.mark_final();
        }
        self
    }

    /// Next episode to air.
    pub fn head(&self) -> Option<&Episode> {
        self.queue.front()
    }

    /// Removes and returns the next episode.
    pub fn pop_front(&mut self) -> Option<Episode> {
        self.queue.pop_front()
    }

    /// Returns an episode to the queue at its sorted position.
    ///
    /// Fails if the episode belongs to another show.
    pub fn restore(&mut self, episode: Episode) -> Result<()> {
        if episode.show != self.id {
            return Err(ScheduleError::ForeignEpisode {
                episode: episode.label,
                owner: episode.show,
                target: self.id.clone(),
            });
        }
        self.insert_sorted(episode);
        Ok(())
    }

    /// Whether the queue is empty.
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued episodes.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued episodes in airing order.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.queue.iter()
    }

    /// Whether the queue is in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.queue
            .iter()
            .zip(self.queue.iter().skip(1))
            .all(|(a, b)| a.order <= b.order)
    }

    // Insert after any equal keys, keeping earlier arrivals first.
    fn insert_sorted(&mut self, episode: Episode) {
        let position = self.queue.partition_point(|queued| queued.order <= episode.order);
        self.queue.insert(position, episode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn orders(show: &Show) -> Vec<i64> {
        show.episodes().map(|e| e.order).collect()
    }

    #[test]
    fn test_show_builder() {
        let show = Show::new("The Night Manager")
            .with_priority(1)
            .with_color(3)
            .with_episodes(2, 6, None);

        assert_eq!(show.name(), "The Night Manager");
        assert_eq!(show.priority, 1);
        assert_eq!(show.color, Some(3));
        assert_eq!(orders(&show), vec![2, 3, 4, 5, 6]);
        assert!(show.episodes().last().unwrap().is_final());
        assert_eq!(show.episodes().filter(|e| e.is_final()).count(), 1);
    }

    #[test]
    fn test_with_episode_sorts_and_adopts() {
        let show = Show::new("Nautilus")
            .with_episode(Episode::numbered("elsewhere", 10))
            .with_episode(Episode::numbered("Nautilus", 8))
            .with_episode(Episode::numbered("Nautilus", 9));

        assert_eq!(orders(&show), vec![8, 9, 10]);
        assert!(show.episodes().all(|e| e.show == show.id));
    }

    #[test]
    fn test_weekly_releases() {
        let show = Show::new("Peacemaker S2").with_weekly_episodes(at(8, 21, 21), 1, 3);
        let releases: Vec<_> = show.episodes().map(|e| e.release.unwrap()).collect();
        assert_eq!(releases, vec![at(8, 21, 21), at(8, 28, 21), at(9, 4, 21)]);
        assert!(show.episodes().last().unwrap().is_final());
    }

    #[test]
    fn test_pop_and_restore_keep_order() {
        let mut show = Show::new("Murderbot").with_episodes(1, 4, None);
        let first = show.pop_front().unwrap();
        let second = show.pop_front().unwrap();
        assert_eq!(orders(&show), vec![3, 4]);

        // Restore out of pop order
        show.restore(second).unwrap();
        show.restore(first).unwrap();
        assert_eq!(orders(&show), vec![1, 2, 3, 4]);
        assert!(show.is_sorted());
    }

    #[test]
    fn test_restore_rejects_foreign_episode() {
        let mut show = Show::new("Murderbot");
        let err = show.restore(Episode::numbered("Dept Q", 1)).unwrap_err();
        assert!(matches!(err, ScheduleError::ForeignEpisode { .. }));
        assert!(show.is_exhausted());
    }

    #[test]
    fn test_exhaustion() {
        let mut show = Show::new("Dickinson S1").with_episodes(1, 1, None);
        assert!(!show.is_exhausted());
        assert_eq!(show.len(), 1);
        show.pop_front();
        assert!(show.is_exhausted());
        assert!(show.head().is_none());
        assert!(show.pop_front().is_none());
    }
}
