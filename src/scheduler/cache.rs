//! Last-aired cache.
//!
//! Memoizes, per show, the most recent slot time holding one of its
//! episodes. Misses fall back to a backward scan of the calendar store.
//! Any out-of-band calendar mutation must call
//! [`invalidate`](LastAiredCache::invalidate).

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::trace;

use crate::models::{CalendarStore, ShowId};

/// Per-show memo of the latest airing (`None` = never aired).
#[derive(Debug, Clone, Default)]
pub struct LastAiredCache {
    entries: HashMap<ShowId, Option<NaiveDateTime>>,
}

impl LastAiredCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, scanning `calendar` on a miss.
    pub fn lookup(&mut self, show: &ShowId, calendar: &CalendarStore) -> Option<NaiveDateTime> {
        if let Some(&cached) = self.entries.get(show) {
            trace!(show = %show, "last-aired cache hit");
            return cached;
        }
        let found = calendar.last_aired(show);
        trace!(show = %show, found = ?found, "last-aired cache miss");
        self.entries.insert(show.clone(), found);
        found
    }

    /// Records an airing. Never moves a show's last-aired time backwards.
    pub fn record(&mut self, show: &ShowId, at: NaiveDateTime) {
        let entry = self.entries.entry(show.clone()).or_insert(None);
        if entry.map_or(true, |current| at > current) {
            *entry = Some(at);
        }
    }

    /// Drops every entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Number of cached shows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
