//! Episode model.
//!
//! An episode is one unit of content belonging to a show. It references
//! its show by [`ShowId`] rather than by pointer, so shows can own their
//! queues outright.
//!
//! # Ordering
//! Each episode carries an integer ordering key. A purely numeric label
//! ("7") is its own key; any other label ("Pilot", "7b") uses the key
//! supplied at construction.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::availability::{all_permit, Availability};

/// Stable show identity (the show's unique name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(String);

impl ShowId {
    /// Creates an identifier from a show name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The show name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShowId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ShowId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Episode variant tag.
///
/// `Final` only changes how the episode is displayed; scheduling treats
/// both kinds identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeKind {
    #[default]
    Regular,
    /// Last episode of a run.
    Final,
}

/// An episode waiting in (or popped from) a show's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Owning show.
    pub show: ShowId,
    /// Display label ("3", "Special").
    pub label: String,
    /// Queue ordering key (ascending).
    pub order: i64,
    /// Release instant, if the episode is not yet out.
    pub release: Option<NaiveDateTime>,
    /// Availability rules; all must hold.
    pub availability: Vec<Availability>,
    /// Display variant.
    pub kind: EpisodeKind,
}

impl Episode {
    /// Creates an episode whose label is its number.
    pub fn numbered(show: impl Into<ShowId>, number: i64) -> Self {
        Self {
            show: show.into(),
            label: number.to_string(),
            order: number,
            release: None,
            availability: Vec::new(),
            kind: EpisodeKind::Regular,
        }
    }

    /// Creates an episode with a free-form label.
    ///
    /// A purely numeric label overrides `order` with its parsed value.
    pub fn labeled(show: impl Into<ShowId>, label: impl Into<String>, order: i64) -> Self {
        let label = label.into();
        let order = parse_numeric_label(&label).unwrap_or(order);
        Self {
            show: show.into(),
            label,
            order,
            release: None,
            availability: Vec::new(),
            kind: EpisodeKind::Regular,
        }
    }

    /// Sets the release instant and forbids slots before it.
    pub fn with_release(mut self, release: NaiveDateTime) -> Self {
        self.release = Some(release);
        self.availability.push(Availability::NotBefore(release));
        self
    }

    /// Like [`with_release`](Self::with_release), ignoring `None`.
    pub fn with_release_opt(self, release: Option<NaiveDateTime>) -> Self {
        match release {
            Some(at) => self.with_release(at),
            None => self,
        }
    }

    /// Adds an availability rule.
    pub fn with_availability(mut self, rule: Availability) -> Self {
        self.availability.push(rule);
        self
    }

    /// Marks as the final episode.
    pub fn as_final(mut self) -> Self {
        self.kind = EpisodeKind::Final;
        self
    }

    /// Marks as the final episode in place.
    pub fn mark_final(&mut self) {
        self.kind = EpisodeKind::Final;
    }

    /// Whether this episode is marked final.
    pub fn is_final(&self) -> bool {
        self.kind == EpisodeKind::Final
    }

    /// Whether every availability rule accepts the slot.
    #[inline]
    pub fn is_available(&self, slot: NaiveDateTime) -> bool {
        all_permit(&self.availability, slot)
    }

    /// Human-readable name: `"Show 3"`, `"Show (8)"` for a final episode,
    /// with `" [Aug 10]"` appended when a release is set.
    pub fn display_name(&self) -> String {
        let mut display = if self.is_final() {
            format!("{} ({})", self.show, self.label)
        } else {
            format!("{} {}", self.show, self.label)
        };
        if let Some(release) = self.release {
            display.push_str(&release.format(" [%b %d]").to_string());
        }
        display
    }
}

fn parse_numeric_label(label: &str) -> Option<i64> {
    if !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()) {
        label.parse().ok()
    } else {
        None
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

    #[test]
    fn test_numeric_label_sets_order() {
        let ep = Episode::labeled("Nautilus", "8", -1);
        assert_eq!(ep.order, 8);

        let special = Episode::labeled("Nautilus", "Special", 42);
        assert_eq!(special.order, 42);

        let mixed = Episode::labeled("Nautilus", "7b", 70);
        assert_eq!(mixed.order, 70);
    }

    #[test]
    fn test_release_adds_constraint() {
        let ep = Episode::numbered("Nautilus", 9).with_release(at(8, 17, 21));
        assert_eq!(ep.release, Some(at(8, 17, 21)));
        assert!(!ep.is_available(at(8, 17, 18)));
        assert!(ep.is_available(at(8, 18, 18)));

        let unconstrained = Episode::numbered("Murderbot", 1).with_release_opt(None);
        assert!(unconstrained.availability.is_empty());
        assert!(unconstrained.is_available(at(1, 1, 0)));
    }

    #[test]
    fn test_display_name() {
        let ep = Episode::numbered("Dept Q", 8);
        assert_eq!(ep.display_name(), "Dept Q 8");

        let last = Episode::numbered("Dept Q", 9).as_final();
        assert!(last.is_final());
        assert_eq!(last.display_name(), "Dept Q (9)");

        let released = Episode::numbered("Nautilus", 8).with_release(at(8, 10, 21));
        assert_eq!(released.display_name(), "Nautilus 8 [Aug 10]");
    }

    #[test]
    fn test_show_id() {
        let id = ShowId::from("Murderbot");
        assert_eq!(id.as_str(), "Murderbot");
        assert_eq!(id.to_string(), "Murderbot");
        assert_eq!(id, ShowId::new(String::from("Murderbot")));
    }
}
