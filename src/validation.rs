//! Catalog validation.
//!
//! Checks the structural integrity of shows and special days before they
//! are registered. Detects:
//! - Empty or duplicate show names
//! - Episodes queued under a show they do not belong to
//! - Queues out of order (only reachable through deserialized data)
//! - Duplicate special-day dates
//! - Duplicate slot times within one special day
//!
//! All problems are collected; validation never stops at the first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Show, SpecialDay};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A show has a blank name.
    EmptyShowName,
    /// Two shows share a name.
    DuplicateShow,
    /// A queued episode names a different show.
    ForeignEpisode,
    /// A show's queue is not sorted by episode order.
    UnsortedQueue,
    /// Two special days share a date.
    DuplicateSpecialDay,
    /// A special day lists the same slot twice.
    DuplicateSlotTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a show and special-day catalog.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(shows: &[Show], special_days: &[SpecialDay]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for show in shows {
        if show.name().trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyShowName,
                "Show with an empty name",
            ));
        }
        if !names.insert(show.name()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateShow,
                format!("Duplicate show name: {}", show.id),
            ));
        }

        for episode in show.episodes().filter(|ep| ep.show != show.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ForeignEpisode,
                format!(
                    "Show '{}' queues episode '{}' of show '{}'",
                    show.id, episode.label, episode.show
                ),
            ));
        }

        if !show.is_sorted() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnsortedQueue,
                format!("Show '{}' has an unsorted episode queue", show.id),
            ));
        }
    }

    let mut dates = HashSet::new();
    for day in special_days {
        if !dates.insert(day.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSpecialDay,
                format!("Duplicate special day: {}", day.date),
            ));
        }

        let mut slots = HashSet::new();
        for slot in &day.slots {
            if !slots.insert(slot) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSlotTime,
                    format!("Special day {} lists slot {:?} twice", day.date, slot),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
