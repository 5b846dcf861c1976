//! Crate-wide error type.
//!
//! Only invariant breaches surface here. Normal run termination (range
//! exhausted, no eligible show, exhausted show halt) is reported through
//! [`RunOutcome`](crate::scheduler::RunOutcome), never as an error.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::ShowId;
use crate::validation::ValidationError;

/// Result alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised by the scheduling engine.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A show with the same name is already registered.
    #[error("show '{0}' is already registered")]
    DuplicateShow(ShowId),

    /// An operation referenced a show the scheduler does not know.
    #[error("unknown show '{0}'")]
    UnknownShow(ShowId),

    /// An episode was handed to a show it does not belong to.
    #[error("episode '{episode}' belongs to '{owner}', not '{target}'")]
    ForeignEpisode {
        episode: String,
        owner: ShowId,
        target: ShowId,
    },

    /// Attempted to assign an episode to a slot that already holds one.
    #[error("slot at {0} already holds an episode")]
    SlotOccupied(NaiveDateTime),

    /// The date cursor ran past the representable calendar.
    #[error("date cursor overflowed after {0}")]
    DateOverflow(NaiveDate),

    /// Catalog validation failed.
    #[error("invalid catalog: {} problem(s), first: {}", .0.len(), first_problem(.0))]
    InvalidCatalog(Vec<ValidationError>),

    /// Configuration is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration text could not be parsed.
    #[error("configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Delimited rendering failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing rendered output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal scheduler state contradicted itself.
    #[error("scheduler invariant violated: {0}")]
    Invariant(String),
}

fn first_problem(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}
