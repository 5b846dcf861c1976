//! Rotation scheduling domain models.
//!
//! Provides the data types the scheduler reads and mutates: shows and
//! their episode queues, availability predicates, slots, calendar days,
//! and the calendar store.
//!
//! # Domain Mappings
//!
//! | u-rotation | TV night | Podcast feed | Classroom |
//! |------------|----------|--------------|-----------|
//! | Show | Series | Podcast | Course |
//! | Episode | Episode | Episode | Lesson |
//! | Slot | Viewing time | Listening slot | Period |
//! | SpecialDay | Holiday / trip | Travel day | Field trip |

mod availability;
mod calendar;
mod day;
mod episode;
mod show;

pub use availability::{all_permit, Availability};
pub use calendar::CalendarStore;
pub use day::{CalendarDay, DayKind, DayPattern, Slot, SlotTime, SpecialDay};
pub use episode::{Episode, EpisodeKind, ShowId};
pub use show::Show;
