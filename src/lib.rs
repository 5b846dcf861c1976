//! Episode rotation scheduling.
//!
//! Fills fixed daily viewing slots with episodes from a set of shows. Each
//! open slot goes to the show that has been off the air longest (lower
//! priority number on ties), subject to per-episode release dates and
//! weekday restrictions. Manually authored special days override the
//! default slot pattern, and any committed date range can be cleared and
//! regenerated.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Show`, `Episode`, `Availability`, `Slot`,
//!   `CalendarDay`, `SpecialDay`, `CalendarStore`
//! - **`dispatching`**: Candidate ranking: `DispatchingRule`, `RuleEngine`
//! - **`scheduler`**: The rotation loop, range clearing, last-aired cache
//! - **`validation`**: Catalog integrity checks (duplicate names, unsorted queues)
//! - **`render`**: Week grid, padded text, delimited output, colour legend
//! - **`config`**: TOML-loadable scheduler settings
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_rotation::models::{Show, SpecialDay};
//! use u_rotation::scheduler::{RunRequest, Scheduler};
//! use u_rotation::{render, SchedulerConfig};
//!
//! let config = SchedulerConfig::from_toml_str("stop_at_first_exhausted_show = false").unwrap();
//! let mut scheduler = Scheduler::new(config);
//! scheduler.register_show(Show::new("Andor").with_priority(1).with_episodes(1, 12, None)).unwrap();
//! scheduler.register_show(Show::new("Bluey").with_priority(2).with_episodes(1, 30, None)).unwrap();
//! scheduler.register_special_day(
//!     SpecialDay::new(NaiveDate::from_ymd_opt(2025, 8, 13).unwrap()).with_note("Away"),
//! );
//!
//! let start = NaiveDate::from_ymd_opt(2025, 8, 11).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 8, 24).unwrap();
//! scheduler.generate(&RunRequest::new(start).until(end)).unwrap();
//!
//! let text = render::to_text(&render::week_grid(scheduler.calendar()));
//! assert!(text.contains("Andor 1"));
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//!   (round-robin and priority scheduling)

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
