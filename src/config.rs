//! Scheduler configuration.
//!
//! Loaded from TOML text; every field has a default, so an empty document
//! yields the standard pattern (lunch 12:00 on weekends, dinner 18:00
//! daily, halt at the first exhausted show).
//!
//! ```toml
//! stop_at_first_exhausted_show = false
//! tie_breaker = "ByName"
//!
//! [day_pattern]
//! lunch = "11:30:00"
//! dinner = "19:00:00"
//! lunch_days = ["Sat", "Sun"]
//! ```

use serde::{Deserialize, Serialize};

use crate::dispatching::TieBreaker;
use crate::error::{Result, ScheduleError};
use crate::models::DayPattern;

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Slot pattern for generated days (and lunch/dinner on special days).
    pub day_pattern: DayPattern,
    /// Default for [`RunRequest`](crate::scheduler::RunRequest)s that do
    /// not set the flag explicitly.
    pub stop_at_first_exhausted_show: bool,
    /// Final tie-break after all ranking rules.
    pub tie_breaker: TieBreaker,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day_pattern: DayPattern::default(),
            stop_at_first_exhausted_show: true,
            tie_breaker: TieBreaker::default(),
        }
    }
}

impl SchedulerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the day pattern.
    pub fn with_day_pattern(mut self, pattern: DayPattern) -> Self {
        self.day_pattern = pattern;
        self
    }

    /// Sets the default exhaustion-halt flag.
    pub fn with_stop_at_first_exhausted_show(mut self, stop: bool) -> Self {
        self.stop_at_first_exhausted_show = stop;
        self
    }

    /// Sets the final tie-breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<()> {
        let pattern = &self.day_pattern;
        if pattern.lunch == pattern.dinner && !pattern.lunch_days.is_empty() {
            return Err(ScheduleError::Config(format!(
                "lunch and dinner both at {}",
                pattern.dinner
            )));
        }
        Ok(())
    }
}
