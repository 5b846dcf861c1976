//! Calendar rendering.
//!
//! Turns a committed calendar into a Sunday-to-Saturday week grid and
//! formats it as padded text or delimited records. Also builds the episode
//! pool and the colour legend used by the combined paste sheet.
//!
//! Rendering is read-only: nothing here mutates scheduler state.
//!
//! # Grid Layout
//!
//! Each day cell is a column of rows:
//! - row 0: date (`"Aug 11"`)
//! - rows 1..=n: one per slot, the episode display name or blank
//! - last row: notes joined by `"; "`
//!
//! `n` is the largest slot count in the calendar, never less than 3.

use chrono::{Duration, NaiveDate};
use csv::{Terminator, WriterBuilder};

use crate::error::Result;
use crate::models::{CalendarDay, CalendarStore, Show};
use crate::scheduler::Scheduler;

/// Days per grid week.
pub const DAYS_IN_WEEK: usize = 7;

/// Minimum slot rows per day cell.
pub const MIN_SLOT_ROWS: usize = 3;

/// Colour slots in the legend.
pub const LEGEND_SLOTS: usize = 16;

/// One day column of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Calendar date.
    pub date: NaiveDate,
    /// Cell rows: date, slots, notes.
    pub rows: Vec<String>,
}

impl DayCell {
    fn new(date: NaiveDate, row_count: usize) -> Self {
        let mut rows = vec![String::new(); row_count];
        rows[0] = date.format("%b %d").to_string();
        Self { date, rows }
    }

    fn fill(&mut self, day: &CalendarDay) {
        for (i, slot) in day.slots().iter().enumerate() {
            if let Some(episode) = slot.episode() {
                self.rows[i + 1] = episode.display_name();
            }
        }
        if !day.notes.is_empty() {
            if let Some(last) = self.rows.last_mut() {
                *last = day.notes.join("; ");
            }
        }
    }

    /// Widest row in characters.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }
}

/// Seven consecutive day cells starting on a Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    /// Sunday through Saturday.
    pub days: Vec<DayCell>,
}

impl Week {
    /// Row `index` across all seven days.
    pub fn row(&self, index: usize) -> Vec<String> {
        self.days.iter().map(|day| day.rows[index].clone()).collect()
    }
}

/// The full grid, Sunday on/before the earliest committed date through
/// Saturday on/after the latest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekGrid {
    /// Weeks in date order.
    pub weeks: Vec<Week>,
    /// Rows per day cell.
    pub rows_per_day: usize,
}

impl WeekGrid {
    /// Every grid row, week by week.
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.weeks
            .iter()
            .flat_map(move |week| (0..self.rows_per_day).map(move |row| week.row(row)))
    }

    /// Whether the calendar was empty.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Builds the week grid for a calendar store.
pub fn week_grid(calendar: &CalendarStore) -> WeekGrid {
    let (Some(start), Some(end)) = (calendar.earliest_sunday(), calendar.latest_saturday()) else {
        return WeekGrid::default();
    };
    let slot_rows = calendar
        .iter()
        .map(|day| day.slots().len())
        .max()
        .unwrap_or(0)
        .max(MIN_SLOT_ROWS);
    let rows_per_day = slot_rows + 2;

    let mut weeks = Vec::new();
    let mut week_start = start;
    while week_start <= end {
        let days = (0..DAYS_IN_WEEK as i64)
            .map(|offset| {
                let date = week_start + Duration::days(offset);
                let mut cell = DayCell::new(date, rows_per_day);
                if let Some(day) = calendar.get(date) {
                    cell.fill(day);
                }
                cell
            })
            .collect();
        weeks.push(Week { days });
        week_start += Duration::days(DAYS_IN_WEEK as i64);
    }

    WeekGrid { weeks, rows_per_day }
}

/// Padded text: columns aligned per weekday, `" | "` between days, a
/// dashed rule between weeks.
pub fn to_text(grid: &WeekGrid) -> String {
    let widths: Vec<usize> = (0..DAYS_IN_WEEK)
        .map(|col| {
            grid.weeks
                .iter()
                .map(|week| week.days[col].width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let blocks: Vec<String> = grid
        .weeks
        .iter()
        .map(|week| {
            (0..grid.rows_per_day)
                .map(|row| {
                    week.days
                        .iter()
                        .zip(&widths)
                        .map(|(day, &width)| format!("{:<width$}", day.rows[row]))
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    let rule_len = blocks
        .first()
        .and_then(|block| block.lines().next())
        .map_or(0, |line| line.chars().count());
    let spacer = format!("\n{}\n", "-".repeat(rule_len));
    blocks.join(&spacer)
}

/// Grid rows as delimited records, quoting cells that need it.
pub fn to_delimited(grid: &WeekGrid, delimiter: u8) -> Result<String> {
    write_records(grid.records(), delimiter)
}

/// Comma-separated grid.
pub fn to_csv(grid: &WeekGrid) -> Result<String> {
    to_delimited(grid, b',')
}

/// Tab-separated grid.
pub fn to_tab_delimited(grid: &WeekGrid) -> Result<String> {
    to_delimited(grid, b'\t')
}

/// Display names of every unscheduled episode, show by show in queue order.
pub fn episode_pool(scheduler: &Scheduler) -> Vec<String> {
    scheduler.remaining_episodes().map(|ep| ep.display_name()).collect()
}

/// Assigns shows to the sixteen colour slots.
///
/// Shows with a free in-range colour keep it; the rest fill unused slots in
/// order and any overflow is appended. Unused slots are rendered as runs of
/// dots (`"."`, `".."`, ...) so they stay distinguishable.
pub fn color_legend<'a>(shows: impl IntoIterator<Item = &'a Show>) -> Vec<String> {
    let mut legend: Vec<Option<String>> = vec![None; LEGEND_SLOTS];
    let mut uncolored = Vec::new();

    for show in shows {
        let slot = show
            .color
            .and_then(|color| usize::try_from(color).ok())
            .filter(|&color| color < LEGEND_SLOTS && legend[color].is_none());
        match slot {
            Some(color) => legend[color] = Some(show.name().to_string()),
            None => uncolored.push(show.name().to_string()),
        }
    }

    let mut uncolored = uncolored.into_iter();
    for entry in legend.iter_mut().filter(|entry| entry.is_none()) {
        match uncolored.next() {
            Some(name) => *entry = Some(name),
            None => break,
        }
    }

    legend
        .into_iter()
        .enumerate()
        .map(|(i, entry)| entry.unwrap_or_else(|| ".".repeat(i + 1)))
        .chain(uncolored)
        .collect()
}

/// One sheet for pasting into a spreadsheet: the grid, then the remaining
/// and pending episodes, then the colour legend, each block separated by
/// an empty column.
pub fn paste_sheet(scheduler: &Scheduler, pending: &[Show]) -> Result<String> {
    let grid = week_grid(scheduler.calendar());
    let weeks: Vec<Vec<String>> = grid.records().collect();
    let episodes: Vec<String> = episode_pool(scheduler)
        .into_iter()
        .chain(pending.iter().flat_map(Show::episodes).map(|ep| ep.display_name()))
        .collect();
    let legend = color_legend(scheduler.all_shows());

    let longest = weeks.len().max(episodes.len()).max(legend.len());
    let records = (0..longest).map(|i| {
        let mut record = weeks
            .get(i)
            .cloned()
            .unwrap_or_else(|| vec![String::new(); DAYS_IN_WEEK]);
        if let Some(episode) = episodes.get(i) {
            record.extend([String::new(), episode.clone()]);
        } else if i < legend.len() {
            record.extend([String::new(), String::new()]);
        }
        if let Some(name) = legend.get(i) {
            record.extend([String::new(), name.clone()]);
        }
        record
    });

    write_records(records, b',')
}

fn write_records(records: impl IntoIterator<Item = Vec<String>>, delimiter: u8) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        for record in records {
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
