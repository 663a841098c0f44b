//! Spaced review schedule.
//!
//! Every day reviews the three previous days. On top of that a date may open
//! one or more review windows, evaluated independently and emitted in a fixed
//! order: Sunday, Wednesday, last Friday of the month, season start.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::{
    AssociationTable, CodeRange, DayCode, LIST_SEPARATOR, PRIOR_DAYS, SUNDAY_WINDOW,
    WEEK_MINUS_2_WINDOW, WEEK_MINUS_3_WINDOW, days_before, is_last_friday, is_season_start,
    months_before, prelude::*,
};

/// One day to revisit: its code and primary word.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[display(fmt = "{code} {word}")]
pub struct ReviewEntry {
    pub code: DayCode,
    pub word: String,
}

impl ReviewEntry {
    /// Entry for `date`, with the word looked up in `table`
    pub fn for_date(date: NaiveDate, start_year: i32, table: &AssociationTable) -> Self {
        let code = DayCode::for_date(date, start_year);
        Self {
            code,
            word: table.primary(code).to_owned(),
        }
    }
}

/// A conditional review block appended to a day's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewWindow {
    /// The seven days before a Sunday
    Sunday { week: Vec<ReviewEntry> },
    /// Days 21 to 15 and 14 to 8 before a Wednesday
    Wednesday {
        week_minus_3: Vec<ReviewEntry>,
        week_minus_2: Vec<ReviewEntry>,
    },
    /// The two calendar months before the last Friday of a month
    LastFriday {
        month_minus_2: CodeRange,
        month_minus_1: CodeRange,
    },
    /// The quarter two quarters before a season start
    SeasonStart { season_minus_2: CodeRange },
}

impl ReviewWindow {
    /// Heading printed in front of the block
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sunday { .. } => "SUNDAY REVIEW",
            Self::Wednesday { .. } => "WEDNESDAY REVIEW",
            Self::LastFriday { .. } => "LAST FRIDAY REVIEW",
            Self::SeasonStart { .. } => "SEASON START REVIEW",
        }
    }
}

impl fmt::Display for ReviewWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.label())?;
        match self {
            Self::Sunday { week } => write!(f, "{}", join(week)),
            Self::Wednesday {
                week_minus_3,
                week_minus_2,
            } => write!(
                f,
                "Week -3: {}, Week -2: {}",
                join(week_minus_3),
                join(week_minus_2)
            ),
            Self::LastFriday {
                month_minus_2,
                month_minus_1,
            } => write!(f, "Month -2: {month_minus_2}, Month -1: {month_minus_1}"),
            Self::SeasonStart { season_minus_2 } => write!(f, "Season -2: {season_minus_2}"),
        }
    }
}

/// Joins entries as `"<code> <word>, <code> <word>"`
pub(crate) fn join(entries: &[ReviewEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Entries for the days `from` back through `to` back, oldest first.
/// Days before the calendar's lower limit are dropped.
pub(crate) fn lookback(
    date: NaiveDate,
    (from, to): (u64, u64),
    start_year: i32,
    table: &AssociationTable,
) -> Vec<ReviewEntry> {
    (to..=from)
        .rev()
        .filter_map(|back| days_before(date, back))
        .map(|day| ReviewEntry::for_date(day, start_year, table))
        .collect()
}

/// The three days before `date`, oldest first
pub(crate) fn prior_days(
    date: NaiveDate,
    start_year: i32,
    table: &AssociationTable,
) -> Vec<ReviewEntry> {
    PRIOR_DAYS
        .iter()
        .filter_map(|&back| days_before(date, back))
        .map(|day| ReviewEntry::for_date(day, start_year, table))
        .collect()
}

/// Review windows opened by `date`, in emission order
pub(crate) fn windows(
    date: NaiveDate,
    start_year: i32,
    table: &AssociationTable,
) -> Vec<ReviewWindow> {
    let mut windows = Vec::new();

    if date.weekday() == Weekday::Sun {
        windows.push(ReviewWindow::Sunday {
            week: lookback(date, SUNDAY_WINDOW, start_year, table),
        });
    }

    if date.weekday() == Weekday::Wed {
        windows.push(ReviewWindow::Wednesday {
            week_minus_3: lookback(date, WEEK_MINUS_3_WINDOW, start_year, table),
            week_minus_2: lookback(date, WEEK_MINUS_2_WINDOW, start_year, table),
        });
    }

    if is_last_friday(date) {
        if let (Some(two_back), Some(one_back)) = (months_before(date, 2), months_before(date, 1))
        {
            windows.push(ReviewWindow::LastFriday {
                month_minus_2: CodeRange::month(two_back, start_year),
                month_minus_1: CodeRange::month(one_back, start_year),
            });
        }
    }

    if is_season_start(date) {
        if let Some(season_start) = months_before(date, 6) {
            windows.push(ReviewWindow::SeasonStart {
                season_minus_2: CodeRange::season(season_start, start_year),
            });
        }
    }

    windows
}
