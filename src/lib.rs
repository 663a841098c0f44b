//! Daily mnemonic study calendars.
//!
//! Every calendar day maps to a numeric [`DayCode`] built from its quarter,
//! its day of month and the number of years elapsed since the start year.
//! Codes key into an [`AssociationTable`] of words, and the [`Engine`] turns
//! a span of dates into [`DayEvent`]s whose descriptions carry spaced review
//! prompts (prior days, Sunday weeks, Wednesday fortnights, last-Friday
//! months and season starts). The [`ics`] module serializes those events.
//!
//! ```
//! use chrono::NaiveDate;
//! use memory_calendar::{AssociationTable, DateSpan, DayCode, Engine};
//!
//! let table: AssociationTable = [("001", vec!["apple", "fruit"])].into_iter().collect();
//! let engine = Engine::new(&table, 2025);
//!
//! let jan_first = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! assert_eq!(DayCode::for_date(jan_first, 2025).to_string(), "001");
//!
//! let events = engine.events(&DateSpan::new(jan_first, jan_first));
//! assert_eq!(events[0].summary(), "001 apple");
//! ```

mod association;
mod consts;
mod event;
pub mod ics;
mod prelude;
mod range;
mod review;
pub mod sample;
mod types;

pub use association::{Association, AssociationError, AssociationTable};
pub use consts::*;
pub use event::{DayEvent, Engine};
pub use range::{CodeRange, DateSpan, RangeError};
pub use review::{ReviewEntry, ReviewWindow};
pub use types::{
    Quarter, days_before, days_in_month, first_of_month, is_last_friday, is_season_start,
    last_of_month, months_before,
};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Numeric key of one calendar day.
///
/// The value is `quarter * 100 + day_of_month + 400 * (year - start_year)`.
/// It renders zero-padded to three digits; values past 999 keep their natural
/// width and values before the start year are negative (`-71`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayCode(i64);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid day code: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid quarter: {} (must be 0-{})", "_0", MAX_QUARTER)]
    InvalidQuarter(u8),
    #[display(fmt = "Empty day code string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl DayCode {
    /// Wraps a raw code value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Builds a code from its components.
    /// Returns `None` when the value does not fit a code.
    pub const fn from_parts(year_offset: i64, quarter: Quarter, day: u32) -> Option<Self> {
        let Some(period) = year_offset.checked_mul(PERIOD_LENGTH) else {
            return None;
        };
        let slot = quarter.get() as i64 * QUARTER_WIDTH + day as i64;
        match period.checked_add(slot) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Code of `date` for a calendar that starts in `start_year`.
    ///
    /// Any `start_year` is accepted; years far from `date` give large codes.
    pub fn for_date(date: NaiveDate, start_year: i32) -> Self {
        // both years are i32, so the offset times PERIOD_LENGTH fits in i64
        let year_offset = Self::year_offset(date, start_year);
        let slot = i64::from(Quarter::of(date).get()) * QUARTER_WIDTH + i64::from(date.day());
        Self(year_offset * PERIOD_LENGTH + slot)
    }

    /// Whole years between `date` and `start_year`
    pub fn year_offset(date: NaiveDate, start_year: i32) -> i64 {
        i64::from(date.year()) - i64::from(start_year)
    }

    /// Returns the raw code value
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Splits the code back into (year offset, quarter, day of month).
    /// Returns `None` when the remainder does not name a real day slot.
    pub fn parts(self) -> Option<(i64, Quarter, u32)> {
        let year_offset = self.0.div_euclid(PERIOD_LENGTH);
        let slot = self.0.rem_euclid(PERIOD_LENGTH);
        let quarter = u8::try_from(slot / QUARTER_WIDTH).ok()?;
        let day = u32::try_from(slot % QUARTER_WIDTH).ok()?;
        if day == 0 || day > 31 {
            return None;
        }
        Some((year_offset, Quarter::new(quarter).ok()?, day))
    }
}

impl From<i32> for DayCode {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}

impl From<i64> for DayCode {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<DayCode> for i64 {
    fn from(code: DayCode) -> Self {
        code.0
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = CODE_WIDTH)
    }
}

impl FromStr for DayCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        trimmed
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))
    }
}

impl serde::Serialize for DayCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DayCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
