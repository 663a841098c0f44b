use std::{cmp::Ordering, str::FromStr};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    DayCode, ParseError, Quarter, RANGE_SEPARATOR, first_of_month, last_of_month, prelude::*,
};

/// Represents a range between two day codes (inclusive).
/// The start code must be less than or equal to the end code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start} to {end}")]
pub struct CodeRange {
    start: DayCode,
    end:   DayCode,
}

/// Error type for code range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start code is after end code.
    #[error("Invalid code range: start ({start}) is after end ({end})")]
    InvalidRange { start: DayCode, end: DayCode },

    /// Error parsing one end of the range.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl CodeRange {
    /// Creates a new code range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: DayCode, end: DayCode) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Codes of the first and last day of the month containing `date`
    pub fn month(date: NaiveDate, start_year: i32) -> Self {
        Self {
            start: DayCode::for_date(first_of_month(date), start_year),
            end:   DayCode::for_date(last_of_month(date), start_year),
        }
    }

    /// Codes of the first day of the quarter starting at `first_month` through
    /// the last day of that quarter's third month
    pub fn season(first_month: NaiveDate, start_year: i32) -> Self {
        let third_month = first_of_month(first_month)
            .checked_add_months(Months::new(2))
            .unwrap_or(first_month);
        Self {
            start: DayCode::for_date(first_of_month(first_month), start_year),
            end:   DayCode::for_date(last_of_month(third_month), start_year),
        }
    }

    /// Returns the start code of the range
    pub const fn start(&self) -> DayCode {
        self.start
    }

    /// Returns the end code of the range
    pub const fn end(&self) -> DayCode {
        self.end
    }

    /// Checks if the range contains a given code
    pub fn contains(&self, code: DayCode) -> bool {
        self.start <= code && code <= self.end
    }

    /// Quarter shared by both ends, when they fall in the same one
    pub fn quarter(&self) -> Option<Quarter> {
        let (_, start_quarter, _) = self.start.parts()?;
        let (_, end_quarter, _) = self.end.parts()?;
        (start_quarter == end_quarter).then_some(start_quarter)
    }
}

impl FromStr for CodeRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator = RANGE_SEPARATOR.trim();

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts.as_slice() {
            [start, sep, end] if *sep == separator => {
                let start = start.parse::<DayCode>()?;
                let end = end.parse::<DayCode>()?;
                Self::new(start, end)
            }
            _ => Err(RangeError::InvalidFormat(format!(
                "expected '<code>{RANGE_SEPARATOR}<code>': {s}"
            ))),
        }
    }
}

impl PartialOrd for CodeRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CodeRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start codes first, then end codes
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for CodeRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CodeRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive span of calendar days.
/// A span whose start is after its end is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start}/{end}")]
pub struct DateSpan {
    start: NaiveDate,
    end:   NaiveDate,
}

impl DateSpan {
    /// Creates a span covering `start..=end`
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Span from `start` through the same day `years` calendar years later.
    /// Returns `None` if the end date is out of range.
    pub fn years_from(start: NaiveDate, years: u32) -> Option<Self> {
        let end = start.checked_add_months(Months::new(years.checked_mul(12)?))?;
        Some(Self { start, end })
    }

    /// Returns the first day of the span
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the span
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Year codes are measured from
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    /// True when `start` is after `end`
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of days in the span
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    /// Checks whether `date` falls inside the span, both ends included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every day of the span in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
