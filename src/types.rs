use crate::ParseError;
use crate::consts::{MAX_QUARTER, MIN_DAY, MONTHS_PER_QUARTER, SEASON_START_MONTHS};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-indexed quarter guaranteed to be in the range `0..=MAX_QUARTER` (0..=3)
/// 0 is January to March, 3 is October to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    /// Creates a new Quarter, validating that it's <= `MAX_QUARTER`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidQuarter` if the value is > `MAX_QUARTER`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_QUARTER {
            return Err(ParseError::InvalidQuarter(value));
        }
        Ok(Self(value))
    }

    /// Quarter containing `date`
    pub fn of(date: NaiveDate) -> Self {
        // month0 is 0..=11, so the quotient is always 0..=3
        Self((date.month0() / MONTHS_PER_QUARTER) as u8)
    }

    /// Returns the quarter value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// First month (1-indexed) of this quarter
    pub const fn first_month(self) -> u32 {
        self.0 as u32 * MONTHS_PER_QUARTER + 1
    }

    /// Last month (1-indexed) of this quarter
    pub const fn last_month(self) -> u32 {
        self.first_month() + MONTHS_PER_QUARTER - 1
    }
}

impl TryFrom<u8> for Quarter {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> Self {
        quarter.0
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Calendar helpers

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day() - MIN_DAY))
}

/// Last day of the month containing `date`
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Number of days in `month` of `year`, or `None` for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, MIN_DAY).map(|first| last_of_month(first).day())
}

/// `date` shifted back by `days`, or `None` past the calendar's lower limit
pub fn days_before(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(days))
}

/// `date` shifted back by whole months, clamping the day to the target month
pub fn months_before(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(months))
}

/// True when `date` is a Friday and no later Friday falls in the same month
pub fn is_last_friday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Fri && date.day() + 7 > last_of_month(date).day()
}

/// True on the first day of January, April, July and October
pub fn is_season_start(date: NaiveDate) -> bool {
    date.day() == MIN_DAY && SEASON_START_MONTHS.contains(&date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quarter_new_valid() {
        for q in 0..=3 {
            assert!(Quarter::new(q).is_ok(), "Quarter {q} should be valid");
        }
    }

    #[test]
    fn test_quarter_new_invalid() {
        assert!(matches!(Quarter::new(4), Err(ParseError::InvalidQuarter(4))));
        assert!(matches!(
            Quarter::new(255),
            Err(ParseError::InvalidQuarter(255))
        ));
    }

    #[test]
    fn test_quarter_of_every_month() {
        let expected = [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3];
        for month in 1..=12 {
            assert_eq!(
                Quarter::of(date(2025, month, 1)).get(),
                expected[month as usize - 1],
                "Month {month} is in the wrong quarter"
            );
        }
    }

    #[test]
    fn test_quarter_month_bounds() {
        let q = Quarter::new(2).unwrap();
        assert_eq!(q.first_month(), 7);
        assert_eq!(q.last_month(), 9);

        let q = Quarter::new(0).unwrap();
        assert_eq!(q.first_month(), 1);
        assert_eq!(q.last_month(), 3);
    }

    #[test]
    fn test_quarter_try_from_and_into() {
        let q: Quarter = 3.try_into().unwrap();
        assert_eq!(u8::from(q), 3);

        let result: Result<Quarter, _> = 4.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_quarter_display() {
        assert_eq!(Quarter::new(1).unwrap().to_string(), "1");
    }

    #[test]
    fn test_quarter_serde() {
        let q = Quarter::new(2).unwrap();
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "2");

        let parsed: Quarter = serde_json::from_str(&json).unwrap();
        assert_eq!(q, parsed);

        assert!(serde_json::from_str::<Quarter>("7").is_err());
    }

    #[test]
    fn test_days_in_month_31_day_months() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(
                days_in_month(2024, month),
                Some(31),
                "Month {month} should have 31 days"
            );
        }
    }

    #[test]
    fn test_days_in_month_30_day_months() {
        for month in [4, 6, 9, 11] {
            assert_eq!(
                days_in_month(2024, month),
                Some(30),
                "Month {month} should have 30 days"
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28), "Century year not divisible by 400");
        assert_eq!(days_in_month(2000, 2), Some(29), "Century year divisible by 400");
    }

    #[test]
    fn test_days_in_month_invalid_month() {
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_first_and_last_of_month() {
        assert_eq!(first_of_month(date(2025, 2, 17)), date(2025, 2, 1));
        assert_eq!(last_of_month(date(2025, 2, 17)), date(2025, 2, 28));
        assert_eq!(last_of_month(date(2025, 12, 1)), date(2025, 12, 31));
    }

    #[test]
    fn test_months_before_clamps_day() {
        assert_eq!(months_before(date(2025, 5, 31), 1), Some(date(2025, 4, 30)));
        assert_eq!(months_before(date(2025, 1, 31), 2), Some(date(2024, 11, 30)));
    }

    #[test]
    fn test_days_before() {
        assert_eq!(days_before(date(2025, 1, 1), 1), Some(date(2024, 12, 31)));
        assert_eq!(days_before(date(2025, 3, 1), 21), Some(date(2025, 2, 8)));
        assert_eq!(days_before(NaiveDate::MIN, 1), None);
    }

    #[test]
    fn test_is_last_friday() {
        // January 2025: Fridays are 3, 10, 17, 24, 31
        assert!(is_last_friday(date(2025, 1, 31)));
        assert!(!is_last_friday(date(2025, 1, 24)));
        // February 2025 ends on Friday 28
        assert!(is_last_friday(date(2025, 2, 28)));
        // March 2025: last Friday is the 28th, the 31st is a Monday
        assert!(is_last_friday(date(2025, 3, 28)));
        assert!(!is_last_friday(date(2025, 3, 31)));
        // Not a Friday at all
        assert!(!is_last_friday(date(2025, 1, 30)));
    }

    #[test]
    fn test_last_friday_once_per_month() {
        let mut day = date(2024, 1, 1);
        let end = date(2026, 12, 31);
        let mut hits = std::collections::HashMap::new();
        while day <= end {
            if is_last_friday(day) {
                assert_eq!(day.weekday(), Weekday::Fri);
                *hits.entry((day.year(), day.month())).or_insert(0) += 1;
            }
            day = day.succ_opt().unwrap();
        }
        assert_eq!(hits.len(), 36);
        assert!(hits.values().all(|&n| n == 1));
    }

    #[test]
    fn test_is_season_start() {
        for month in 1..=12 {
            assert_eq!(
                is_season_start(date(2025, month, 1)),
                [1, 4, 7, 10].contains(&month),
                "Month {month}"
            );
        }
        assert!(!is_season_start(date(2025, 4, 2)));
    }
}
