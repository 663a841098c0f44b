//! Built-in demonstration calendar.
//!
//! A handful of hand-picked dates run through the real [`Engine`], showing a
//! plain day, a Sunday, a last Friday, a season start and a second-year code.

use chrono::NaiveDate;

use crate::{AssociationTable, DayEvent, Engine};

/// Year the sample codes are measured from
pub const SAMPLE_START_YEAR: i32 = 2025;

/// Sample dates as (year, month, day)
pub const SAMPLE_DATES: [(i32, u32, u32); 6] = [
    (2025, 1, 1),  // plain first day, also a Wednesday
    (2025, 5, 1),  // second quarter
    (2025, 1, 5),  // Sunday
    (2025, 1, 31), // last Friday of January
    (2025, 4, 1),  // season start
    (2026, 1, 1),  // second year
];

const SAMPLE_WORDS: [(&str, [&str; 3]); 8] = [
    ("001", ["apple", "fruit", "red"]),
    ("002", ["boat", "sailing", "water"]),
    ("003", ["cat", "feline", "pet"]),
    ("031", ["zebra", "stripes", "safari"]),
    ("101", ["diamond", "gem", "sparkle"]),
    ("131", ["elephant", "trunk", "large"]),
    ("201", ["eagle", "bird", "predator"]),
    ("401", ["window", "glass", "view"]),
];

/// The sample association table
pub fn sample_table() -> AssociationTable {
    SAMPLE_WORDS
        .iter()
        .map(|(code, words)| (*code, words.to_vec()))
        .collect()
}

/// The sample dates as calendar days
pub fn sample_dates() -> Vec<NaiveDate> {
    SAMPLE_DATES
        .iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

/// One event per sample date, in `SAMPLE_DATES` order
pub fn sample_events(table: &AssociationTable) -> Vec<DayEvent> {
    let engine = Engine::new(table, SAMPLE_START_YEAR);
    sample_dates()
        .into_iter()
        .map(|date| engine.event_for(date))
        .collect()
}
