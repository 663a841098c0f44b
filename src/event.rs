use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::review::{self, join};
use crate::{
    AssociationTable, DAY_LOGS_HEADING, DateSpan, DayCode, LIST_SEPARATOR,
    OTHER_POSSIBILITIES_HEADING, ReviewEntry, ReviewWindow, TO_REVIEW_HEADING,
};

/// The study event of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEvent {
    date:        NaiveDate,
    code:        DayCode,
    summary:     String,
    description: String,
}

impl DayEvent {
    /// Returns the calendar day of the event
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the day code of the event
    pub const fn code(&self) -> DayCode {
        self.code
    }

    /// `"<code> <primary word>"`
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Alternates, prior-day review and day logs, one section after another
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Builds day events from a borrowed association table.
///
/// Codes are measured from `start_year`: a date `n` years later is shifted
/// by `n * PERIOD_LENGTH`.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    table:      &'a AssociationTable,
    start_year: i32,
}

impl<'a> Engine<'a> {
    /// Creates an engine over `table` with codes measured from `start_year`
    pub const fn new(table: &'a AssociationTable, start_year: i32) -> Self {
        Self { table, start_year }
    }

    /// Returns the year codes are measured from
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Returns the borrowed association table
    pub const fn table(&self) -> &'a AssociationTable {
        self.table
    }

    /// Code of `date` relative to the engine's start year
    pub fn code_for(&self, date: NaiveDate) -> DayCode {
        DayCode::for_date(date, self.start_year)
    }

    /// The three days before `date`, oldest first
    pub fn prior_days(&self, date: NaiveDate) -> Vec<ReviewEntry> {
        review::prior_days(date, self.start_year, self.table)
    }

    /// Review windows opened by `date`, in emission order
    pub fn review_windows(&self, date: NaiveDate) -> Vec<ReviewWindow> {
        review::windows(date, self.start_year, self.table)
    }

    /// Builds the event for a single day
    pub fn event_for(&self, date: NaiveDate) -> DayEvent {
        let code = self.code_for(date);
        let association = self.table.lookup(code);

        let mut description = String::new();
        description.push_str(OTHER_POSSIBILITIES_HEADING);
        description.push_str(&association.alternates.join(LIST_SEPARATOR));
        description.push_str("\n\n");

        description.push_str(TO_REVIEW_HEADING);
        description.push_str(&join(&self.prior_days(date)));
        description.push_str("\n\n");

        description.push_str(DAY_LOGS_HEADING);
        for window in self.review_windows(date) {
            description.push('\n');
            description.push_str(&window.to_string());
        }

        DayEvent {
            date,
            code,
            summary: format!("{code} {}", association.primary),
            description,
        }
    }

    /// Builds one event per day of `span`; an empty span yields no events
    pub fn events(&self, span: &DateSpan) -> Vec<DayEvent> {
        let events: Vec<DayEvent> = span.days().map(|date| self.event_for(date)).collect();
        debug!(
            span = %span,
            start_year = self.start_year,
            events = events.len(),
            "built day events"
        );
        events
    }
}
