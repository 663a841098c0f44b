/// Code points added per elapsed year relative to the start year
pub const PERIOD_LENGTH: i64 = 400;

/// Code points per quarter (the leading digit)
pub const QUARTER_WIDTH: i64 = 100;

/// Minimum rendered width of a code; wider values keep their natural width
pub const CODE_WIDTH: usize = 3;

/// Months grouped into one quarter
pub const MONTHS_PER_QUARTER: u32 = 3;

/// Highest zero-indexed quarter (October to December)
pub const MAX_QUARTER: u8 = 3;

/// Months that open a quarter (a "season")
pub const SEASON_START_MONTHS: [u32; 4] = [1, 4, 7, 10];

/// First day of month
pub const MIN_DAY: u32 = 1;

/// Word used when a code has no entry in the association table
pub const NO_ASSOCIATION: &str = "No association";

/// Separator between the two ends of a code range
pub const RANGE_SEPARATOR: &str = " to ";

/// Separator between list items in descriptions
pub const LIST_SEPARATOR: &str = ", ";

/// Days looked back by the daily review, oldest first
pub const PRIOR_DAYS: [u64; 3] = [3, 2, 1];

/// Days looked back by the Sunday review
pub const SUNDAY_WINDOW: (u64, u64) = (7, 1);
/// Days looked back for "Week -3" of the Wednesday review
pub const WEEK_MINUS_3_WINDOW: (u64, u64) = (21, 15);
/// Days looked back for "Week -2" of the Wednesday review
pub const WEEK_MINUS_2_WINDOW: (u64, u64) = (14, 8);

/// Description section headings, each followed by its underline
pub const OTHER_POSSIBILITIES_HEADING: &str = "Other Possibilities\n=============\n";
pub const TO_REVIEW_HEADING: &str = "To Review\n=======\n";
pub const DAY_LOGS_HEADING: &str = "Day Logs\n======\n";

/// Default `PRODID` of generated calendars
pub const DEFAULT_PRODID: &str = "-//Memory Calendar//EN";
/// `PRODID` of the sample calendar
pub const SAMPLE_PRODID: &str = "-//Memory Calendar Sample//EN";
