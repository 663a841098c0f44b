use anyhow::Result;
use chrono::Datelike;

use memory_calendar::{DayCode, Quarter};

use crate::cli::CodeArgs;

/// Print the code of one date with its components.
pub fn run(args: CodeArgs) -> Result<()> {
    let start_year = args.start_year.unwrap_or_else(|| args.date.year());
    println!("{}", describe(&args, start_year));
    Ok(())
}

fn describe(args: &CodeArgs, start_year: i32) -> String {
    format!(
        "{}  (quarter {}, day {}, year offset {})",
        DayCode::for_date(args.date, start_year),
        Quarter::of(args.date),
        args.date.day(),
        DayCode::year_offset(args.date, start_year)
    )
}
