use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use memory_calendar::SAMPLE_PRODID;
use memory_calendar::ics::{self, CalendarMeta};
use memory_calendar::sample::{sample_events, sample_table};

use crate::cli::SampleArgs;

/// Print the sample calendar and optionally save it.
pub fn run(args: SampleArgs) -> Result<()> {
    let table = sample_table();
    let events = sample_events(&table);
    let meta = CalendarMeta::new(SAMPLE_PRODID, Utc::now());

    println!("Sample ICS entries:");
    print!("{}", ics::to_ics_string(&events, &meta));

    if !args.no_save {
        ics::write_file(&args.output, &events, &meta)
            .with_context(|| format!("failed to save sample: {}", args.output.display()))?;
        info!(path = %args.output.display(), "sample saved");
        println!("\nSample calendar saved to '{}'", args.output.display());
    }
    Ok(())
}
