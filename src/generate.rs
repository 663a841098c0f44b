use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, Utc};
use tracing::{info, info_span};

use memory_calendar::ics::{self, CalendarMeta};
use memory_calendar::{AssociationTable, DateSpan, Engine};

use crate::cli::GenerateArgs;
use crate::config::{AppConfig, CalendarConfig};

/// Config file picked up from the working directory when `-c` is not given.
const DEFAULT_CONFIG: &str = "memory-calendar.toml";

/// Build the calendar for the configured window and write it to disk.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    // 1. Load config, CLI flags take precedence
    let config = match &args.config {
        Some(path) => AppConfig::load(path, true)?,
        None => AppConfig::load(Path::new(DEFAULT_CONFIG), false)?,
    };

    // 2. Resolve the window
    let today = Local::now().date_naive();
    let span = resolve_window(&args, &config.calendar, today)?;
    if span.is_empty() {
        bail!("calendar window {span} is empty: start is after end");
    }
    let input = args.input.unwrap_or(config.io.input);
    let output = args.output.unwrap_or(config.io.output);

    // 3. Read associations
    info!(path = %input.display(), "reading associations");
    let table = AssociationTable::from_path(&input)
        .with_context(|| format!("failed to load associations: {}", input.display()))?;
    info!(entries = table.len(), "associations loaded");

    // 4. Build and write events
    let engine = Engine::new(&table, span.start_year());
    let events = engine.events(&span);
    let meta = CalendarMeta::new(config.calendar.prodid, Utc::now());
    ics::write_file(&output, &events, &meta)
        .with_context(|| format!("failed to write calendar: {}", output.display()))?;

    info!(
        path = %output.display(),
        events = events.len(),
        %span,
        "calendar written"
    );
    println!("Wrote {} events to {}", events.len(), output.display());
    Ok(())
}

/// Picks the calendar window. An explicit end wins over a length in years,
/// and any CLI flag wins over the config file, so `--years` beats a config
/// `end`.
fn resolve_window(
    args: &GenerateArgs,
    calendar: &CalendarConfig,
    today: NaiveDate,
) -> Result<DateSpan> {
    let start = args.start.or(calendar.start).unwrap_or(today);
    let end = match (args.end, args.years) {
        (Some(end), _) => Some(end),
        (None, Some(_)) => None,
        (None, None) => calendar.end,
    };
    if let Some(end) = end {
        return Ok(DateSpan::new(start, end));
    }

    let years = args.years.unwrap_or(calendar.years);
    DateSpan::years_from(start, years)
        .with_context(|| format!("{years} years after {start} is out of range"))
}
