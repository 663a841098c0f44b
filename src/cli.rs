use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Memory-training study calendar generator.
#[derive(Parser)]
#[command(
    name = "memory-calendar",
    version,
    about = "Turn a number-to-word table into a daily study calendar"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build an iCalendar file from an association table.
    Generate(GenerateArgs),
    /// Print the built-in sample calendar.
    Sample(SampleArgs),
    /// Print the day code of a single date.
    Code(CodeArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file [default: memory-calendar.toml, if present].
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the association CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the output .ics path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First day of the calendar (defaults to today).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the calendar, inclusive (defaults to start + years).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Length of the calendar in years (overrides an `end` from config).
    #[arg(long, conflicts_with = "end")]
    pub years: Option<u32>,
}

/// Arguments for the `sample` subcommand.
#[derive(clap::Args)]
pub struct SampleArgs {
    /// Where to save the sample calendar.
    #[arg(short, long, default_value = "sample_memory_calendar.ics")]
    pub output: PathBuf,

    /// Only print to stdout, do not save.
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the `code` subcommand.
#[derive(clap::Args)]
pub struct CodeArgs {
    /// Date to encode (YYYY-MM-DD).
    pub date: NaiveDate,

    /// Year codes are measured from (defaults to the date's year).
    #[arg(long)]
    pub start_year: Option<i32>,
}
