use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use memory_calendar::DEFAULT_PRODID;

/// Top-level calendar configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Input and output paths.
    #[serde(default)]
    pub io: IoConfig,

    /// Calendar window and metadata.
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("number_words.csv")
}
fn default_output() -> PathBuf {
    PathBuf::from("memory_calendar.ics")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// First day, as a quoted ISO date. Defaults to today.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last day, inclusive. Defaults to `start` plus `years`.
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default = "default_prodid")]
    pub prodid: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            years: default_years(),
            prodid: default_prodid(),
        }
    }
}

fn default_years() -> u32 {
    2
}
fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}

impl AppConfig {
    /// Loads `path`. A missing file is only an error when `required` is set;
    /// otherwise every setting takes its default.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::parse(&toml_str)
    }

    /// Parse a config from TOML text.
    pub fn parse(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("failed to parse TOML config")
    }
}
