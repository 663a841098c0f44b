//! iCalendar (RFC 5545) output and read-back.
//!
//! Every [`DayEvent`] becomes an all-day `VEVENT` (`DTSTART;VALUE=DATE` to
//! the following day). Text values are escaped, lines are folded at 75
//! octets and terminated with CRLF. [`read_events`] reverses all of that for
//! the properties this crate writes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::debug;

use crate::{DEFAULT_PRODID, DayEvent};

/// Longest physical line, in octets, excluding the CRLF
const MAX_LINE_OCTETS: usize = 75;
const DATE_FORMAT: &str = "%Y%m%d";
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const UID_DOMAIN: &str = "memory-calendar";

/// Error raised while writing or reading calendar files.
#[derive(Debug, thiserror::Error)]
pub enum IcsError {
    #[error("failed to read calendar {}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write calendar {}", path.display())]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed calendar at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("event {index} has no {property}")]
    MissingProperty {
        index:    usize,
        property: &'static str,
    },
}

/// Calendar-level properties and the timestamp stamped on every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMeta {
    pub prodid:  String,
    pub dtstamp: DateTime<Utc>,
}

impl CalendarMeta {
    /// Metadata with an explicit `PRODID` and `DTSTAMP`
    pub fn new(prodid: impl Into<String>, dtstamp: DateTime<Utc>) -> Self {
        Self {
            prodid: prodid.into(),
            dtstamp,
        }
    }
}

impl Default for CalendarMeta {
    fn default() -> Self {
        Self::new(DEFAULT_PRODID, Utc::now())
    }
}

/// An event recovered from calendar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsEvent {
    pub date:        NaiveDate,
    pub summary:     String,
    pub description: String,
}

impl From<&DayEvent> for IcsEvent {
    fn from(event: &DayEvent) -> Self {
        Self {
            date:        event.date(),
            summary:     event.summary().to_owned(),
            description: event.description().to_owned(),
        }
    }
}

/// Writes a complete `VCALENDAR` to `out`
///
/// # Errors
/// Returns any error raised by the underlying writer.
pub fn write_calendar<W: Write>(
    events: &[DayEvent],
    meta: &CalendarMeta,
    mut out: W,
) -> io::Result<()> {
    out.write_all(to_ics_string(events, meta).as_bytes())?;
    out.flush()
}

/// Writes the calendar to `path`, replacing any existing file
///
/// # Errors
/// Returns `IcsError::Write` if the file cannot be created or written.
pub fn write_file(
    path: impl AsRef<Path>,
    events: &[DayEvent],
    meta: &CalendarMeta,
) -> Result<(), IcsError> {
    let path = path.as_ref();
    let wrap = |source| IcsError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    write_calendar(events, meta, BufWriter::new(file)).map_err(wrap)?;
    debug!(path = %path.display(), events = events.len(), "wrote calendar");
    Ok(())
}

/// Renders the calendar as a string
pub fn to_ics_string(events: &[DayEvent], meta: &CalendarMeta) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, &format!("PRODID:{}", escape_text(&meta.prodid)));
    push_line(&mut out, "VERSION:2.0");

    let dtstamp = meta.dtstamp.format(STAMP_FORMAT).to_string();
    for event in events {
        let date = event.date();
        // DTEND is exclusive, so an all-day event ends on the next day
        let end = date.checked_add_days(Days::new(1)).unwrap_or(date);

        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("SUMMARY:{}", escape_text(event.summary())));
        push_line(&mut out, &format!("DTSTART;VALUE=DATE:{}", date.format(DATE_FORMAT)));
        push_line(&mut out, &format!("DTEND;VALUE=DATE:{}", end.format(DATE_FORMAT)));
        push_line(&mut out, &format!("DTSTAMP:{dtstamp}"));
        push_line(
            &mut out,
            &format!("UID:{}-{}@{UID_DOMAIN}", date.format(DATE_FORMAT), event.code()),
        );
        push_line(
            &mut out,
            &format!("DESCRIPTION:{}", escape_text(event.description())),
        );
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

/// Reads every `VEVENT` of a calendar back into (date, summary, description)
///
/// # Errors
/// Returns `IcsError::Malformed` for unbalanced components or lines without a
/// value, and `IcsError::MissingProperty` for events lacking `DTSTART`.
pub fn read_events(input: &str) -> Result<Vec<IcsEvent>, IcsError> {
    let mut events = Vec::new();
    let mut current: Option<PartialEvent> = None;

    for (line_no, line) in unfold(input) {
        let Some((name, value)) = split_property(&line) else {
            return Err(IcsError::Malformed {
                line:   line_no,
                reason: format!("missing ':' in {line:?}"),
            });
        };

        match (name.as_str(), value) {
            ("BEGIN", "VEVENT") => {
                if current.is_some() {
                    return Err(IcsError::Malformed {
                        line:   line_no,
                        reason: "nested VEVENT".to_owned(),
                    });
                }
                current = Some(PartialEvent::default());
            }
            ("END", "VEVENT") => {
                let event = current.take().ok_or_else(|| IcsError::Malformed {
                    line:   line_no,
                    reason: "END:VEVENT without BEGIN".to_owned(),
                })?;
                events.push(event.finish(events.len())?);
            }
            (property, value) => {
                if let Some(event) = current.as_mut() {
                    event.set(property, value, line_no)?;
                }
            }
        }
    }

    if current.is_some() {
        return Err(IcsError::Malformed {
            line:   input.lines().count(),
            reason: "unterminated VEVENT".to_owned(),
        });
    }
    Ok(events)
}

/// Reads a calendar file from disk
///
/// # Errors
/// Returns `IcsError::Read` if the file cannot be read, otherwise as
/// [`read_events`].
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<IcsEvent>, IcsError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| IcsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_events(&input)
}

#[derive(Default)]
struct PartialEvent {
    date:        Option<NaiveDate>,
    summary:     Option<String>,
    description: Option<String>,
}

impl PartialEvent {
    fn set(&mut self, property: &str, value: &str, line: usize) -> Result<(), IcsError> {
        match property {
            "DTSTART" => {
                let raw = value.get(..8).unwrap_or(value);
                let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
                    IcsError::Malformed {
                        line,
                        reason: format!("bad DTSTART {value:?}: {e}"),
                    }
                })?;
                self.date = Some(date);
            }
            "SUMMARY" => self.summary = Some(unescape_text(value)),
            "DESCRIPTION" => self.description = Some(unescape_text(value)),
            _ => {}
        }
        Ok(())
    }

    fn finish(self, index: usize) -> Result<IcsEvent, IcsError> {
        let date = self.date.ok_or(IcsError::MissingProperty {
            index,
            property: "DTSTART",
        })?;
        Ok(IcsEvent {
            date,
            summary: self.summary.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }
}

/// Escapes a TEXT value: backslash, semicolon, comma and newline
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            // CRLF and lone CR both end one line
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str("\\n");
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Reverses [`escape_text`]; unknown escapes keep the escaped character
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Appends `line` folded to `MAX_LINE_OCTETS`, never splitting a character
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}

/// Joins continuation lines, yielding (first physical line number, logical line)
fn unfold(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = raw.strip_prefix([' ', '\t']) {
            if let Some((_, last)) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        if !raw.is_empty() {
            lines.push((idx + 1, raw.to_owned()));
        }
    }
    lines
}

/// Splits `NAME;PARAM=x:VALUE` into the upper-cased name and the raw value
fn split_property(line: &str) -> Option<(String, &str)> {
    let colon = line.find(':')?;
    let (head, value) = (&line[..colon], &line[colon + 1..]);
    let name = head.split(';').next().unwrap_or(head);
    Some((name.to_ascii_uppercase(), value))
}
