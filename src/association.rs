//! Code-to-words lookup table.
//!
//! Each row of the source CSV is `code, primary[, alternate...]`. Rows with
//! fewer than two fields, or whose words are all blank, are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{DayCode, NO_ASSOCIATION};

/// Error raised while loading an association table.
#[derive(Debug, thiserror::Error)]
pub enum AssociationError {
    /// The source file could not be opened.
    #[error("failed to open association table {}", path.display())]
    Open {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV stream could not be decoded.
    #[error("malformed association table: {0}")]
    Csv(#[from] csv::Error),
}

/// Words attached to one code. A missing code yields the placeholder
/// [`NO_ASSOCIATION`] with no alternates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association<'a> {
    pub primary:    &'a str,
    pub alternates: &'a [String],
}

impl Association<'_> {
    /// True when the code had no entry in the table
    pub fn is_placeholder(&self) -> bool {
        self.primary == NO_ASSOCIATION && self.alternates.is_empty()
    }
}

/// Read-only mapping from rendered codes (`"001"`) to ordered word lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationTable {
    entries: HashMap<String, Vec<String>>,
}

impl AssociationTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a table from a CSV file on disk
    ///
    /// # Errors
    /// Returns `AssociationError::Open` if the file cannot be opened and
    /// `AssociationError::Csv` if a record cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssociationError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AssociationError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), entries = table.len(), "loaded association table");
        Ok(table)
    }

    /// Loads a table from any CSV byte stream (no header row)
    ///
    /// # Errors
    /// Returns `AssociationError::Csv` if a record cannot be read.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, AssociationError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = Self::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            if record.len() < 2 {
                debug!(row = row_idx + 1, "skipping row with fewer than two fields");
                continue;
            }

            let code = record.get(0).map(str::trim).unwrap_or_default();
            let words: Vec<String> = record
                .iter()
                .skip(1)
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .map(str::to_owned)
                .collect();

            if !table.insert(code, words) {
                debug!(row = row_idx + 1, code, "skipping row without words");
            }
        }
        Ok(table)
    }

    /// Stores the words for `code`, replacing any earlier entry. Line breaks
    /// inside a word are stored as `\n`.
    /// Returns `false` and stores nothing when `words` is empty.
    pub fn insert(&mut self, code: impl Into<String>, words: Vec<String>) -> bool {
        if words.is_empty() {
            return false;
        }
        let words = words.iter().map(|word| normalize_line_breaks(word)).collect();
        self.entries.insert(code.into(), words);
        true
    }

    /// Returns the number of stored codes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no code has any words
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw words stored under a rendered code
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Words for `code`, falling back to the placeholder on a miss
    pub fn lookup(&self, code: DayCode) -> Association<'_> {
        match self.get(&code.to_string()).and_then(<[String]>::split_first) {
            Some((primary, alternates)) => Association {
                primary: primary.as_str(),
                alternates,
            },
            None => Association {
                primary:    NO_ASSOCIATION,
                alternates: &[],
            },
        }
    }

    /// Primary word for `code`, or the placeholder
    pub fn primary(&self, code: DayCode) -> &str {
        self.lookup(code).primary
    }
}

impl<K, S> FromIterator<(K, Vec<S>)> for AssociationTable
where
    K: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<S>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, words) in iter {
            table.insert(code, words.into_iter().map(Into::into).collect());
        }
        table
    }
}

/// Rewrites CRLF and lone CR as `\n`
fn normalize_line_breaks(word: &str) -> String {
    word.replace("\r\n", "\n").replace('\r', "\n")
}
