//! Lexicon entries
//!
//! Every stage exchanges lexicons as tab-separated lines of the form
//! `source<TAB>origin<TAB>target`. The origin column is carried through
//! untouched; it records where an entry came from (a dictionary name, or a
//! category such as `PER`).

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error raised when a line is not a well-formed lexicon entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("expected 3 tab-separated fields, found {found}")]
    FieldCount { found: usize },
}

/// One `source / origin / target` triple
///
/// Entries order by source, then origin, then target. String comparison in
/// Rust is by code point, which is the order the pipeline emits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LexEntry {
    pub source: String,
    pub origin: String,
    pub target: String,
}

impl LexEntry {
    pub fn new(
        source: impl Into<String>,
        origin: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        LexEntry {
            source: source.into(),
            origin: origin.into(),
            target: target.into(),
        }
    }

    /// Parse a lexicon line
    ///
    /// Surrounding whitespace is trimmed first, so trailing newlines and
    /// carriage returns are tolerated. Anything other than exactly three
    /// fields is rejected.
    pub fn parse(line: &str) -> Result<Self, EntryError> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        match fields.as_slice() {
            [source, origin, target] => Ok(LexEntry::new(*source, *origin, *target)),
            _ => Err(EntryError::FieldCount {
                found: fields.len(),
            }),
        }
    }

    /// Same entry with a different source
    pub fn with_source(&self, source: impl Into<String>) -> Self {
        LexEntry {
            source: source.into(),
            origin: self.origin.clone(),
            target: self.target.clone(),
        }
    }
}

impl fmt::Display for LexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.source, self.origin, self.target)
    }
}
