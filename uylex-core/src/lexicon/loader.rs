//! Lexicon loading utilities
//!
//! This module provides `LexiconLoader` - a utility for loading lexicon text
//! from files, strings or readers and running transforms on it. This is used
//! by both the CLI and tests.
//!
//! # Example
//!
//! ```rust
//! use uylex_core::lexicon::loader::LexiconLoader;
//! use uylex_core::lexicon::normalizer::NormalizeOptions;
//! use uylex_core::lexicon::transforms::standard::NORMALIZATION;
//!
//! // From file
//! let loader = LexiconLoader::from_path("dict.flat").unwrap();
//! let lexicon = loader.normalize(NormalizeOptions::default()).unwrap();
//!
//! // From string
//! let loader = LexiconLoader::from_string("ئات\tDICT\thorse\n");
//! let lexicon = loader.with(&NORMALIZATION).unwrap();
//! ```

use crate::lexicon::charset::split_lines;
use crate::lexicon::entry::{EntryError, LexEntry};
use crate::lexicon::normalizer::{NormalizeOptions, NormalizedLexicon, Normalizer};
use crate::lexicon::postag::{PosTag, UnknownTag};
use crate::lexicon::transforms::{Transform, TransformError};
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Error that can occur when loading lexicons
#[derive(Debug, Error)]
pub enum LoaderError {
    /// IO error when reading input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Transform error
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
    /// A line that is not a lexicon entry
    #[error("line {line}: {source}")]
    Entry { line: usize, source: EntryError },
    /// A line of a tag file that is not a part-of-speech tag
    #[error("line {line}: {source}")]
    Tag { line: usize, source: UnknownTag },
}

/// Lexicon loader with transform shortcuts
pub struct LexiconLoader {
    source: String,
}

impl LexiconLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(LexiconLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        LexiconLoader {
            source: source.into(),
        }
    }

    /// Load everything a reader yields (e.g. stdin)
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LoaderError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(LexiconLoader { source })
    }

    /// Run a custom transform on the source
    ///
    /// This is the generic method the shortcuts use internally.
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Normalize the source as a flat dictionary
    pub fn normalize(&self, options: NormalizeOptions) -> Result<NormalizedLexicon, LoaderError> {
        self.with(Normalizer::new(options).transform())
    }

    /// Parse every line of the source as a lexicon entry
    ///
    /// Unlike the normalizer, which counts and skips malformed lines, this
    /// fails on the first one, reporting its 1-based line number.
    pub fn entries(&self) -> Result<Vec<LexEntry>, LoaderError> {
        split_lines(&self.source)
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                LexEntry::parse(line).map_err(|source| LoaderError::Entry {
                    line: index + 1,
                    source,
                })
            })
            .collect()
    }

    /// Parse every line of the source as a part-of-speech tag
    pub fn tags(&self) -> Result<Vec<PosTag>, LoaderError> {
        split_lines(&self.source)
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                line.parse().map_err(|source| LoaderError::Tag {
                    line: index + 1,
                    source,
                })
            })
            .collect()
    }

    /// Source split into lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        split_lines(&self.source).into_iter()
    }

    /// Get a reference to the raw source string
    pub fn source_ref(&self) -> &str {
        &self.source
    }
}
