//! Flat dictionary normalizer
//!
//! Turns a raw flat dictionary dump (`source<TAB>origin<TAB>target`, with
//! free-text targets full of annotations) into a lexicon of short phrase
//! pairs. The work happens in three transform stages:
//!
//! 1. [`CharsetSanitation`]: derive the strippable character set from the
//!    input and sanitize every line.
//! 2. [`EntryCleaning`]: parse entries, clean both sides, split them into
//!    alternatives and glosses, and drop what is unusable.
//! 3. [`SenseResolution`]: resolve cross-references through the alias
//!    graph, optionally prefer capitalized variants or derive word-level
//!    singletons, and deduplicate.
//!
//! The result keeps the original entries next to the normalized ones so an
//! explanation report can show, per source word, what went in and what
//! came out.

use crate::lexicon::entry::LexEntry;
use crate::lexicon::senses::{Gloss, GlossMap};
use crate::lexicon::sentences::{RuleSplitter, SentenceSplitter};
use crate::lexicon::transforms::stages::{CharsetSanitation, EntryCleaning, SenseResolution};
use crate::lexicon::transforms::{Transform, TransformError};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Knobs of the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Split sources and targets on separators (`,` `;` `/` ` or ` ...)
    pub split: bool,
    /// Maximum number of words of a target after splitting
    pub target_limit: usize,
    /// Maximum number of words of a raw target; longer entries are dropped
    /// before any cleaning
    pub early_target_limit: usize,
    /// Emit word-level pairs derived from multi-word entries instead of
    /// the entries themselves
    pub singletons: bool,
    /// Replace lowercased glosses by their capitalized variants
    pub remove_lowercased: bool,
    /// Split targets into sentences
    pub sentence_split: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            split: true,
            target_limit: 4,
            early_target_limit: 20,
            singletons: false,
            remove_lowercased: false,
            sentence_split: true,
        }
    }
}

/// Counters reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    /// Lines that are not `source<TAB>origin<TAB>target`
    pub bad: usize,
    /// Raw entries and glosses dropped for having too many words
    pub too_many_words: usize,
    /// Lines in the normalized lexicon
    pub written: usize,
}

impl fmt::Display for NormalizeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bad {} too many target words {} wrote",
            self.bad, self.too_many_words, self.written
        )
    }
}

/// Input lines after character-set sanitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedLexicon {
    pub lines: Vec<String>,
    pub strippables: BTreeSet<char>,
}

/// Entries after cleaning and splitting, before sense resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedLexicon {
    /// Raw source → raw glosses, sanitized and NFKC-composed
    pub original: GlossMap,
    /// Cleaned source → cleaned glosses
    pub cleaned: GlossMap,
    pub stats: NormalizeStats,
}

/// The normalizer's result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedLexicon {
    /// Raw source → raw glosses, sanitized and NFKC-composed
    pub original: GlossMap,
    /// Source → sorted, deduplicated glosses
    pub result: BTreeMap<String, BTreeSet<Gloss>>,
    pub stats: NormalizeStats,
}

impl NormalizedLexicon {
    /// Normalized entries, sorted by source, origin and target
    pub fn entries(&self) -> impl Iterator<Item = LexEntry> + '_ {
        self.result.iter().flat_map(|(source, glosses)| {
            glosses
                .iter()
                .map(move |gloss| LexEntry::new(source.clone(), gloss.origin.clone(), gloss.target.clone()))
        })
    }

    /// Write the normalized lexicon, one entry per line
    pub fn write_lexicon<W: Write>(&self, mut out: W) -> io::Result<()> {
        for entry in self.entries() {
            writeln!(out, "{}", entry)?;
        }
        Ok(())
    }

    /// Write the explanation report
    ///
    /// For every source seen in the input or produced in the output, in
    /// sorted order:
    ///
    /// ```text
    /// »source«
    /// (original)
    ///   raw target
    /// (result)
    ///   normalized target
    ///
    /// ```
    pub fn write_explanation<W: Write>(&self, mut out: W) -> io::Result<()> {
        let sources: BTreeSet<&String> = self.original.keys().chain(self.result.keys()).collect();
        for source in sources {
            writeln!(out, "»{}«", source)?;
            writeln!(out, "(original)")?;
            let mut original: Vec<&Gloss> = self.original.get(source).into_iter().flatten().collect();
            original.sort();
            for gloss in original {
                writeln!(out, "  {}", gloss.target)?;
            }
            writeln!(out, "(result)")?;
            for gloss in self.result.get(source).into_iter().flatten() {
                writeln!(out, "  {}", gloss.target)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Builds and runs the normalization pipeline
pub struct Normalizer {
    transform: Transform<String, NormalizedLexicon>,
}

impl Normalizer {
    /// Normalizer with the rule-based sentence splitter
    pub fn new(options: NormalizeOptions) -> Self {
        Self::with_splitter(options, RuleSplitter::new())
    }

    /// Normalizer with a custom sentence splitter
    pub fn with_splitter<S>(options: NormalizeOptions, splitter: S) -> Self
    where
        S: SentenceSplitter + Send + Sync + 'static,
    {
        let splitter: Arc<dyn SentenceSplitter + Send + Sync> = Arc::new(splitter);
        let transform = Transform::from_fn(|source: String| Ok(source))
            .then(CharsetSanitation::new())
            .then(EntryCleaning::new(options, splitter))
            .then(SenseResolution::new(options));
        Normalizer { transform }
    }

    /// The underlying transform, for use with a
    /// [`LexiconLoader`](crate::lexicon::loader::LexiconLoader)
    pub fn transform(&self) -> &Transform<String, NormalizedLexicon> {
        &self.transform
    }

    pub fn into_transform(self) -> Transform<String, NormalizedLexicon> {
        self.transform
    }

    /// Normalize a whole flat dictionary
    pub fn normalize(&self, source: &str) -> Result<NormalizedLexicon, TransformError> {
        self.transform.run(source.to_string())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}
