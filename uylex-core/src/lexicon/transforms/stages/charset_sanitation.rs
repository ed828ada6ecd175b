//! Character-set sanitation stage
//!
//! Derives the strippable character set from the whole input and applies
//! the global cleanup to every line.

use crate::lexicon::charset::{sanitize_line, split_lines, strippable_chars};
use crate::lexicon::normalizer::SanitizedLexicon;
use crate::lexicon::transforms::{Runnable, TransformError};

/// Character-set sanitation stage
///
/// # Input
/// - `String` - the raw flat dictionary
///
/// # Output
/// - `SanitizedLexicon` - sanitized lines plus the set of stripped characters
pub struct CharsetSanitation;

impl CharsetSanitation {
    pub fn new() -> Self {
        CharsetSanitation
    }
}

impl Default for CharsetSanitation {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, SanitizedLexicon> for CharsetSanitation {
    fn run(&self, input: String) -> Result<SanitizedLexicon, TransformError> {
        <Self as Runnable<&str, SanitizedLexicon>>::run(self, input.as_str())
    }
}

impl Runnable<&str, SanitizedLexicon> for CharsetSanitation {
    fn run(&self, input: &str) -> Result<SanitizedLexicon, TransformError> {
        let strippables = strippable_chars(input);
        let lines = split_lines(input)
            .into_iter()
            .map(|line| sanitize_line(line, &strippables))
            .collect();
        Ok(SanitizedLexicon { lines, strippables })
    }
}
