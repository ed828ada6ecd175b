//! Sense resolution stage
//!
//! Resolves cross-references for every cleaned source and assembles the
//! final, deduplicated lexicon.

use crate::lexicon::normalizer::{CleanedLexicon, NormalizeOptions, NormalizedLexicon};
use crate::lexicon::senses::{prefer_uppercased, resolve, singletons, Gloss};
use crate::lexicon::transforms::{Runnable, TransformError};
use std::collections::BTreeSet;

/// Sense resolution stage
///
/// # Input
/// - `CleanedLexicon` - cleaned gloss map
///
/// # Output
/// - `NormalizedLexicon` - resolved glosses per source (or word-level
///   singletons), sorted and deduplicated
pub struct SenseResolution {
    options: NormalizeOptions,
}

impl SenseResolution {
    pub fn new(options: NormalizeOptions) -> Self {
        SenseResolution { options }
    }
}

impl Runnable<CleanedLexicon, NormalizedLexicon> for SenseResolution {
    fn run(&self, input: CleanedLexicon) -> Result<NormalizedLexicon, TransformError> {
        let CleanedLexicon {
            original,
            cleaned,
            mut stats,
        } = input;
        let mut lexicon = NormalizedLexicon::default();

        for source in cleaned.keys() {
            let mut glosses: BTreeSet<Gloss> = resolve(&cleaned, source).into_iter().collect();
            if self.options.remove_lowercased {
                glosses = prefer_uppercased(&glosses);
            }

            if self.options.singletons {
                for (word, gloss) in singletons(&cleaned, source, &glosses) {
                    lexicon.result.entry(word).or_default().insert(gloss);
                }
            } else {
                lexicon.result.insert(source.clone(), glosses);
            }
        }

        stats.written = lexicon.result.values().map(BTreeSet::len).sum();
        tracing::info!(
            sources = lexicon.result.len(),
            written = stats.written,
            "resolved senses"
        );

        lexicon.original = original;
        lexicon.stats = stats;
        Ok(lexicon)
    }
}
