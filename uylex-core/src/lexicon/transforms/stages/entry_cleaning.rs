//! Entry cleaning stage
//!
//! Parses sanitized lines into entries and reduces each entry to short
//! `(source, gloss)` pairs: annotations are removed, both sides are split
//! into alternatives, targets are split into sentences, and glosses that
//! are doubtful, empty or too long are dropped.

use crate::lexicon::cleaning::{
    clean_source, clean_target, is_unsure, split_phrases, strip_gloss_prefixes, word_count,
};
use crate::lexicon::entry::LexEntry;
use crate::lexicon::normalizer::{CleanedLexicon, NormalizeOptions, SanitizedLexicon};
use crate::lexicon::senses::Gloss;
use crate::lexicon::sentences::{split_fine, SentenceSplitter};
use crate::lexicon::transforms::{Runnable, TransformError};
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// Entry cleaning stage
///
/// # Input
/// - `SanitizedLexicon` - sanitized lines
///
/// # Output
/// - `CleanedLexicon` - original and cleaned gloss maps, with counters
pub struct EntryCleaning {
    options: NormalizeOptions,
    splitter: Arc<dyn SentenceSplitter + Send + Sync>,
}

impl EntryCleaning {
    pub fn new(options: NormalizeOptions, splitter: Arc<dyn SentenceSplitter + Send + Sync>) -> Self {
        EntryCleaning { options, splitter }
    }

    fn alternatives(&self, field: String) -> Vec<String> {
        if self.options.split {
            split_phrases(&field)
        } else {
            vec![field]
        }
    }

    fn glosses(&self, coarse: &str) -> Vec<String> {
        if self.options.sentence_split {
            split_fine(self.splitter.as_ref(), coarse)
        } else {
            vec![coarse.trim().to_string()]
        }
    }

    fn clean_entry(&self, entry: &LexEntry, lexicon: &mut CleanedLexicon) {
        let sources = self.alternatives(clean_source(&entry.source));
        let targets = self.alternatives(clean_target(&entry.target));
        let origin: String = entry.origin.nfkc().collect();

        for source in &sources {
            let source: String = source.trim().nfkc().collect();
            for coarse in targets.iter().filter(|t| !is_unsure(t)) {
                for gloss in self.glosses(coarse) {
                    let gloss = strip_gloss_prefixes(&gloss);
                    if gloss.is_empty() || source.is_empty() {
                        continue;
                    }
                    if word_count(&gloss) > self.options.target_limit {
                        lexicon.stats.too_many_words += 1;
                        continue;
                    }
                    lexicon
                        .cleaned
                        .entry(source.clone())
                        .or_default()
                        .push(Gloss::new(origin.clone(), gloss.nfkc().collect::<String>()));
                }
            }
        }
    }
}

impl Runnable<SanitizedLexicon, CleanedLexicon> for EntryCleaning {
    fn run(&self, input: SanitizedLexicon) -> Result<CleanedLexicon, TransformError> {
        let mut lexicon = CleanedLexicon::default();

        for line in &input.lines {
            let entry = match LexEntry::parse(line) {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(line = %line, error = %err, "skipping malformed line");
                    lexicon.stats.bad += 1;
                    continue;
                }
            };

            lexicon
                .original
                .entry(entry.source.nfkc().collect())
                .or_default()
                .push(Gloss::new(
                    entry.origin.nfkc().collect::<String>(),
                    entry.target.nfkc().collect::<String>(),
                ));

            if word_count(&entry.target) > self.options.early_target_limit {
                lexicon.stats.too_many_words += 1;
                continue;
            }
            self.clean_entry(&entry, &mut lexicon);
        }

        tracing::info!(
            sources = lexicon.cleaned.len(),
            bad = lexicon.stats.bad,
            too_many_words = lexicon.stats.too_many_words,
            "cleaned entries"
        );
        Ok(lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::sentences::RuleSplitter;
    use std::collections::BTreeSet;

    fn sanitized(lines: &[&str]) -> SanitizedLexicon {
        SanitizedLexicon {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            strippables: BTreeSet::new(),
        }
    }

    fn stage(options: NormalizeOptions) -> EntryCleaning {
        EntryCleaning::new(options, Arc::new(RuleSplitter::new()))
    }

    #[test]
    fn test_splits_both_sides() {
        let result = stage(NormalizeOptions::default())
            .run(sanitized(&["a, b\tDICT\tto eat; to drink"]))
            .unwrap();

        let expected = vec![Gloss::new("DICT", "eat"), Gloss::new("DICT", "drink")];
        assert_eq!(result.cleaned.get("a"), Some(&expected));
        assert_eq!(result.cleaned.get("b"), Some(&expected));
        assert_eq!(result.original.get("a, b").map(Vec::len), Some(1));
    }

    #[test]
    fn test_skips_unsure_and_empty_glosses() {
        let result = stage(NormalizeOptions::default())
            .run(sanitized(&["a\tDICT\t??; \"quoted\"; NO_GLOSS; (only a remark); real"]))
            .unwrap();

        assert_eq!(result.cleaned.get("a"), Some(&vec![Gloss::new("DICT", "real")]));
    }

    #[test]
    fn test_sentence_split_toggle() {
        let line = "a\tDICT\tA hut. The shed";
        let split = stage(NormalizeOptions::default())
            .run(sanitized(&[line]))
            .unwrap();
        assert_eq!(split.cleaned["a"].len(), 2);

        let options = NormalizeOptions {
            sentence_split: false,
            ..NormalizeOptions::default()
        };
        let unsplit = stage(options).run(sanitized(&[line])).unwrap();
        assert_eq!(unsplit.cleaned["a"], vec![Gloss::new("DICT", "A hut. The shed")]);
    }

    #[test]
    fn test_counts() {
        let result = stage(NormalizeOptions::default())
            .run(sanitized(&["broken line", "", "a\tDICT\tone two three four five"]))
            .unwrap();

        assert_eq!(result.stats.bad, 2);
        assert_eq!(result.stats.too_many_words, 1);
        assert!(result.cleaned.is_empty());
        assert_eq!(result.original.len(), 1);
    }
}
