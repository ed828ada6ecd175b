//! Regex stemming of tagged lexicon entries
//!
//! Every entry comes with the head tag of its English side. Noun entries
//! are run through the noun stemming rules, verb entries through the verb
//! rules; each rule that changes the source yields a new entry carrying the
//! same tag.

use crate::lexicon::entry::LexEntry;
use crate::lexicon::grammar::StemRules;
use crate::lexicon::postag::PosTag;

pub struct Stemmer {
    rules: StemRules,
}

impl Stemmer {
    pub fn new(rules: StemRules) -> Self {
        for (category, rules) in [("noun", &rules.noun), ("verb", &rules.verb)] {
            for rule in rules {
                tracing::info!(category, rule = %rule, "stemming rule");
            }
        }
        Stemmer { rules }
    }

    /// Stemmed variants of one entry
    pub fn stem_entry(&self, entry: &LexEntry, tag: PosTag) -> Vec<LexEntry> {
        self.rules
            .for_tag(tag)
            .iter()
            .filter_map(|rule| rule.apply(&entry.source))
            .map(|source| entry.with_source(source))
            .collect()
    }

    /// Stemmed variants of aligned entries and tags
    ///
    /// Pairs up `entries` and `tags` line by line and stops at the end of
    /// the shorter one.
    pub fn stem<'a, E, T>(&'a self, entries: E, tags: T) -> impl Iterator<Item = (LexEntry, PosTag)> + 'a
    where
        E: IntoIterator<Item = &'a LexEntry>,
        E::IntoIter: 'a,
        T: IntoIterator<Item = PosTag>,
        T::IntoIter: 'a,
    {
        entries.into_iter().zip(tags).flat_map(move |(entry, tag)| {
            self.stem_entry(entry, tag)
                .into_iter()
                .map(move |stemmed| (stemmed, tag))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "\
::uig /(.*)لار$/$1/ ::synt lexical noun stemming
::uig /(.*)لەر$/$1/ ::synt lexical noun stemming
::uig /^(.*)ماق$/${1}/ ::synt lexical verb stemming
";

    fn stemmer() -> Stemmer {
        Stemmer::new(StemRules::parse(RULES).unwrap())
    }

    #[test]
    fn test_stem_by_tag() {
        let stemmer = stemmer();
        let entries = vec![
            LexEntry::new("ئاتلار", "DICT", "horses"),
            LexEntry::new("ئاتلار", "DICT", "horses"),
            LexEntry::new("بارماق", "DICT", "to go"),
        ];
        let tags = vec![PosTag::Noun, PosTag::Adj, PosTag::Verb];

        let stemmed: Vec<(LexEntry, PosTag)> = stemmer.stem(&entries, tags).collect();
        assert_eq!(
            stemmed,
            vec![
                (LexEntry::new("ئات", "DICT", "horses"), PosTag::Noun),
                (LexEntry::new("بار", "DICT", "to go"), PosTag::Verb),
            ]
        );
    }

    #[test]
    fn test_unchanged_sources_are_dropped() {
        let stemmer = stemmer();
        let entry = LexEntry::new("ئات", "DICT", "horse");
        assert!(stemmer.stem_entry(&entry, PosTag::Noun).is_empty());
    }

    #[test]
    fn test_stem_truncates_to_shorter_input() {
        let stemmer = stemmer();
        let entries = vec![
            LexEntry::new("ئاتلار", "DICT", "horses"),
            LexEntry::new("ئۆيلەر", "DICT", "houses"),
        ];
        let stemmed: Vec<_> = stemmer.stem(&entries, [PosTag::Noun]).collect();
        assert_eq!(stemmed.len(), 1);
    }
}
