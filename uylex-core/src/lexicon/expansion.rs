//! Paradigm expansion
//!
//! Derives inflected entries from base entries using the noun suffixes of a
//! [`SuffixGrammar`]:
//!
//! - adjectivizers attach to the source, the target becomes its pertainym
//!   (`gold` → `golden`) or stays as is;
//! - prefixers attach to the source and prepend English (`in house`);
//! - suffixers attach to the source and append English (`house 's`).

use crate::lexicon::entry::LexEntry;
use crate::lexicon::grammar::{Pertainyms, SuffixGrammar};
use once_cell::sync::Lazy;
use regex::Regex;

static LOCATIVE_PREPOSITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(in|on)\b").unwrap());

/// Origins whose prefixed forms skip `in`/`on` glosses by default
pub const DEFAULT_SKIP_CATEGORIES: &[&str] = &["PER"];

pub struct Expander {
    grammar: SuffixGrammar,
    pertainyms: Pertainyms,
    skip_categories: Vec<String>,
}

impl Expander {
    pub fn new(grammar: SuffixGrammar, pertainyms: Pertainyms) -> Self {
        Expander {
            grammar,
            pertainyms,
            skip_categories: DEFAULT_SKIP_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Replace the origins for which `in`/`on` prefixes are not generated
    pub fn with_skip_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    fn skips_prefix(&self, origin: &str, prefix: &str) -> bool {
        self.skip_categories.iter().any(|category| category == origin)
            && LOCATIVE_PREPOSITION.is_match(prefix)
    }

    /// The entry itself followed by all its derived forms
    pub fn expand(&self, entry: &LexEntry) -> Vec<LexEntry> {
        let LexEntry {
            source,
            origin,
            target,
        } = entry;
        let mut expanded = vec![entry.clone()];

        let adjective = self.pertainyms.adjective(target).unwrap_or(target.as_str());
        for suffix in &self.grammar.adjectivizers {
            expanded.push(LexEntry::new(format!("{source}{suffix}"), origin.as_str(), adjective));
        }
        for (suffix, prefix) in &self.grammar.prefixers {
            if self.skips_prefix(origin, prefix) {
                continue;
            }
            expanded.push(LexEntry::new(
                format!("{source}{suffix}"),
                origin.as_str(),
                format!("{prefix}{target}"),
            ));
        }
        for (suffix, english) in &self.grammar.suffixers {
            expanded.push(LexEntry::new(
                format!("{source}{suffix}"),
                origin.as_str(),
                format!("{target}{english}"),
            ));
        }
        expanded
    }

    /// Expand every entry in order
    pub fn expand_all<'a, I>(&'a self, entries: I) -> impl Iterator<Item = LexEntry> + 'a
    where
        I: IntoIterator<Item = &'a LexEntry>,
        I::IntoIter: 'a,
    {
        entries.into_iter().flat_map(move |entry| self.expand(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn expander() -> Expander {
        let grammar = SuffixGrammar {
            adjectivizers: vec!["لىق".to_string()],
            prefixers: vec![
                ("دا".to_string(), "in ".to_string()),
                ("دىن".to_string(), "from ".to_string()),
            ],
            suffixers: vec![("نىڭ".to_string(), " 's".to_string())],
        };
        let pertainyms = Pertainyms::parse("::s-noun gold ::t-adj golden\n");
        Expander::new(grammar, pertainyms)
    }

    fn render(entries: impl Iterator<Item = LexEntry>) -> String {
        entries.map(|entry| format!("{entry}\n")).collect()
    }

    #[test]
    fn test_expand_entry() {
        let entry = LexEntry::new("ئالتۇن", "DICT", "gold");
        assert_snapshot!(render(expander().expand(&entry).into_iter()), @r"
        ئالتۇن	DICT	gold
        ئالتۇنلىق	DICT	golden
        ئالتۇندا	DICT	in gold
        ئالتۇندىن	DICT	from gold
        ئالتۇننىڭ	DICT	gold 's
        ");
    }

    #[test]
    fn test_person_names_skip_locative_prefixes() {
        let entry = LexEntry::new("ئەخمەت", "PER", "Ahmet");
        let targets: Vec<String> = expander()
            .expand(&entry)
            .into_iter()
            .map(|entry| entry.target)
            .collect();
        assert_eq!(targets, vec!["Ahmet", "Ahmet", "from Ahmet", "Ahmet 's"]);
    }

    #[test]
    fn test_custom_skip_categories() {
        let expander = expander().with_skip_categories(Vec::<String>::new());
        let entry = LexEntry::new("ئەخمەت", "PER", "Ahmet");
        assert_eq!(expander.expand(&entry).len(), 5);
    }

    #[test]
    fn test_expand_all_keeps_order() {
        let entries = vec![
            LexEntry::new("ئات", "DICT", "horse"),
            LexEntry::new("ئۆي", "DICT", "house"),
        ];
        let expanded: Vec<LexEntry> = expander().expand_all(&entries).collect();
        assert_eq!(expanded.len(), 10);
        assert_eq!(expanded[0], entries[0]);
        assert_eq!(expanded[5], entries[1]);
    }
}
