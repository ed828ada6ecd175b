//! Fine target splitting
//!
//! After coarse splitting on separators, a target can still hold several
//! glosses written as sentences (`A small house. A hut`). These are broken
//! apart with a [`SentenceSplitter`].
//!
//! Sentence splitters are not idempotent in general: splitting a sentence
//! that came out of a split may split it again, and a trailing period can
//! change the outcome. [`split_fine`] therefore splits recursively and
//! tries the input with an extra period and without its final mark,
//! keeping whichever variant yields more sentences.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static TRAILING_PERIOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^\.A-Z])\.$").unwrap());
static ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.+").unwrap());

/// Something that breaks text into sentences
pub trait SentenceSplitter {
    /// Split `text` into trimmed, non-empty sentences
    fn sentences(&self, text: &str) -> Vec<String>;
}

impl<F> SentenceSplitter for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn sentences(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Words that end in a period without ending a sentence
const ABBREVIATIONS: &[&str] = &[
    "approx", "cf", "dr", "e.g", "esp", "etc", "fig", "i.e", "jr", "lit", "mr", "mrs", "ms",
    "no", "prof", "sb", "smb", "smth", "sr", "st", "sth", "vs",
];

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '”', '’', '»'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '“', '‘', '«'];

/// Punctuation-driven English sentence splitter
///
/// Candidate boundaries come from Unicode sentence segmentation (UAX #29).
/// A candidate is kept when the text before it ends in a run of `.`, `!`
/// or `?` (optionally followed by closing quotes or brackets) and
/// whitespace, and the text after it starts with something that can start
/// a sentence: an uppercase letter, a digit or an opening quote/bracket.
/// A lone period after a known abbreviation or a single-letter initial is
/// not a boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSplitter;

impl RuleSplitter {
    pub fn new() -> Self {
        RuleSplitter
    }

    fn can_start_sentence(c: char) -> bool {
        c.is_uppercase() || c.is_ascii_digit() || OPENERS.contains(&c)
    }

    /// True if `before`, the text preceding a period, ends in an
    /// abbreviation or an initial
    fn is_abbreviation(before: &str) -> bool {
        let word = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(OPENERS);
        let lower = word.to_lowercase();
        ABBREVIATIONS.contains(&lower.as_str())
            || (word.chars().count() == 1 && word.chars().all(char::is_alphabetic))
    }

    /// True if `candidate` (trailing whitespace removed) ends a sentence
    fn ends_sentence(candidate: &str) -> bool {
        let body = candidate.trim_end_matches(CLOSERS);
        if !body.ends_with(TERMINATORS) {
            return false;
        }
        let stem = body.trim_end_matches(TERMINATORS);
        let lone_period = body.ends_with('.') && body.len() - stem.len() == 1;
        !(lone_period && Self::is_abbreviation(stem))
    }
}

impl SentenceSplitter for RuleSplitter {
    fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for (offset, segment) in text.split_sentence_bound_indices() {
            let end = offset + segment.len();
            let Some(next) = text[end..].chars().next() else {
                break;
            };
            let chunk = &text[start..end];
            let candidate = chunk.trim_end();
            if candidate.len() < chunk.len()
                && Self::can_start_sentence(next)
                && Self::ends_sentence(candidate)
            {
                let sentence = candidate.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = end;
            }
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }
}

/// Break a coarse target into its glosses
///
/// Cross-references (`see …`) that contain non-ASCII text are left whole,
/// since the referenced word must survive intact for sense resolution.
/// Every resulting sentence is clipped (see [`clip_sentence`]); sentences
/// that clip down to nothing are dropped.
pub fn split_fine<S: SentenceSplitter + ?Sized>(splitter: &S, target: &str) -> Vec<String> {
    let target = target.trim();
    if target.is_empty() {
        return Vec::new();
    }

    let sentences = if target.starts_with("see ") && !target.is_ascii() {
        vec![target.to_string()]
    } else {
        rejoin_dangling(split_recursively(splitter, target))
    };

    sentences.iter().filter_map(|s| clip_sentence(s)).collect()
}

fn split_recursively<S: SentenceSplitter + ?Sized>(splitter: &S, text: &str) -> Vec<String> {
    let text = text.trim();
    let mut sentences = splitter.sentences(text);

    let with_period = splitter.sentences(&format!("{text}."));
    if with_period.len() > sentences.len() {
        sentences = with_period;
        if let Some(last) = sentences.last_mut() {
            last.pop();
        }
        if sentences.last().is_some_and(|last| last.is_empty()) {
            sentences.pop();
        }
    }

    if text.chars().count() > 1 {
        if let Some(mark) = text.chars().last().filter(|c| TERMINATORS.contains(c)) {
            let without_mark = &text[..text.len() - mark.len_utf8()];
            let mut alternative = splitter.sentences(without_mark);
            if alternative.len() > sentences.len() {
                if let Some(last) = alternative.last_mut() {
                    last.push(mark);
                }
                sentences = alternative;
            }
        }
    }

    if sentences.len() == 1 {
        return vec![text.to_string()];
    }
    sentences
        .iter()
        .flat_map(|sentence| split_recursively(splitter, sentence))
        .collect()
}

/// Glue a sentence back onto its predecessor when the split happened right
/// after a dash or an apostrophe
fn rejoin_dangling(sentences: Vec<String>) -> Vec<String> {
    let mut joined: Vec<String> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        match joined.last_mut() {
            Some(previous) if previous.ends_with(['–', '\'']) => {
                previous.push(' ');
                previous.push_str(&sentence);
            }
            _ => joined.push(sentence),
        }
    }
    joined
}

/// Drop a sentence-final period (but not the one closing an acronym like
/// `U.S.`), delete ellipses and trim. Returns `None` if nothing but periods
/// would remain.
pub fn clip_sentence(sentence: &str) -> Option<String> {
    let clipped = TRAILING_PERIOD.replace(sentence, "${1}");
    let clipped = ELLIPSIS.replace_all(&clipped, "");
    let clipped = clipped.trim();
    if clipped.replace('.', "").is_empty() {
        None
    } else {
        Some(clipped.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("He left. She stayed.", vec!["He left.", "She stayed."])]
    #[case("Stop! Who goes there?", vec!["Stop!", "Who goes there?"])]
    #[case("Mr. Smith arrived.", vec!["Mr. Smith arrived."])]
    #[case("J. R. R. Tolkien", vec!["J. R. R. Tolkien"])]
    #[case("a house. a hut", vec!["a house. a hut"])]
    #[case("He said \"Go.\" Then he left", vec!["He said \"Go.\"", "Then he left"])]
    #[case("It costs 1.5 dollars. Cheap", vec!["It costs 1.5 dollars.", "Cheap"])]
    #[case("Done!Next", vec!["Done!Next"])]
    #[case("Cafe\u{301}. Noir", vec!["Cafe\u{301}.", "Noir"])]
    #[case("   ", vec![])]
    fn test_rule_splitter(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(RuleSplitter::new().sentences(text), expected);
    }

    #[test]
    fn test_split_fine_separates_and_clips() {
        let splitter = RuleSplitter::new();
        assert_eq!(
            split_fine(&splitter, "A small house. The hut"),
            vec!["A small house", "The hut"]
        );
    }

    #[test]
    fn test_split_fine_leaves_foreign_references_alone() {
        let splitter = RuleSplitter::new();
        assert_eq!(
            split_fine(&splitter, "see ئالما. Also"),
            vec!["see ئالما. Also"]
        );
    }

    #[test]
    fn test_split_fine_empty() {
        assert!(split_fine(&RuleSplitter::new(), "  ").is_empty());
    }

    #[test]
    fn test_split_fine_tries_an_extra_period() {
        // Only splits text that ends in a period
        let splitter = |text: &str| -> Vec<String> {
            if text.ends_with('.') {
                text.split(". ").map(String::from).collect()
            } else {
                vec![text.to_string()]
            }
        };
        assert_eq!(split_fine(&splitter, "one. two"), vec!["one", "two"]);
    }

    #[test]
    fn test_split_fine_tries_without_final_mark() {
        // Only splits text that does not end in a question mark or period
        let splitter = |text: &str| -> Vec<String> {
            if text.ends_with(['?', '.']) {
                vec![text.to_string()]
            } else {
                text.split("; ").map(String::from).collect()
            }
        };
        assert_eq!(split_fine(&splitter, "who; what?"), vec!["who", "what?"]);
    }

    #[test]
    fn test_split_fine_rejoins_after_dash() {
        let splitter = |text: &str| -> Vec<String> {
            text.split(" | ").map(String::from).collect()
        };
        assert_eq!(split_fine(&splitter, "well – | fine"), vec!["well – fine"]);
    }

    #[rstest]
    #[case("word.", Some("word"))]
    #[case("U.S.", Some("U.S."))]
    #[case("and so on...", Some("and so on"))]
    #[case("...", None)]
    #[case(".", None)]
    #[case("  spaced  ", Some("spaced"))]
    fn test_clip_sentence(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(clip_sentence(input).as_deref(), expected);
    }
}
