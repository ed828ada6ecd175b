//! Phrase cleanup and coarse splitting
//!
//! Raw dictionary fields mix the actual gloss with annotations: bracketed
//! remarks, usage examples, subject categories like `«BOT»`, clipped
//! abbreviations (`sth.`, `sb.`) and several senses glued together with
//! separators. The functions here peel those layers off one at a time.
//! They are pure string transformations and are shared by the source and
//! the target side of an entry.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^(]*?\)").unwrap());
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\[]*?\]").unwrap());

/// Separators between senses or alternatives: punctuation, the `-<-<`
/// and `»` markers, ` or `, and numbered senses (`… 2 …`)
static PHRASE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;,/،]|-<-<|\||»+| or |. [0-9]+").unwrap());

static EXAMPLE_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"e\.g\..*").unwrap());
static CATEGORY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"«[A-Z]+»").unwrap());

/// Malformed category markers seen in the dumps
const BROKEN_CATEGORY_MARKERS: [&str; 3] = ["«MEC]", "«TEX]", "«СINE»"];

/// Abbreviations in application order, with their expansions
static ABBREVIATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"([^\w]|^)smth\.", "${1}something"),
        (r"([^\w]|^)sth\.", "${1}something"),
        (r"([^\w]|^)smb\.", "${1}somebody"),
        (r"([^\w]|^)sb\.", "${1}somebody"),
        (r"([^\w]|^)esp\. ", "${1}especially "),
        (r"([^\w]|^)th\. ", "${1}the "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Remove `( … )` and `[ … ]` groups, innermost first, until nothing changes
pub fn strip_parens(s: &str) -> String {
    let mut current = s.to_string();
    loop {
        let without_parens = PARENTHESIZED.replace_all(&current, "");
        let next = BRACKETED.replace_all(&without_parens, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Collapse runs of whitespace into a single space and trim the ends
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Spell out the clipped abbreviations dictionaries love (`sth.`, `sb.`, ...)
pub fn expand_abbreviations(s: &str) -> String {
    ABBREVIATIONS
        .iter()
        .fold(s.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

/// Clean the source side of an entry
pub fn clean_source(s: &str) -> String {
    normalize_whitespace(&strip_parens(s))
}

/// Clean the target side of an entry
///
/// Usage examples come after `e.g.` and are dropped together with
/// everything that follows them.
pub fn clean_target(s: &str) -> String {
    let stripped = strip_parens(s);
    let stripped = EXAMPLE_TAIL.replace(&stripped, "");
    let mut stripped = CATEGORY_MARKER.replace_all(&stripped, "").into_owned();
    for marker in BROKEN_CATEGORY_MARKERS {
        stripped = stripped.replace(marker, "");
    }
    expand_abbreviations(&normalize_whitespace(&stripped))
}

/// Split a field into its alternatives
///
/// Pieces are returned untrimmed and may be empty; callers trim and filter.
pub fn split_phrases(s: &str) -> Vec<String> {
    PHRASE_SEPARATOR.split(s).map(String::from).collect()
}

/// True for glosses the lexicographer marked as doubtful, or that quote
/// an example rather than translate
pub fn is_unsure(target: &str) -> bool {
    target.contains("??") || target.contains('"')
}

/// Drop gloss boilerplate: infinitive `to`, copula `be`, placeholders and
/// dialect markers
///
/// `to` is only removed when the next word starts lowercase, so
/// prepositional glosses like `to Beijing` keep it.
pub fn strip_gloss_prefixes(target: &str) -> String {
    let mut gloss = target;
    if gloss.chars().nth(3).is_some_and(char::is_lowercase) {
        gloss = gloss.strip_prefix("to ").unwrap_or(gloss);
    }
    gloss = gloss.strip_prefix("be ").unwrap_or(gloss);
    if gloss == "NO_GLOSS" {
        gloss = "";
    }
    gloss = gloss.strip_prefix("dial> ").unwrap_or(gloss);
    gloss.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("apple (fruit)", "apple ")]
    #[case("a (b (c) d) e", "a  e")]
    #[case("x [y] z", "x  z")]
    #[case("[a (b)] c", " c")]
    #[case("a (unclosed", "a (unclosed")]
    #[case("no annotations", "no annotations")]
    fn test_strip_parens(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_parens(input), expected);
    }

    #[rstest]
    #[case("to give sth. to sb.", "to give something to somebody")]
    #[case("smth. smb.", "something somebody")]
    #[case("esp. children", "especially children")]
    #[case("th. end", "the end")]
    #[case("booth. end", "booth. end")]
    #[case("health.", "health.")]
    fn test_expand_abbreviations(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(expand_abbreviations(input), expected);
    }

    #[test]
    fn test_clean_target_drops_annotations() {
        assert_eq!(
            clean_target("«BOT» a kind of  plant (rare) e.g. grows in the desert"),
            "a kind of plant"
        );
        assert_eq!(clean_target("«TEX] loom"), "loom");
    }

    #[test]
    fn test_clean_source_normalizes() {
        assert_eq!(clean_source("  ئالما   (n.) "), "ئالما");
    }

    #[test]
    fn test_split_phrases_on_all_separators() {
        let parts: Vec<String> = split_phrases("a; b, c/d|e -<-< f»»g or h")
            .into_iter()
            .map(|p| p.trim().to_string())
            .collect();
        assert_eq!(parts, vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
    }

    #[test]
    fn test_split_phrases_on_sense_numbers() {
        assert_eq!(split_phrases("first sense 2 second"), vec!["first sens", " second"]);
    }

    #[rstest]
    #[case("to eat", "eat")]
    #[case("to Beijing", "to Beijing")]
    #[case("be afraid", "afraid")]
    #[case("to be afraid", "afraid")]
    #[case("NO_GLOSS", "")]
    #[case("dial> sheep", "sheep")]
    #[case("tomato", "tomato")]
    fn test_strip_gloss_prefixes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_gloss_prefixes(input), expected);
    }

    #[test]
    fn test_unsure_targets() {
        assert!(is_unsure("maybe ??"));
        assert!(is_unsure("say \"hello\""));
        assert!(!is_unsure("hello"));
    }
}
