//! Character-set sanitation
//!
//! Flat dictionary dumps are full of encoding debris: accent marks, soft
//! hyphens, stray symbols. Rather than keeping a hand-maintained blacklist,
//! the set of characters to strip is derived from the input itself. Every
//! character that occurs in a well-formed line and is not in the allowed
//! repertoire gets stripped from every line.
//!
//! Lines that look garbled (wrong code page, Cyrillic or CJK text) do not
//! contribute to the strippable set, so their characters survive unless
//! they also show up in a clean line.

use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Characters whose presence (after NFKC) marks a line as garbled
const GARBLED_MARKERS: &str = "()ª³µ¹º¼ÀÆÉÊËÎÏÐÑÒÔ×àô،§+`";

/// Punctuation expected in a clean entry
const ALLOWED_PUNCTUATION: &str = " !?.,;-()[]{}|/=:_@\"'~&%\n\t«»—–”“’<>";

/// True if `c` is in the Arabic block (U+0600..=U+06FF)
pub fn is_arabic_char(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// True if the line was mangled beyond repair and should not be used to
/// decide which characters are noise
pub fn is_garbled_line(line: &str) -> bool {
    let normalized: String = line.nfkc().collect();
    normalized.chars().any(|c| {
        GARBLED_MARKERS.contains(c)
            || ('\u{0410}'..='\u{044F}').contains(&c)
            || ('\u{4E00}'..='\u{1869F}').contains(&c)
    })
}

/// True if `c` belongs to the repertoire a cleaned lexicon may contain
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_arabic_char(c) || c == '¯' || ALLOWED_PUNCTUATION.contains(c)
}

/// Characters that end a line, besides `\r\n`
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split `text` into lines at every Unicode line boundary
///
/// Unlike [`str::lines`], a lone `\r` and the other vertical separators end
/// a line too, so dumps written with old Mac line endings keep their lines.
/// `\r\n` counts as one break. A trailing break does not produce an empty
/// final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..index]);
        start = index + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Collect the characters to strip from `text`, in code point order
///
/// Only non-garbled lines are inspected, after NFKD decomposition, so
/// combining accents split off their base letters and end up in the set.
pub fn strippable_chars(text: &str) -> BTreeSet<char> {
    let clean: String = split_lines(text)
        .into_iter()
        .filter(|line| !is_garbled_line(line))
        .collect();
    let strippables: BTreeSet<char> = clean
        .nfkd()
        .filter(|c| !is_allowed_char(*c))
        .collect();

    for c in &strippables {
        let code_point = format!("U+{:04X}", *c as u32);
        tracing::info!(char = %c, code_point = %code_point, "stripping character");
    }
    strippables
}

/// Apply the global cleanup to one line
///
/// Dotless `ı` is folded to `i` before decomposition, then every strippable
/// character is dropped from the NFKD form.
pub fn sanitize_line(line: &str, strippables: &BTreeSet<char>) -> String {
    line.replace('ı', "i")
        .nfkd()
        .filter(|c| !strippables.contains(c))
        .collect()
}
