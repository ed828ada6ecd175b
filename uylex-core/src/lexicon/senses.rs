//! Sense resolution
//!
//! Dictionaries point between entries: a word's only translation may be
//! `see ئالما` or `plural form of ئالما`. These references form an alias
//! graph over source words. Resolution follows the references depth-first
//! and replaces each one by whatever the referenced entry translates to,
//! so only real glosses survive.

use crate::lexicon::charset::is_arabic_char;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^see|^form of|^[a-z]+ form of").unwrap());

/// A translation together with the origin it came from
///
/// Glosses order by origin first, then target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Gloss {
    pub origin: String,
    pub target: String,
}

impl Gloss {
    pub fn new(origin: impl Into<String>, target: impl Into<String>) -> Self {
        Gloss {
            origin: origin.into(),
            target: target.into(),
        }
    }
}

/// Source word → glosses, in insertion order per word
pub type GlossMap = BTreeMap<String, Vec<Gloss>>;

/// The word a cross-reference points to, if `target` is one
///
/// The referenced word is the run of Arabic-script or non-letter
/// characters right after the marker, so `see ئالما fruit` points at
/// `ئالما`. A marker followed by Latin text (`see also`) is not a reference.
pub fn referenced_word(target: &str) -> Option<String> {
    let marker = REFERENCE.find(target)?;
    let word: String = target[marker.end()..]
        .chars()
        .take_while(|c| is_arabic_char(*c) || !c.is_alphabetic())
        .collect();
    let word = word.trim();
    (!word.is_empty()).then(|| word.to_string())
}

/// Resolve every gloss of `word`, following cross-references
///
/// A reference to an unknown word resolves to nothing. Cycles are cut: a
/// word already on the current path contributes no glosses.
pub fn resolve(glosses: &GlossMap, word: &str) -> Vec<Gloss> {
    let mut path = Vec::new();
    resolve_along(glosses, word, &mut path)
}

fn resolve_along(glosses: &GlossMap, word: &str, path: &mut Vec<String>) -> Vec<Gloss> {
    if path.iter().any(|visited| visited == word) {
        return Vec::new();
    }

    let mut resolved = Vec::new();
    for gloss in glosses.get(word).into_iter().flatten() {
        match referenced_word(&gloss.target) {
            Some(next) => {
                path.push(word.to_string());
                resolved.extend(resolve_along(glosses, &next, path));
                path.pop();
            }
            None => resolved.push(gloss.clone()),
        }
    }
    resolved
}

fn uppercase_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_uppercase()).count()
}

/// Replace each gloss by its most capitalized case variant
///
/// `london` and `London` are the same gloss; the variant with more
/// uppercase letters wins, ties going to the first in sort order.
/// Variants with the same number of capitals but different spelling
/// (`iPod` / `Ipod`) are reported and both kept.
pub fn prefer_uppercased(glosses: &BTreeSet<Gloss>) -> BTreeSet<Gloss> {
    let mut preferred = BTreeSet::new();
    for gloss in glosses {
        let lower = gloss.target.to_lowercase();
        let own = uppercase_count(&gloss.target);
        let mut best = gloss;
        for other in glosses {
            if other.target.to_lowercase() != lower {
                continue;
            }
            let theirs = uppercase_count(&other.target);
            if theirs > own && theirs > uppercase_count(&best.target) {
                best = other;
            } else if theirs == own && other.target != gloss.target && gloss < other {
                tracing::warn!(
                    first = %gloss.target,
                    second = %other.target,
                    "case variants with the same number of capitals"
                );
            }
        }
        preferred.insert(best.clone());
    }
    preferred
}

/// Word-level pairs derived from a multi-word entry
///
/// When a source phrase and one of its glosses have the same number of
/// words, the words are paired up positionally. Only pairs whose source
/// word is written entirely in Arabic script and that the cleaned
/// dictionary does not already contain are returned.
pub fn singletons(cleaned: &GlossMap, source: &str, glosses: &BTreeSet<Gloss>) -> Vec<(String, Gloss)> {
    let source_words: Vec<&str> = source.split_whitespace().collect();
    if source_words.len() < 2 {
        return Vec::new();
    }

    let mut pairs = Vec::new();
    for gloss in glosses {
        let target_words: Vec<&str> = gloss.target.split_whitespace().collect();
        if target_words.len() != source_words.len() {
            continue;
        }
        for (word, translation) in source_words.iter().zip(&target_words) {
            let candidate = Gloss::new(gloss.origin.clone(), *translation);
            let known = cleaned
                .get(*word)
                .is_some_and(|existing| existing.contains(&candidate));
            if word.chars().all(is_arabic_char) && !known {
                pairs.push((word.to_string(), candidate));
            }
        }
    }
    pairs
}
