//! Grammar and pertainym file parsing
//!
//! Grammar files are free-form lines annotated with `::key value` pairs.
//! Only two kinds of lines matter here:
//!
//! ```text
//! ::uig /(.*)لار$/$1/ ::synt lexical noun stemming
//! ::uig لىق ::synt noun suffix ::function adjectivizer
//! ::uig دىكى ::synt noun suffix ::eng in/at (the) ...; -like
//! ```
//!
//! Stemming rules become [`StemRules`], noun suffix lines become a
//! [`SuffixGrammar`]. Pertainym files pair nouns with the adjectives
//! derived from them and become [`Pertainyms`].

use crate::lexicon::postag::PosTag;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

static STEM_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"::uig /(.*)/(.*)/ ::synt lexical (noun|verb) stemming").unwrap());
static DOLLAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([0-9]+)|\$").unwrap());
static SUFFIX_UIG: Lazy<Regex> = Lazy::new(|| Regex::new(r"::uig ([^:]*) ::").unwrap());
static SUFFIX_ENG: Lazy<Regex> = Lazy::new(|| Regex::new(r"::eng ([^:]*)").unwrap());
static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]+\)").unwrap());
static PERTAINYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^::s-(adj|noun) (.*) ::t-(adj|noun) (.*)$").unwrap());

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("line {line}: invalid stemming pattern '{pattern}': {source}")]
    InvalidPattern {
        line: usize,
        pattern: String,
        source: regex::Error,
    },
}

/// One `pattern → replacement` stemming rule
#[derive(Debug, Clone)]
pub struct StemRule {
    pattern: Regex,
    replacement: String,
}

impl StemRule {
    /// Build a rule from a pattern and a replacement where only `$N` is
    /// special
    ///
    /// `$N` becomes `${N}`, so `$1x` still refers to group 1; any other `$`
    /// is kept literally.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        let replacement = DOLLAR.replace_all(replacement, |caps: &Captures| match caps.get(1) {
            Some(group) => format!("${{{}}}", group.as_str()),
            None => "$$".to_string(),
        });
        Ok(StemRule {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into_owned(),
        })
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace every match in `source`, or `None` when nothing changes
    pub fn apply(&self, source: &str) -> Option<String> {
        let stemmed = self.pattern.replace_all(source, self.replacement.as_str());
        (stemmed != source).then(|| stemmed.into_owned())
    }
}

impl fmt::Display for StemRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.replacement)
    }
}

/// Noun and verb stemming rules, in file order
#[derive(Debug, Clone, Default)]
pub struct StemRules {
    pub noun: Vec<StemRule>,
    pub verb: Vec<StemRule>,
}

impl StemRules {
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        let mut rules = StemRules::default();
        for (index, line) in text.lines().enumerate() {
            if !line.contains("stemming") {
                continue;
            }
            let Some(caps) = STEM_RULE.captures(line) else {
                tracing::warn!(line = index + 1, text = line, "skipping malformed stemming rule");
                continue;
            };
            let rule = StemRule::new(&caps[1], &caps[2]).map_err(|source| {
                GrammarError::InvalidPattern {
                    line: index + 1,
                    pattern: caps[1].to_string(),
                    source,
                }
            })?;
            match &caps[3] {
                "noun" => rules.noun.push(rule),
                _ => rules.verb.push(rule),
            }
        }
        Ok(rules)
    }

    /// The rules that apply to entries tagged `tag`
    pub fn for_tag(&self, tag: PosTag) -> &[StemRule] {
        match tag {
            PosTag::Noun => &self.noun,
            PosTag::Verb => &self.verb,
            _ => &[],
        }
    }
}

/// Noun suffixes and how they change the English side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixGrammar {
    /// Suffixes that turn a noun into an adjective
    pub adjectivizers: Vec<String>,
    /// `(suffix, english prefix)`, e.g. `("دا", "in ")`
    pub prefixers: Vec<(String, String)>,
    /// `(suffix, english suffix)`, e.g. `("نىڭ", " 's")`
    pub suffixers: Vec<(String, String)>,
}

impl SuffixGrammar {
    pub fn parse(text: &str) -> Self {
        let mut grammar = SuffixGrammar::default();
        for (index, line) in text.lines().enumerate() {
            if !line.contains("::synt noun suffix") {
                continue;
            }
            let Some(uig) = SUFFIX_UIG.captures(line).map(|caps| caps[1].to_string()) else {
                tracing::warn!(line = index + 1, text = line, "noun suffix without ::uig");
                continue;
            };
            if line.contains("adjectivizer") {
                grammar.adjectivizers.push(uig);
                continue;
            }
            let Some(glosses) = SUFFIX_ENG.captures(line) else {
                continue;
            };
            for gloss in glosses[1].trim().split(';') {
                let gloss = PARENTHESIZED.replace_all(gloss, "");
                for phrase in expand_alternatives(gloss.trim()) {
                    if let Some(rest) = phrase.strip_prefix('-') {
                        grammar.suffixers.push((uig.clone(), rest.to_string()));
                    } else if phrase.starts_with('\'') {
                        grammar.suffixers.push((uig.clone(), format!(" {}", phrase)));
                    } else {
                        grammar.prefixers.push((uig.clone(), format!("{} ", phrase)));
                    }
                }
            }
        }
        tracing::info!(
            adjectivizers = grammar.adjectivizers.len(),
            prefixers = grammar.prefixers.len(),
            suffixers = grammar.suffixers.len(),
            "loaded suffix grammar"
        );
        grammar
    }
}

/// Every phrase obtained by picking one choice for each `a/b` word
fn expand_alternatives(gloss: &str) -> Vec<String> {
    let mut phrases: Vec<Vec<&str>> = vec![Vec::new()];
    for word in gloss.split_whitespace() {
        phrases = phrases
            .into_iter()
            .flat_map(|prefix| {
                word.split('/').map(move |choice| {
                    let mut phrase = prefix.clone();
                    phrase.push(choice);
                    phrase
                })
            })
            .collect();
    }
    phrases
        .into_iter()
        .map(|words| words.join(" "))
        .filter(|phrase| !phrase.is_empty())
        .collect()
}

/// Noun → adjective pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pertainyms {
    adjectives: HashMap<String, String>,
}

impl Pertainyms {
    pub fn parse(text: &str) -> Self {
        let mut adjectives = HashMap::new();
        for caps in text.lines().filter_map(|line| PERTAINYM.captures(line)) {
            let (mut noun, mut adjective) = (&caps[2], &caps[4]);
            if &caps[1] == "adj" && &caps[3] == "noun" {
                std::mem::swap(&mut noun, &mut adjective);
            }
            adjectives.insert(noun.trim().to_string(), adjective.trim().to_string());
        }
        Pertainyms { adjectives }
    }

    /// The adjective derived from `noun`, if any
    pub fn adjective(&self, noun: &str) -> Option<&str> {
        self.adjectives.get(noun).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.adjectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjectives.is_empty()
    }
}
