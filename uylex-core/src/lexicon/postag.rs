//! Head part-of-speech tagging
//!
//! The stemmer needs to know whether an entry translates to a noun or a
//! verb. That is decided from the English side: the part of speech of the
//! syntactic head of the gloss (`to run away` → VERB, `house of cards` →
//! NOUN, `very old` → ADJ).
//!
//! [`HeuristicTagger`] gets there without a statistical model. Glosses are
//! short dictionary phrases, so closed-class word lists, a small lexicon
//! of frequent open-class words, suffix rules and a handful of context
//! rules go a long way.

use crate::lexicon::charset::split_lines;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Universal part-of-speech tags, plus `UNK` for empty input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    Unknown,
}

const TAG_NAMES: [(PosTag, &str); 18] = [
    (PosTag::Adj, "ADJ"),
    (PosTag::Adp, "ADP"),
    (PosTag::Adv, "ADV"),
    (PosTag::Aux, "AUX"),
    (PosTag::Cconj, "CCONJ"),
    (PosTag::Det, "DET"),
    (PosTag::Intj, "INTJ"),
    (PosTag::Noun, "NOUN"),
    (PosTag::Num, "NUM"),
    (PosTag::Part, "PART"),
    (PosTag::Pron, "PRON"),
    (PosTag::Propn, "PROPN"),
    (PosTag::Punct, "PUNCT"),
    (PosTag::Sconj, "SCONJ"),
    (PosTag::Sym, "SYM"),
    (PosTag::Verb, "VERB"),
    (PosTag::X, "X"),
    (PosTag::Unknown, "UNK"),
];

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        TAG_NAMES
            .iter()
            .find(|(tag, _)| tag == self)
            .map(|(_, name)| *name)
            .unwrap_or("UNK")
    }

    /// Nouns, proper nouns, pronouns and numerals
    fn is_nominal(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn | PosTag::Pron | PosTag::Num)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown part-of-speech tag '{0}'")]
pub struct UnknownTag(pub String);

impl FromStr for PosTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TAG_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(tag, _)| *tag)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Something that finds the part of speech of a phrase's head
pub trait PosTagger {
    fn head_tag(&self, phrase: &str) -> PosTag;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "no", "every", "each",
    "all", "both", "either", "neither", "another", "such", "what", "which", "whose", "my",
    "your", "his", "her", "its", "our", "their",
];
const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "oneself",
    "somebody", "someone", "something", "anybody", "anyone", "anything", "nobody", "nothing",
    "everybody", "everyone", "everything", "who", "whom", "one", "mine", "yours", "hers",
    "ours", "theirs",
];
const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "without", "from", "into", "onto", "upon",
    "about", "above", "below", "under", "over", "between", "among", "through", "across",
    "against", "along", "around", "behind", "beside", "beyond", "during", "near", "off",
    "toward", "towards", "within", "like", "per", "via", "inside", "outside",
];
const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];
const SUBORDINATORS: &[&str] = &[
    "if", "because", "although", "though", "while", "whether", "unless", "since", "until",
    "than", "as", "when", "where", "after", "before",
];
const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];
const PARTICLES: &[&str] = &["to", "not", "'s"];
const VERB_PARTICLES: &[&str] = &["up", "down", "out", "away", "back", "off", "over", "on", "in"];
const NUMERALS: &[&str] = &[
    "zero", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
];
const INTERJECTIONS: &[&str] = &["oh", "ah", "hey", "hello", "alas", "wow", "ouch", "yes"];
const ADVERBS: &[&str] = &[
    "very", "too", "quite", "rather", "almost", "always", "never", "often", "sometimes",
    "again", "already", "also", "here", "there", "now", "then", "soon", "still", "just",
    "only", "even", "well", "together", "much", "more", "most", "less", "least",
];
const COMMON_VERBS: &[&str] = &[
    "go", "come", "make", "take", "give", "get", "put", "see", "look", "know", "think", "say",
    "tell", "ask", "eat", "drink", "run", "walk", "sit", "stand", "sleep", "write", "read",
    "speak", "hear", "feel", "keep", "let", "hold", "bring", "buy", "sell", "pay", "send",
    "leave", "find", "lose", "win", "cut", "break", "build", "burn", "carry", "catch", "pull",
    "push", "throw", "wash", "sew", "dig", "fly", "swim", "sing", "cry", "laugh", "live",
    "die", "kill", "hit", "beat", "fall", "rise", "grow", "become", "begin", "open", "close",
    "want", "need", "love", "hate", "help", "try", "use", "work", "play", "call", "turn",
    "move", "show", "teach", "learn", "understand", "remember", "forget", "wait", "stay",
    "meet", "follow", "send", "spend", "steal", "hide", "fight", "shout", "boil", "cook",
];
const COMMON_ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "large", "little", "long", "short", "high", "low", "old",
    "new", "young", "hot", "cold", "warm", "cool", "red", "white", "black", "green", "blue",
    "yellow", "brown", "grey", "gray", "dark", "light", "heavy", "easy", "hard", "soft",
    "strong", "weak", "rich", "poor", "full", "empty", "clean", "dirty", "dry", "wet", "deep",
    "wide", "narrow", "thick", "thin", "fast", "slow", "sweet", "sour", "bitter", "happy",
    "sad", "true", "false", "right", "wrong", "early", "late", "near", "far", "free", "sick",
    "ill", "alive", "dead", "beautiful", "ugly", "quiet", "loud", "bright", "fresh", "raw",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ary", "ent", "ant", "ic",
];
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ness", "ment", "ity", "ism", "ist", "ship", "hood", "dom", "ance",
    "ence", "er", "or", "age", "ure",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ate", "ing", "ed", "en"];

/// A token together with its tag and whether the tag was a guess
#[derive(Debug, Clone)]
struct Tagged {
    lower: String,
    tag: PosTag,
    guessed: bool,
}

/// Rule-based English head tagger
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        HeuristicTagger
    }

    /// Split a phrase into word and punctuation tokens at Unicode word
    /// boundaries (UAX #29), dropping whitespace
    fn tokenize(phrase: &str) -> Vec<String> {
        phrase
            .split_word_bounds()
            .filter(|token| !token.trim().is_empty())
            .map(String::from)
            .collect()
    }

    /// Tag a token on its own, without context
    fn lexical_tag(token: &str, position: usize) -> Tagged {
        let lower = token.to_lowercase();
        let known = |tag| Tagged {
            lower: lower.clone(),
            tag,
            guessed: false,
        };

        if !token.chars().any(char::is_alphanumeric) {
            return known(PosTag::Punct);
        }
        if token.chars().all(|c| c.is_ascii_digit() || c == '-') || NUMERALS.contains(&lower.as_str()) {
            return known(PosTag::Num);
        }
        for (words, tag) in [
            (DETERMINERS, PosTag::Det),
            (PRONOUNS, PosTag::Pron),
            (PARTICLES, PosTag::Part),
            (ADPOSITIONS, PosTag::Adp),
            (COORDINATORS, PosTag::Cconj),
            (SUBORDINATORS, PosTag::Sconj),
            (AUXILIARIES, PosTag::Aux),
            (INTERJECTIONS, PosTag::Intj),
            (ADVERBS, PosTag::Adv),
            (COMMON_VERBS, PosTag::Verb),
            (COMMON_ADJECTIVES, PosTag::Adj),
        ] {
            if words.contains(&lower.as_str()) {
                return known(tag);
            }
        }

        let capitalized = token.chars().next().is_some_and(char::is_uppercase);
        if capitalized && (position > 0 || token.chars().skip(1).any(char::is_lowercase)) {
            return known(PosTag::Propn);
        }

        let guessed = |tag| Tagged {
            lower: lower.clone(),
            tag,
            guessed: true,
        };
        let has_suffix = |suffixes: &[&str]| {
            suffixes
                .iter()
                .any(|suffix| lower.len() > suffix.len() + 2 && lower.ends_with(suffix))
        };
        if lower.len() > 4 && lower.ends_with("ly") {
            guessed(PosTag::Adv)
        } else if has_suffix(NOUN_SUFFIXES) {
            guessed(PosTag::Noun)
        } else if has_suffix(ADJECTIVE_SUFFIXES) {
            guessed(PosTag::Adj)
        } else if has_suffix(VERB_SUFFIXES) {
            guessed(PosTag::Verb)
        } else {
            guessed(PosTag::Noun)
        }
    }

    /// Tag every token, then apply context rules
    fn tag_tokens(tokens: &[String]) -> Vec<Tagged> {
        let mut tagged: Vec<Tagged> = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| Self::lexical_tag(token, position))
            .collect();

        for i in 0..tagged.len() {
            let next = tagged.get(i + 1).map(|t| (t.tag, t.guessed));

            // `to` before a non-nominal word is the infinitive marker
            if tagged[i].lower == "to" {
                match next {
                    Some((PosTag::Det | PosTag::Pron | PosTag::Num | PosTag::Propn, _)) | None => {
                        tagged[i].tag = PosTag::Adp;
                    }
                    Some((tag, guessed)) => {
                        tagged[i].tag = PosTag::Part;
                        if guessed || tag == PosTag::Aux {
                            tagged[i + 1].tag = PosTag::Verb;
                        }
                    }
                }
            }

            // A guessed noun opening a phrase and followed by an object or
            // a verb particle is an imperative/infinitive verb
            if i == 0 && tagged[i].guessed && tagged[i].tag == PosTag::Noun {
                let opens_object = matches!(next, Some((PosTag::Det | PosTag::Pron, _)));
                let takes_particle = tagged
                    .get(1)
                    .is_some_and(|t| VERB_PARTICLES.contains(&t.lower.as_str()) && tagged.len() == 2);
                if opens_object || takes_particle {
                    tagged[i].tag = PosTag::Verb;
                }
            }

            // Modifiers before a noun are adjectives, not nouns
            if tagged[i].guessed
                && tagged[i].tag == PosTag::Verb
                && i > 0
                && matches!(tagged[i - 1].tag, PosTag::Det)
            {
                tagged[i].tag = PosTag::Adj;
            }
        }
        tagged
    }

    /// Pick the head among tagged tokens
    fn head(tagged: &[Tagged]) -> PosTag {
        let content: Vec<&Tagged> = tagged.iter().filter(|t| t.tag != PosTag::Punct).collect();
        let Some(first) = content.first() else {
            return tagged.first().map_or(PosTag::Unknown, |t| t.tag);
        };

        // Infinitives and imperatives: `to run away`, `run away`, `be afraid`
        let lead = match first.tag {
            PosTag::Part if first.lower == "to" => content.get(1).copied(),
            _ => Some(*first),
        };
        if let Some(lead) = lead {
            match lead.tag {
                PosTag::Verb => return PosTag::Verb,
                PosTag::Aux if content.len() == 1 || lead.lower != "be" => return PosTag::Aux,
                _ => {}
            }
        }

        // Noun phrases: the head precedes any prepositional modifier
        let before_adposition: Vec<&Tagged> = content
            .iter()
            .copied()
            .take_while(|t| !matches!(t.tag, PosTag::Adp | PosTag::Sconj | PosTag::Cconj))
            .collect();
        let scope = if before_adposition.is_empty() {
            &content
        } else {
            &before_adposition
        };

        for wanted in [
            PosTag::is_nominal as fn(&PosTag) -> bool,
            |tag: &PosTag| *tag == PosTag::Adj,
            |tag: &PosTag| *tag == PosTag::Verb,
            |tag: &PosTag| *tag == PosTag::Adv,
        ] {
            if let Some(head) = scope.iter().rev().find(|t| wanted(&t.tag)) {
                return head.tag;
            }
        }
        first.tag
    }
}

impl PosTagger for HeuristicTagger {
    fn head_tag(&self, phrase: &str) -> PosTag {
        let tokens = Self::tokenize(phrase);
        if tokens.is_empty() {
            return PosTag::Unknown;
        }
        Self::head(&Self::tag_tokens(&tokens))
    }
}

/// Tag every line of `text`, one tag per line
pub fn tag_lines<'a, T: PosTagger + ?Sized>(
    tagger: &'a T,
    text: &'a str,
) -> impl Iterator<Item = PosTag> + 'a {
    split_lines(text).into_iter().map(move |line| tagger.head_tag(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("apple", PosTag::Noun)]
    #[case("house of cards", PosTag::Noun)]
    #[case("the old man", PosTag::Noun)]
    #[case("red apple", PosTag::Noun)]
    #[case("run", PosTag::Verb)]
    #[case("to run away", PosTag::Verb)]
    #[case("to organize", PosTag::Verb)]
    #[case("give up", PosTag::Verb)]
    #[case("take the book", PosTag::Verb)]
    #[case("red", PosTag::Adj)]
    #[case("very beautiful", PosTag::Adj)]
    #[case("dangerous", PosTag::Adj)]
    #[case("quickly", PosTag::Adv)]
    #[case("London", PosTag::Propn)]
    #[case("the Great Wall", PosTag::Propn)]
    #[case("he", PosTag::Pron)]
    #[case("three", PosTag::Num)]
    #[case("to Beijing", PosTag::Propn)]
    #[case("happiness", PosTag::Noun)]
    #[case("...", PosTag::Punct)]
    #[case("cafe\u{301} noir", PosTag::Noun)]
    #[case("mother-in-law", PosTag::Noun)]
    #[case("", PosTag::Unknown)]
    fn test_head_tag(#[case] phrase: &str, #[case] expected: PosTag) {
        assert_eq!(HeuristicTagger::new().head_tag(phrase), expected);
    }

    #[rstest]
    #[case("cafe\u{301} noir", vec!["cafe\u{301}", "noir"])]
    #[case("the U.S. army", vec!["the", "U.S", ".", "army"])]
    #[case("horse, steed", vec!["horse", ",", "steed"])]
    #[case("  ", vec![])]
    fn test_tokenize(#[case] phrase: &str, #[case] expected: Vec<&str>) {
        assert_eq!(HeuristicTagger::tokenize(phrase), expected);
    }

    #[test]
    fn test_tag_names_round_trip() {
        for (tag, name) in TAG_NAMES {
            assert_eq!(tag.to_string(), name);
            assert_eq!(name.parse::<PosTag>(), Ok(tag));
        }
        assert_eq!("BOGUS".parse::<PosTag>(), Err(UnknownTag("BOGUS".to_string())));
    }

    #[test]
    fn test_tag_lines() {
        let tagger = HeuristicTagger::new();
        let tags: Vec<String> = tag_lines(&tagger, "apple\nto eat\n\n")
            .map(|tag| tag.to_string())
            .collect();
        assert_eq!(tags, vec!["NOUN", "VERB", "UNK"]);
    }
}
