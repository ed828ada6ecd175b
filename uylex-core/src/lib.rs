//! # uylex-core
//!
//! Cleaning, normalization and expansion of a bilingual (Uyghur–English)
//! lexicon derived from a raw "flat" dictionary dump.
//!
//! Layout
//!
//! Every stage of the offline pipeline lives in its own module under
//! [`lexicon`]:
//!
//! src/lexicon
//!   ├── charset      Character-set sanitation
//!   ├── cleaning     Phrase cleanup and coarse splitting
//!   ├── sentences    Fine (sentence-level) target splitting
//!   ├── senses       Alias-graph sense resolution
//!   ├── normalizer   The flat dictionary normalizer, built from transform stages
//!   ├── postag       Head part-of-speech tagging
//!   ├── grammar      Grammar and pertainym file readers
//!   ├── stemmer      Regex stemming by part of speech
//!   └── expansion    Paradigm expansion
//!
//! Stages are plain functions over strings and entries. The normalizer is
//! additionally exposed as a composable [`Transform`](lexicon::transforms::Transform)
//! so callers can run it from a [`LexiconLoader`](lexicon::loader::LexiconLoader).

pub mod lexicon;
