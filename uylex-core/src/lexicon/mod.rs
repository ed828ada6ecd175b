//! Main module for lexicon processing

pub mod charset;
pub mod cleaning;
pub mod entry;
pub mod expansion;
pub mod grammar;
pub mod loader;
pub mod normalizer;
pub mod postag;
pub mod senses;
pub mod sentences;
pub mod stemmer;
pub mod transforms;

pub use entry::{EntryError, LexEntry};
