//! Standard transform definitions
//!
//! Pre-built transforms for common use cases, defined as statics using
//! `once_cell::sync::Lazy`.

use crate::lexicon::normalizer::{NormalizeOptions, NormalizedLexicon, Normalizer, SanitizedLexicon};
use crate::lexicon::transforms::stages::CharsetSanitation;
use crate::lexicon::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for the sanitation transform
pub type SanitationTransform = Transform<String, SanitizedLexicon>;

/// Type alias for the full normalization transform
pub type NormalizationTransform = Transform<String, NormalizedLexicon>;

/// Character-set sanitation only: String → SanitizedLexicon
///
/// Useful to inspect which characters a dump would lose.
pub static SANITATION: Lazy<SanitationTransform> =
    Lazy::new(|| Transform::from_fn(|source: String| Ok(source)).then(CharsetSanitation::new()));

/// Full normalization with default options: String → NormalizedLexicon
///
/// 1. Character-set sanitation
/// 2. Entry cleaning with the rule-based sentence splitter
/// 3. Sense resolution
pub static NORMALIZATION: Lazy<NormalizationTransform> =
    Lazy::new(|| Normalizer::new(NormalizeOptions::default()).into_transform());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitation() {
        let result = SANITATION.run("a\tDICT\tb°\n".to_string()).unwrap();
        assert_eq!(result.lines, vec!["a\tDICT\tb".to_string()]);
    }

    #[test]
    fn test_normalization() {
        let result = NORMALIZATION
            .run("ئات\tDICT\thorse, steed\n".to_string())
            .unwrap();
        assert_eq!(result.stats.written, 2);
    }

    #[test]
    fn test_transforms_are_reusable() {
        let first = NORMALIZATION.run("ئات\tDICT\thorse\n".to_string()).unwrap();
        let second = NORMALIZATION.run("ئات\tDICT\tsteed\n".to_string()).unwrap();

        assert_eq!(first.entries().next().unwrap().target, "horse");
        assert_eq!(second.entries().next().unwrap().target, "steed");
    }
}
