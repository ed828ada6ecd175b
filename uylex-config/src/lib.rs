//! Shared configuration loader for the uylex toolchain.
//!
//! `defaults/uylex.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. Applications layer
//! a user file and command-line overrides on top of those defaults via
//! [`Loader`] before deserializing into [`UylexConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use uylex_core::lexicon::normalizer::NormalizeOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/uylex.default.toml");

/// Top-level configuration consumed by the uylex binary.
#[derive(Debug, Clone, Deserialize)]
pub struct UylexConfig {
    pub normalize: NormalizeConfig,
    pub stem: StemConfig,
    pub expand: ExpandConfig,
    pub log: LogConfig,
}

/// Mirrors the knobs exposed by the normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    pub split: bool,
    pub target_limit: usize,
    pub early_target_limit: usize,
    pub singletons: bool,
    pub remove_lowercased: bool,
    pub sentence_split: bool,
}

impl NormalizeConfig {
    pub fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            split: self.split,
            target_limit: self.target_limit,
            early_target_limit: self.early_target_limit,
            singletons: self.singletons,
            remove_lowercased: self.remove_lowercased,
            sentence_split: self.sentence_split,
        }
    }
}

/// File naming of the stemmer's inputs and outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct StemConfig {
    pub output_extension: String,
    pub tags_extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpandConfig {
    pub skip_categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<UylexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = Loader::default().build().expect("defaults to deserialize");
        assert_eq!(config.normalize.options(), NormalizeOptions::default());
        assert_eq!(config.stem.output_extension, "stemmed");
        assert_eq!(config.stem.tags_extension, "postags");
        assert_eq!(config.expand.skip_categories, vec!["PER"]);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("normalize.target_limit", 6_i64)
            .expect("override to apply")
            .set_override("normalize.singletons", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.normalize.target_limit, 6);
        assert!(config.normalize.singletons);
        assert!(config.normalize.split);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[expand]\nskip_categories = [\"PER\", \"LOC\"]").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.expand.skip_categories, vec!["PER", "LOC"]);
        assert_eq!(config.normalize.target_limit, 4);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/uylex.toml").build();
        assert!(result.is_err());
    }
}
