//! Transform pipeline infrastructure
//!
//! The normalizer is a chain of stages, each turning one intermediate form
//! of the lexicon into the next. Stages implement [`Runnable`]; a
//! [`Transform`] wraps any runnable and chains further stages with
//! [`Transform::then`], with the compiler checking that each stage's input
//! type matches the previous stage's output:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(|source: String| Ok(source))
//!     .then(CharsetSanitation::new())              // String → SanitizedLexicon
//!     .then(EntryCleaning::new(options, splitter)) // SanitizedLexicon → CleanedLexicon
//!     .then(SenseResolution::new(options));        // CleanedLexicon → NormalizedLexicon
//! ```
//!
//! Common pipelines are pre-built in [`standard`] as lazily initialized
//! statics.
//!
//! # Module Organization
//!
//! - [`stages`]: Individual stages (sanitation, cleaning, resolution)
//! - [`standard`]: Pre-built transform combinations

pub mod stages;
pub mod standard;

use thiserror::Error;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Generic error with message
    #[error("{0}")]
    Error(String),
}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

/// Trait for anything that can transform an input to an output
///
/// This is implemented by individual transformation stages.
/// The `Transform` struct composes multiple `Runnable` implementations.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline
///
/// `Transform<I, O>` represents a transformation from type `I` to type `O`.
/// Transforms are `Send + Sync` so they can live in statics.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Add a stage to this transform, returning a new transform with extended output type
    ///
    /// This is the core composition method. It chains this transform's output into
    /// the next stage's input, creating a new transform from `I` to `O2`.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

// Transforms can be used as stages of other transforms
impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
