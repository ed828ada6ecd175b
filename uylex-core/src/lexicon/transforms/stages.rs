//! Individual transformation stages
//!
//! This module contains the individual stages the normalizer is built from.
//! Each stage implements the `Runnable` trait.

pub mod charset_sanitation;
pub mod entry_cleaning;
pub mod sense_resolution;

pub use charset_sanitation::CharsetSanitation;
pub use entry_cleaning::EntryCleaning;
pub use sense_resolution::SenseResolution;
