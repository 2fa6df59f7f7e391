//! # Chordmatch Core
//!
//! Identifies which chords a set of notes most likely represents.
//!
//! A [`Catalog`] holds the known chords of every key. A
//! [`CombinationIndex`] built from it maps each 2-4 note pitch-class
//! combination to the chords containing it, and a [`Matcher`] uses the index
//! to collect candidates for a query, score them and rank them.
//!
//! ## Features
//!
//! - **serde**: JSON loading and saving of catalogs and indexes, and
//!   serializable results and scoring weights
//!
//! ## Example
//!
//! ```
//! use chordmatch_core::{standard_catalog, Matcher, Query};
//!
//! let matcher = Matcher::new(standard_catalog().unwrap());
//! let results = matcher.match_notes(&["C", "E", "G"], &Query::new()).unwrap();
//! assert_eq!(results[0].identity, "CMajorI");
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod types;

// Re-export commonly used types
pub use catalog::{standard_catalog, Catalog, ChordEntry};
pub use config::ScoringWeights;
pub use engine::{MatchResult, Matcher, Query};
pub use error::{MatchError, Result};
pub use index::{CombinationIndex, PitchClassSet};
pub use types::{ChordSymbol, Key, Mode, NoteName, PitchClass};
