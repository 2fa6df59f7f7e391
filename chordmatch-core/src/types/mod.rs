// chordmatch-core/src/types/mod.rs

pub mod key;
pub mod note;
pub mod roman_numeral;

pub use key::Key;
pub use note::{normalize, parse_notes, strip_marker, Letter, NoteName, PitchClass, MARKER};
pub use roman_numeral::{ChordSymbol, Mode, ScaleDegree};
