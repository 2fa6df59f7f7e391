// chordmatch-core/src/types/roman_numeral.rs
use crate::error::{MatchError, Result};
use std::fmt;
use std::str::FromStr;

/// Major or minor tonality of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }
}

/// Diatonic scale degree of a chord's root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScaleDegree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl ScaleDegree {
    /// Zero-based index (I = 0)
    pub fn index(&self) -> usize {
        match self {
            ScaleDegree::I => 0,
            ScaleDegree::II => 1,
            ScaleDegree::III => 2,
            ScaleDegree::IV => 3,
            ScaleDegree::V => 4,
            ScaleDegree::VI => 5,
            ScaleDegree::VII => 6,
        }
    }
}

/// Chord symbol from the catalog taxonomy.
///
/// Plain numerals are diatonic triads. `+` marks a raised third (the major
/// form of a chord that is minor in the natural minor scale), `b` a chord
/// on the lowered degree, and the `Ger`/`Fre`/`Ita` prefixes the augmented
/// sixth chords on the lowered sixth degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChordSymbol {
    I,
    RaisedI,
    FlatII,
    II,
    III,
    IV,
    RaisedIV,
    V,
    RaisedV,
    FlatVI,
    VI,
    GermanSixth,
    FrenchSixth,
    ItalianSixth,
    VII,
    DiminishedSeventh,
}

const MAJOR_SYMBOLS: [ChordSymbol; 13] = [
    ChordSymbol::I,
    ChordSymbol::FlatII,
    ChordSymbol::II,
    ChordSymbol::III,
    ChordSymbol::IV,
    ChordSymbol::V,
    ChordSymbol::FlatVI,
    ChordSymbol::GermanSixth,
    ChordSymbol::FrenchSixth,
    ChordSymbol::ItalianSixth,
    ChordSymbol::VI,
    ChordSymbol::VII,
    ChordSymbol::DiminishedSeventh,
];

const MINOR_SYMBOLS: [ChordSymbol; 15] = [
    ChordSymbol::I,
    ChordSymbol::RaisedI,
    ChordSymbol::FlatII,
    ChordSymbol::II,
    ChordSymbol::III,
    ChordSymbol::IV,
    ChordSymbol::RaisedIV,
    ChordSymbol::V,
    ChordSymbol::RaisedV,
    ChordSymbol::VI,
    ChordSymbol::GermanSixth,
    ChordSymbol::FrenchSixth,
    ChordSymbol::ItalianSixth,
    ChordSymbol::VII,
    ChordSymbol::DiminishedSeventh,
];

impl ChordSymbol {
    /// Every symbol the catalog defines for keys of `mode`, in catalog order
    pub fn for_mode(mode: Mode) -> &'static [ChordSymbol] {
        match mode {
            Mode::Major => &MAJOR_SYMBOLS,
            Mode::Minor => &MINOR_SYMBOLS,
        }
    }

    pub fn is_valid_in(&self, mode: Mode) -> bool {
        Self::for_mode(mode).contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChordSymbol::I => "I",
            ChordSymbol::RaisedI => "I+",
            ChordSymbol::FlatII => "bII",
            ChordSymbol::II => "II",
            ChordSymbol::III => "III",
            ChordSymbol::IV => "IV",
            ChordSymbol::RaisedIV => "IV+",
            ChordSymbol::V => "V",
            ChordSymbol::RaisedV => "V+",
            ChordSymbol::FlatVI => "bVI",
            ChordSymbol::VI => "VI",
            ChordSymbol::GermanSixth => "GerVI",
            ChordSymbol::FrenchSixth => "FreVI",
            ChordSymbol::ItalianSixth => "ItaVI",
            ChordSymbol::VII => "VII",
            ChordSymbol::DiminishedSeventh => "DimVII",
        }
    }

    /// Plain numeral: the unaltered triad on its degree
    pub fn is_diatonic(&self) -> bool {
        matches!(
            self,
            ChordSymbol::I
                | ChordSymbol::II
                | ChordSymbol::III
                | ChordSymbol::IV
                | ChordSymbol::V
                | ChordSymbol::VI
                | ChordSymbol::VII
        )
    }

    /// Scale degree the chord is built on
    pub fn degree(&self) -> ScaleDegree {
        match self {
            ChordSymbol::I | ChordSymbol::RaisedI => ScaleDegree::I,
            ChordSymbol::FlatII | ChordSymbol::II => ScaleDegree::II,
            ChordSymbol::III => ScaleDegree::III,
            ChordSymbol::IV | ChordSymbol::RaisedIV => ScaleDegree::IV,
            ChordSymbol::V | ChordSymbol::RaisedV => ScaleDegree::V,
            ChordSymbol::FlatVI
            | ChordSymbol::VI
            | ChordSymbol::GermanSixth
            | ChordSymbol::FrenchSixth
            | ChordSymbol::ItalianSixth => ScaleDegree::VI,
            ChordSymbol::VII | ChordSymbol::DiminishedSeventh => ScaleDegree::VII,
        }
    }

    /// Describe the harmonic role of the chord
    pub fn function_description(&self) -> &'static str {
        match self {
            ChordSymbol::I => "Tonic - home, stability, resolution",
            ChordSymbol::RaisedI => "Picardy tonic - major tonic in a minor key",
            ChordSymbol::FlatII => "Neapolitan - exotic predominant function",
            ChordSymbol::II => "Supertonic - predominant function, leads to V",
            ChordSymbol::III => "Mediant - tonic function, connects I and V",
            ChordSymbol::IV => "Subdominant - departure from tonic, predominant",
            ChordSymbol::RaisedIV => "Major subdominant - borrowed from melodic minor",
            ChordSymbol::V => "Dominant - tension, leads strongly to I",
            ChordSymbol::RaisedV => "Major dominant - raised leading tone",
            ChordSymbol::FlatVI => "Modal mixture - borrowed from parallel minor",
            ChordSymbol::VI => "Submediant - tonic substitute or predominant",
            ChordSymbol::GermanSixth => "German augmented sixth - resolves to V",
            ChordSymbol::FrenchSixth => "French augmented sixth - resolves to V",
            ChordSymbol::ItalianSixth => "Italian augmented sixth - resolves to V",
            ChordSymbol::VII => "Leading tone - dominant function, resolves to I",
            ChordSymbol::DiminishedSeventh => "Diminished seventh - dominant function",
        }
    }
}

impl FromStr for ChordSymbol {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let symbol = match s.trim() {
            "I" => ChordSymbol::I,
            "I+" => ChordSymbol::RaisedI,
            "bII" => ChordSymbol::FlatII,
            "II" => ChordSymbol::II,
            "III" => ChordSymbol::III,
            "IV" => ChordSymbol::IV,
            "IV+" => ChordSymbol::RaisedIV,
            "V" => ChordSymbol::V,
            "V+" => ChordSymbol::RaisedV,
            "bVI" => ChordSymbol::FlatVI,
            "VI" => ChordSymbol::VI,
            "GerVI" => ChordSymbol::GermanSixth,
            "FreVI" => ChordSymbol::FrenchSixth,
            "ItaVI" => ChordSymbol::ItalianSixth,
            "VII" => ChordSymbol::VII,
            "DimVII" => ChordSymbol::DiminishedSeventh,
            other => return Err(MatchError::UnknownChordSymbol(other.to_string())),
        };
        Ok(symbol)
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ChordSymbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ChordSymbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
