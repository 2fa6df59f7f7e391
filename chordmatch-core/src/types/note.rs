use crate::error::{MatchError, Result};
use std::fmt;
use std::str::FromStr;

/// Chromatic pitch class, 0=C through 11=B
pub type PitchClass = u8;

/// Token that may close an input sequence to flag auxiliary information.
/// It carries no pitch and is dropped before normalization.
pub const MARKER: &str = "-";

/// Longest run of modifiers accepted on a single note (a full octave of sharps)
const MAX_MODIFIERS: usize = 12;

/// The seven natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Pitch class of the natural note
    pub fn pitch_class(self) -> PitchClass {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Parse a letter, ignoring case
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// The letter `steps` scale degrees above this one (C + 2 = E)
    pub fn step(self, steps: usize) -> Letter {
        let index = Self::ALL.iter().position(|&l| l == self).unwrap_or(0);
        Self::ALL[(index + steps) % Self::ALL.len()]
    }
}

/// Accidental written after the letter. Every character of a token's
/// modifier run must be the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Sharp,
    Flat,
    FlatAlias,
    DoubleSharp,
}

impl Modifier {
    fn from_char(c: char) -> Option<Modifier> {
        match c {
            '#' => Some(Modifier::Sharp),
            'b' | 'B' => Some(Modifier::Flat),
            '-' => Some(Modifier::FlatAlias),
            'x' | 'X' => Some(Modifier::DoubleSharp),
            _ => None,
        }
    }

    fn semitones(self) -> i8 {
        match self {
            Modifier::Sharp => 1,
            Modifier::Flat | Modifier::FlatAlias => -1,
            Modifier::DoubleSharp => 2,
        }
    }
}

/// A spelled note name: letter plus chromatic alteration.
///
/// Two names are equal only if they are spelled the same way, so `Bb` and
/// `A#` share a pitch class but are different names. Parsing is
/// case-insensitive, so `bb`, `Bb` and `B-` are the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteName {
    letter: Letter,
    alteration: i8,
}

impl NoteName {
    pub fn new(letter: Letter, alteration: i8) -> Self {
        NoteName { letter, alteration }
    }

    /// Spell `pitch_class` using `letter`, picking the smallest alteration
    /// that reaches it (so at most a double sharp or double flat)
    pub fn spell(letter: Letter, pitch_class: PitchClass) -> Self {
        let diff = (pitch_class as i8 - letter.pitch_class() as i8).rem_euclid(12);
        let alteration = if diff > 6 { diff - 12 } else { diff };
        NoteName { letter, alteration }
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn alteration(&self) -> i8 {
        self.alteration
    }

    /// Chromatic pitch class (0-11)
    pub fn pitch_class(&self) -> PitchClass {
        (self.letter.pitch_class() as i8 + self.alteration).rem_euclid(12) as PitchClass
    }
}

impl FromStr for NoteName {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let invalid = || MatchError::InvalidNote(s.to_string());

        let mut chars = token.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;

        let rest: Vec<char> = chars.collect();
        if rest.len() > MAX_MODIFIERS {
            return Err(invalid());
        }

        let mut alteration = 0i8;
        if let Some(&first) = rest.first() {
            let modifier = Modifier::from_char(first).ok_or_else(invalid)?;
            for &c in &rest {
                if !c.eq_ignore_ascii_case(&first) {
                    return Err(invalid());
                }
                alteration += modifier.semitones();
            }
        }

        Ok(NoteName { letter, alteration })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        match self.alteration {
            2 => write!(f, "x"),
            n if n > 0 => write!(f, "{}", "#".repeat(n as usize)),
            n if n < 0 => write!(f, "{}", "b".repeat(n.unsigned_abs() as usize)),
            _ => Ok(()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NoteName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NoteName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Convert a single note token to its pitch class
pub fn normalize(token: &str) -> Result<PitchClass> {
    Ok(token.parse::<NoteName>()?.pitch_class())
}

/// Drop a trailing marker token, if any
pub fn strip_marker<S: AsRef<str>>(tokens: &[S]) -> &[S] {
    match tokens.split_last() {
        Some((last, rest)) if last.as_ref().trim() == MARKER => rest,
        _ => tokens,
    }
}

/// Parse an input note sequence. A trailing marker is stripped; every other
/// token must be a valid note.
pub fn parse_notes<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<NoteName>> {
    strip_marker(tokens)
        .iter()
        .map(|t| t.as_ref().parse::<NoteName>())
        .collect()
}
