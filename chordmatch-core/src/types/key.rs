use crate::error::{MatchError, Result};
use crate::types::note::NoteName;
use crate::types::roman_numeral::Mode;
use std::fmt;
use std::str::FromStr;

/// A musical key: tonic plus mode, written like `CMajor` or `f#Minor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    pub tonic: NoteName,
    pub mode: Mode,
}

impl Key {
    pub fn new(tonic: NoteName, mode: Mode) -> Self {
        Key { tonic, mode }
    }

    pub fn is_major(&self) -> bool {
        self.mode == Mode::Major
    }

    /// Upper-cased name, the form keys are compared in (`F#MINOR`)
    pub fn normalized(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl FromStr for Key {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let lower = name.to_ascii_lowercase();

        let (tonic_part, mode) = if let Some(tonic) = lower.strip_suffix("major") {
            (&name[..tonic.len()], Mode::Major)
        } else if let Some(tonic) = lower.strip_suffix("minor") {
            (&name[..tonic.len()], Mode::Minor)
        } else {
            return Err(MatchError::InvalidKey(s.to_string()));
        };

        let tonic = tonic_part
            .parse::<NoteName>()
            .map_err(|_| MatchError::InvalidKey(s.to_string()))?;

        Ok(Key { tonic, mode })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Minor tonics are written in lower case
        match self.mode {
            Mode::Major => write!(f, "{}{}", self.tonic, self.mode.name()),
            Mode::Minor => write!(
                f,
                "{}{}",
                self.tonic.to_string().to_lowercase(),
                self.mode.name()
            ),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::note::Letter;

    #[test]
    fn test_key_parsing() {
        let c: Key = "CMajor".parse().unwrap();
        assert_eq!(c.tonic, NoteName::new(Letter::C, 0));
        assert!(c.is_major());

        let fs: Key = "f#Minor".parse().unwrap();
        assert_eq!(fs.tonic, NoteName::new(Letter::F, 1));
        assert_eq!(fs.mode, Mode::Minor);
    }

    #[test]
    fn test_key_parsing_is_case_insensitive() {
        let a: Key = "CMAJOR".parse().unwrap();
        let b: Key = "cmajor".parse().unwrap();
        assert_eq!(a, b);

        let bb: Key = "BBMINOR".parse().unwrap();
        assert_eq!(bb.to_string(), "bbMinor");
    }

    #[test]
    fn test_key_display() {
        let key = Key::new(NoteName::new(Letter::E, -1), Mode::Major);
        assert_eq!(key.to_string(), "EbMajor");
        assert_eq!(key.normalized(), "EBMAJOR");

        let minor = Key::new(NoteName::new(Letter::C, 1), Mode::Minor);
        assert_eq!(minor.to_string(), "c#Minor");
    }

    #[test]
    fn test_invalid_keys() {
        assert!("C".parse::<Key>().is_err());
        assert!("HMajor".parse::<Key>().is_err());
        assert!("CDorian".parse::<Key>().is_err());
        assert!("Major".parse::<Key>().is_err());
    }
}
