//! Chord catalog
//!
//! A catalog is a fixed table of chord definitions keyed by identity
//! (key name followed by chord symbol, e.g. `CMajorV`). Entries are
//! validated once when they are created and never change afterwards.

pub mod standard;

#[cfg(feature = "serde")]
mod json;

use crate::error::{MatchError, Result};
use crate::types::{ChordSymbol, Key, NoteName, PitchClass};
use std::collections::BTreeMap;

pub use standard::standard_catalog;

/// Smallest and largest number of notes a catalog chord may have
pub const MIN_CHORD_NOTES: usize = 2;
pub const MAX_CHORD_NOTES: usize = 4;

/// One catalog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordEntry {
    identity: String,
    key: Key,
    symbol: ChordSymbol,
    pitch_classes: Vec<PitchClass>,
    names: Vec<NoteName>,
}

impl ChordEntry {
    /// Create an entry from explicit pitch classes and note names, listed in
    /// voicing order with the root first
    pub fn new(
        identity: impl Into<String>,
        key: Key,
        symbol: ChordSymbol,
        pitch_classes: Vec<PitchClass>,
        names: Vec<NoteName>,
    ) -> Result<Self> {
        let identity = identity.into();
        let invalid = |reason: String| MatchError::InvalidEntry {
            identity: identity.clone(),
            reason,
        };

        if pitch_classes.len() != names.len() {
            return Err(invalid(format!(
                "{} pitch classes but {} note names",
                pitch_classes.len(),
                names.len()
            )));
        }
        if !(MIN_CHORD_NOTES..=MAX_CHORD_NOTES).contains(&pitch_classes.len()) {
            return Err(invalid(format!(
                "chords need {}-{} notes, got {}",
                MIN_CHORD_NOTES,
                MAX_CHORD_NOTES,
                pitch_classes.len()
            )));
        }
        if let Some(pc) = pitch_classes.iter().find(|&&pc| pc > 11) {
            return Err(invalid(format!("pitch class {} out of range", pc)));
        }
        if !symbol.is_valid_in(key.mode) {
            return Err(invalid(format!(
                "{} is not a {} key chord",
                symbol,
                key.mode.name().to_lowercase()
            )));
        }

        Ok(ChordEntry {
            identity,
            key,
            symbol,
            pitch_classes,
            names,
        })
    }

    /// Create an entry whose pitch classes follow from its note names and
    /// whose identity is the key name followed by the symbol
    pub fn from_names(key: Key, symbol: ChordSymbol, names: Vec<NoteName>) -> Result<Self> {
        let identity = format!("{}{}", key, symbol);
        let pitch_classes = names.iter().map(NoteName::pitch_class).collect();
        Self::new(identity, key, symbol, pitch_classes, names)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn symbol(&self) -> ChordSymbol {
        self.symbol
    }

    /// Pitch classes in voicing order
    pub fn pitch_classes(&self) -> &[PitchClass] {
        &self.pitch_classes
    }

    pub fn names(&self) -> &[NoteName] {
        &self.names
    }

    /// The chord's root, its first listed note
    pub fn root(&self) -> NoteName {
        self.names[0]
    }

    /// Pitch classes sorted ascending with duplicates removed
    pub fn unique_pitch_classes(&self) -> Vec<PitchClass> {
        let mut pcs = self.pitch_classes.clone();
        pcs.sort_unstable();
        pcs.dedup();
        pcs
    }
}

/// Chord definitions keyed by identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, ChordEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate identities
    pub fn from_entries(entries: impl IntoIterator<Item = ChordEntry>) -> Result<Self> {
        let mut catalog = Catalog::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, entry: ChordEntry) -> Result<()> {
        if self.entries.contains_key(entry.identity()) {
            return Err(MatchError::DuplicateIdentity(entry.identity.clone()));
        }
        self.entries.insert(entry.identity.clone(), entry);
        Ok(())
    }

    pub fn get(&self, identity: &str) -> Option<&ChordEntry> {
        self.entries.get(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in identity order
    pub fn entries(&self) -> impl Iterator<Item = &ChordEntry> {
        self.entries.values()
    }

    /// Distinct keys present in the catalog, sorted by name
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.entries.values().map(|e| e.key).collect();
        keys.sort_by_key(|k| k.to_string());
        keys.dedup();
        keys
    }
}
