//! The standard catalog: 12 major and 12 minor keys crossed with every
//! chord symbol of their mode.

use crate::catalog::{Catalog, ChordEntry};
use crate::error::Result;
use crate::types::{ChordSymbol, Key, Mode, NoteName};

/// Tonics of the catalog's major keys
pub const MAJOR_TONICS: [&str; 12] = [
    "C", "G", "D", "A", "E", "B", "F", "Bb", "Eb", "Ab", "Db", "Gb",
];

/// Tonics of the catalog's minor keys
pub const MINOR_TONICS: [&str; 12] = [
    "a", "e", "b", "f#", "c#", "g#", "d", "g", "c", "f", "bb", "eb",
];

/// A chord tone: scale degree above the tonic (0-6) and semitones above the tonic
type ChordTone = (usize, u8);

/// Chord tones of `symbol` in `mode`, root first
fn voicing(symbol: ChordSymbol, mode: Mode) -> &'static [ChordTone] {
    use ChordSymbol::*;

    match (mode, symbol) {
        (_, FlatII) => &[(1, 1), (3, 5), (5, 8)],
        (_, GermanSixth) => &[(5, 8), (0, 0), (2, 3), (3, 6)],
        (_, FrenchSixth) => &[(5, 8), (0, 0), (1, 2), (3, 6)],
        (_, ItalianSixth) => &[(5, 8), (0, 0), (3, 6)],
        (_, DiminishedSeventh) => &[(6, 11), (1, 2), (3, 5), (5, 8)],

        (Mode::Major, I) => &[(0, 0), (2, 4), (4, 7)],
        (Mode::Major, II) => &[(1, 2), (3, 5), (5, 9)],
        (Mode::Major, III) => &[(2, 4), (4, 7), (6, 11)],
        (Mode::Major, IV) => &[(3, 5), (5, 9), (0, 0)],
        (Mode::Major, V) => &[(4, 7), (6, 11), (1, 2)],
        (Mode::Major, FlatVI) => &[(5, 8), (0, 0), (2, 3)],
        (Mode::Major, VI) => &[(5, 9), (0, 0), (2, 4)],
        (Mode::Major, VII) => &[(6, 11), (1, 2), (3, 5)],

        (Mode::Minor, I) => &[(0, 0), (2, 3), (4, 7)],
        (Mode::Minor, RaisedI) => &[(0, 0), (2, 4), (4, 7)],
        (Mode::Minor, II) => &[(1, 2), (3, 5), (5, 8)],
        (Mode::Minor, III) => &[(2, 3), (4, 7), (6, 10)],
        (Mode::Minor, IV) => &[(3, 5), (5, 8), (0, 0)],
        (Mode::Minor, RaisedIV) => &[(3, 5), (5, 9), (0, 0)],
        (Mode::Minor, V) => &[(4, 7), (6, 10), (1, 2)],
        (Mode::Minor, RaisedV) => &[(4, 7), (6, 11), (1, 2)],
        (Mode::Minor, VI) => &[(5, 8), (0, 0), (2, 3)],
        (Mode::Minor, VII) => &[(6, 10), (1, 2), (3, 5)],

        // Symbols outside the mode's taxonomy are never requested
        (Mode::Major, RaisedI | RaisedIV | RaisedV) | (Mode::Minor, FlatVI) => &[],
    }
}

/// Spell the notes of `symbol` in `key`. Each chord tone takes the letter
/// of its scale degree, counted from the tonic's letter.
pub fn chord_notes(key: &Key, symbol: ChordSymbol) -> Vec<NoteName> {
    let tonic_pc = key.tonic.pitch_class();
    voicing(symbol, key.mode)
        .iter()
        .map(|&(degree, semitones)| {
            let letter = key.tonic.letter().step(degree);
            NoteName::spell(letter, (tonic_pc + semitones) % 12)
        })
        .collect()
}

/// Every key of the standard catalog, major keys first
pub fn standard_keys() -> Vec<Key> {
    let major = MAJOR_TONICS.iter().map(|t| (t, Mode::Major));
    let minor = MINOR_TONICS.iter().map(|t| (t, Mode::Minor));
    major
        .chain(minor)
        .filter_map(|(tonic, mode)| tonic.parse().ok().map(|tonic| Key::new(tonic, mode)))
        .collect()
}

/// Build the standard catalog
pub fn standard_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for key in standard_keys() {
        for &symbol in ChordSymbol::for_mode(key.mode) {
            catalog.insert(ChordEntry::from_names(key, symbol, chord_notes(&key, symbol))?)?;
        }
    }
    log::info!("built standard catalog with {} chords", catalog.len());
    Ok(catalog)
}
