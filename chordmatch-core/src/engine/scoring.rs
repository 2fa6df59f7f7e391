//! Scoring functions
//!
//! Both variants are pure and only meaningful relative to other scores for
//! the same query.

use crate::catalog::ChordEntry;
use crate::config::ScoringWeights;
use crate::engine::stats::{Input, MatchStats};
use crate::types::{ChordSymbol, Mode};

/// Plain scoring bonus per scale degree, I through VII
const FUNCTION_BONUS: [f64; 7] = [4.0, 2.0, 1.0, 3.0, 3.0, 2.0, 1.0];

/// Weighted scoring bonus per scale degree in major keys
const WEIGHTED_MAJOR_BONUS: [f64; 7] = [5.0, 3.0, 0.0, 3.0, 2.0, 4.0, 2.0];

/// Weighted scoring bonus per scale degree in minor keys, where the tonic
/// and submediant rank alike
const WEIGHTED_MINOR_BONUS: [f64; 7] = [4.0, 3.0, 0.0, 3.0, 2.0, 4.0, 2.0];

/// Diatonic function bonus for plain scoring, the same in every mode.
/// Altered and chromatic chords earn nothing.
pub fn function_bonus(symbol: ChordSymbol) -> f64 {
    if !symbol.is_diatonic() {
        return 0.0;
    }
    FUNCTION_BONUS[symbol.degree().index()]
}

/// Diatonic function bonus for weighted scoring
pub fn weighted_function_bonus(symbol: ChordSymbol, mode: Mode) -> f64 {
    if !symbol.is_diatonic() {
        return 0.0;
    }
    let table = match mode {
        Mode::Major => &WEIGHTED_MAJOR_BONUS,
        Mode::Minor => &WEIGHTED_MINOR_BONUS,
    };
    table[symbol.degree().index()]
}

/// `numerator / (edit_distance + 1)`, rounded down
fn edit_distance_term(stats: &MatchStats, weights: &ScoringWeights) -> f64 {
    (weights.edit_distance_numerator / (stats.edit_distance + 1)) as f64
}

fn length_term(stats: &MatchStats, weights: &ScoringWeights) -> f64 {
    if stats.length_match {
        0.0
    } else {
        -weights.length_mismatch_penalty
    }
}

/// Score a candidate from match counts alone
pub fn score_plain(stats: &MatchStats, symbol: ChordSymbol, weights: &ScoringWeights) -> f64 {
    let mut score = weights.pitch_match * stats.pitch_matches as f64
        + weights.name_match * stats.name_matches as f64;
    if stats.root_present {
        score += weights.root_present;
    }
    score + edit_distance_term(stats, weights) + function_bonus(symbol) + length_term(stats, weights)
}

/// Score a candidate with every match scaled by the salience of the input
/// note responsible for it
pub fn score_weighted(
    input: &Input,
    entry: &ChordEntry,
    stats: &MatchStats,
    weights: &ScoringWeights,
) -> f64 {
    let mut score = 0.0;
    for note in input.notes() {
        if entry.pitch_classes().contains(&note.name.pitch_class()) {
            score += weights.weighted_pitch_match * note.weight;
        }
        if entry.names().contains(&note.name) {
            score += weights.weighted_name_match * note.weight;
        }
    }

    let root_weight = input.weight_of(&entry.root());
    if stats.root_present {
        score += weights.root_present * root_weight;
    }
    if stats.root_first {
        score += weights.root_first * root_weight;
    }

    score
        + edit_distance_term(stats, weights)
        + length_term(stats, weights)
        + weighted_function_bonus(entry.symbol(), entry.key().mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::INCOMPARABLE_DISTANCE;
    use crate::types::Key;

    fn stats() -> MatchStats {
        MatchStats {
            pitch_matches: 3,
            name_matches: 3,
            root_present: true,
            root_first: true,
            edit_distance: 0,
            length_match: true,
        }
    }

    fn entry(key: &str, symbol: ChordSymbol, tokens: &[&str]) -> ChordEntry {
        let key: Key = key.parse().unwrap();
        let names = tokens.iter().map(|t| t.parse().unwrap()).collect();
        ChordEntry::from_names(key, symbol, names).unwrap()
    }

    #[test]
    fn test_plain_exact_triad() {
        let score = score_plain(&stats(), ChordSymbol::I, &ScoringWeights::default());
        assert_eq!(score, 3000.0 + 300.0 + 500.0 + 60.0 + 4.0);
    }

    #[test]
    fn test_plain_penalties() {
        let partial = MatchStats {
            pitch_matches: 2,
            name_matches: 1,
            root_present: false,
            root_first: false,
            edit_distance: 5,
            length_match: false,
        };
        let score = score_plain(&partial, ChordSymbol::III, &ScoringWeights::default());
        assert_eq!(score, 2000.0 + 100.0 + 10.0 + 1.0 - 100.0);
    }

    #[test]
    fn test_incomparable_distance_earns_nothing() {
        let far = MatchStats {
            edit_distance: INCOMPARABLE_DISTANCE,
            ..stats()
        };
        let near = score_plain(&stats(), ChordSymbol::GermanSixth, &ScoringWeights::default());
        let score = score_plain(&far, ChordSymbol::GermanSixth, &ScoringWeights::default());
        assert_eq!(near - score, 60.0);
    }

    #[test]
    fn test_root_bonus_is_strict() {
        let weights = ScoringWeights::default();
        let with_root = score_plain(&stats(), ChordSymbol::V, &weights);
        let without_root = score_plain(
            &MatchStats {
                root_present: false,
                ..stats()
            },
            ChordSymbol::V,
            &weights,
        );
        assert!(with_root > without_root);
    }

    #[test]
    fn test_function_bonus_tables() {
        assert_eq!(function_bonus(ChordSymbol::V), 3.0);
        assert_eq!(function_bonus(ChordSymbol::FlatII), 0.0);
        assert_eq!(weighted_function_bonus(ChordSymbol::I, Mode::Major), 5.0);
        assert_eq!(weighted_function_bonus(ChordSymbol::I, Mode::Minor), 4.0);
        assert_eq!(weighted_function_bonus(ChordSymbol::VI, Mode::Minor), 4.0);
        assert_eq!(weighted_function_bonus(ChordSymbol::III, Mode::Major), 0.0);
        assert_eq!(weighted_function_bonus(ChordSymbol::RaisedV, Mode::Minor), 0.0);
    }

    #[test]
    fn test_altered_chords_earn_no_bonus() {
        for symbol in [
            ChordSymbol::RaisedI,
            ChordSymbol::FlatII,
            ChordSymbol::RaisedIV,
            ChordSymbol::FlatVI,
            ChordSymbol::GermanSixth,
            ChordSymbol::DiminishedSeventh,
        ] {
            assert_eq!(function_bonus(symbol), 0.0, "{}", symbol);
            assert_eq!(weighted_function_bonus(symbol, Mode::Minor), 0.0, "{}", symbol);
        }
        assert_eq!(function_bonus(ChordSymbol::IV), 3.0);
        assert_eq!(function_bonus(ChordSymbol::II), 2.0);
        assert_eq!(function_bonus(ChordSymbol::VII), 1.0);
        assert_eq!(weighted_function_bonus(ChordSymbol::VI, Mode::Major), 4.0);
        assert_eq!(weighted_function_bonus(ChordSymbol::II, Mode::Minor), 3.0);
    }

    #[test]
    fn test_weighted_score() {
        let input = Input::weighted(&[("C", 0.5), ("E", 0.25), ("G", 0.25)]).unwrap();
        let chord = entry("CMajor", ChordSymbol::I, &["C", "E", "G"]);
        let stats = MatchStats::analyze(&input, &chord);
        let score = score_weighted(&input, &chord, &stats, &ScoringWeights::default());

        // pitch 100 * 1.0, names 1000 * 1.0, root 500 * 0.5 + 10 * 0.5, edit 60, bonus 5
        assert!((score - (100.0 + 1000.0 + 250.0 + 5.0 + 60.0 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_prefers_salient_notes() {
        let input = Input::weighted(&[("C", 0.3), ("E", 0.3), ("G", 0.3), ("B", 0.1)]).unwrap();
        let weights = ScoringWeights::default();

        let tonic = entry("CMajor", ChordSymbol::III, &["C", "E", "G"]);
        let other = entry("CMajor", ChordSymbol::III, &["B", "D#", "F#"]);

        let tonic_score = score_weighted(&input, &tonic, &MatchStats::analyze(&input, &tonic), &weights);
        let other_score = score_weighted(&input, &other, &MatchStats::analyze(&input, &other), &weights);
        assert!(tonic_score > other_score);
    }
}
