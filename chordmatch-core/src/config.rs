//! Matching configuration types
//!
//! Pure data: query defaults and the constants of both scoring functions.
//! Front ends fill these from their own config files.

use crate::index::{MAX_COMBINATION, MIN_COMBINATION};

/// Results returned when the caller does not say otherwise
pub const DEFAULT_NUM_OUT: usize = 10;

/// Smallest input sub-combination used to find candidates by default
pub const DEFAULT_THRESHOLD: usize = MIN_COMBINATION;

/// Clamp a candidate threshold to the combination sizes the index stores.
/// Thresholds below 2 act as 2 and thresholds above 4 act as 4.
pub fn clamp_threshold(threshold: usize) -> usize {
    threshold.clamp(MIN_COMBINATION, MAX_COMBINATION)
}

/// Constants of the scoring functions.
///
/// The plain variant counts matches; the weighted variant multiplies each
/// match by the input note's salience, and scales pitch and name matches
/// the other way round.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringWeights {
    /// Per shared pitch class (plain)
    pub pitch_match: f64,
    /// Per shared note name (plain)
    pub name_match: f64,
    /// Per unit of weight on a shared pitch class (weighted)
    pub weighted_pitch_match: f64,
    /// Per unit of weight on a shared note name (weighted)
    pub weighted_name_match: f64,
    /// Chord root among the input notes
    pub root_present: f64,
    /// Chord root is the first input note (weighted)
    pub root_first: f64,
    /// Numerator of the `n / (edit_distance + 1)` term, integer division
    pub edit_distance_numerator: u32,
    /// Subtracted when input and chord have different sizes
    pub length_mismatch_penalty: f64,
}

impl ScoringWeights {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            pitch_match: 1000.0,
            name_match: 100.0,
            weighted_pitch_match: 100.0,
            weighted_name_match: 1000.0,
            root_present: 500.0,
            root_first: 10.0,
            edit_distance_numerator: 60,
            length_mismatch_penalty: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_clamping() {
        assert_eq!(clamp_threshold(0), 2);
        assert_eq!(clamp_threshold(1), 2);
        assert_eq!(clamp_threshold(3), 3);
        assert_eq!(clamp_threshold(4), 4);
        assert_eq!(clamp_threshold(9), 4);
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.pitch_match, 1000.0);
        assert_eq!(weights.weighted_name_match, 1000.0);
        assert_eq!(weights.edit_distance_numerator, 60);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_weights_fill_defaults() {
        let weights: ScoringWeights = serde_json::from_str(r#"{"root_present": 250.0}"#).unwrap();
        assert_eq!(weights.root_present, 250.0);
        assert_eq!(weights.pitch_match, 1000.0);
    }
}
