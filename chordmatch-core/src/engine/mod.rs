//! Matching engine
//!
//! A query's distinct pitch classes are split into every 2-4 note
//! combination (starting from the query threshold), each combination is
//! looked up in the [`CombinationIndex`], and the union of the returned
//! chords is scored and ranked. The catalog is never scanned as a whole.

pub mod scoring;
pub mod stats;

use crate::catalog::{Catalog, ChordEntry};
use crate::config::{clamp_threshold, ScoringWeights, DEFAULT_NUM_OUT, DEFAULT_THRESHOLD};
use crate::error::{MatchError, Result};
use crate::index::{CombinationIndex, Combinations, MAX_COMBINATION};
use crate::types::{ChordSymbol, Key};
use std::collections::BTreeSet;

pub use stats::{edit_distance, Input, InputNote, MatchStats, INCOMPARABLE_DISTANCE};

/// Per-query options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Only keep chords from this key
    pub key: Option<Key>,
    /// Maximum number of results
    pub num_out: usize,
    /// Smallest input combination used to find candidates, clamped to 2-4
    pub threshold: usize,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_num_out(mut self, num_out: usize) -> Self {
        self.num_out = num_out;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Default for Query {
    fn default() -> Self {
        Self {
            key: None,
            num_out: DEFAULT_NUM_OUT,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// One ranked candidate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchResult {
    pub identity: String,
    pub key: Key,
    pub symbol: ChordSymbol,
    pub score: f64,
    pub pitch_matches: usize,
    pub name_matches: usize,
    pub root_present: bool,
    /// Only reported by weighted queries
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub root_first: Option<bool>,
    pub edit_distance: u32,
    pub length_match: bool,
}

impl MatchResult {
    fn new(entry: &ChordEntry, score: f64, stats: &MatchStats, root_first: Option<bool>) -> Self {
        MatchResult {
            identity: entry.identity().to_string(),
            key: *entry.key(),
            symbol: entry.symbol(),
            score,
            pitch_matches: stats.pitch_matches,
            name_matches: stats.name_matches,
            root_present: stats.root_present,
            root_first,
            edit_distance: stats.edit_distance,
            length_match: stats.length_match,
        }
    }
}

/// Scores queries against a catalog through its combination index.
///
/// Both the catalog and the index are read-only once the matcher exists, so
/// a matcher can be shared between threads freely.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Catalog,
    index: CombinationIndex,
    weights: ScoringWeights,
}

impl Matcher {
    /// Create a matcher, building the index from the catalog
    pub fn new(catalog: Catalog) -> Self {
        let index = CombinationIndex::build(&catalog);
        Self::with_index(catalog, index)
    }

    /// Create a matcher from a prebuilt index. Identities the index names
    /// but the catalog lacks surface as errors when a query reaches them;
    /// call [`Matcher::validate`] to check up front.
    pub fn with_index(catalog: Catalog, index: CombinationIndex) -> Self {
        Matcher {
            catalog,
            index,
            weights: ScoringWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &CombinationIndex {
        &self.index
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Check that the index only references chords in the catalog
    pub fn validate(&self) -> Result<()> {
        let result = self.index.validate(&self.catalog);
        if let Err(ref err) = result {
            log::warn!("{}", err);
        }
        result
    }

    /// Rank chords for plain note tokens
    pub fn match_notes<S: AsRef<str>>(&self, notes: &[S], query: &Query) -> Result<Vec<MatchResult>> {
        let input = Input::plain(notes)?;
        self.rank(&input, query, |entry| {
            let stats = MatchStats::analyze(&input, entry);
            let score = scoring::score_plain(&stats, entry.symbol(), &self.weights);
            MatchResult::new(entry, score, &stats, None)
        })
    }

    /// Rank chords for note tokens paired with salience weights
    pub fn match_weighted<S: AsRef<str>>(
        &self,
        notes: &[(S, f64)],
        query: &Query,
    ) -> Result<Vec<MatchResult>> {
        let input = Input::weighted(notes)?;
        self.rank(&input, query, |entry| {
            let stats = MatchStats::analyze(&input, entry);
            let score = scoring::score_weighted(&input, entry, &stats, &self.weights);
            MatchResult::new(entry, score, &stats, Some(stats.root_first))
        })
    }

    /// Chord identities sharing at least one combination of `threshold` or
    /// more notes with the input
    pub fn candidates(&self, input: &Input, threshold: usize) -> BTreeSet<&str> {
        let pcs = input.sorted_pitch_classes();
        let largest = MAX_COMBINATION.min(pcs.len());

        let mut candidates = BTreeSet::new();
        for k in clamp_threshold(threshold)..=largest {
            for combination in Combinations::new(pcs, k) {
                if let Some(ids) = self.index.lookup(combination) {
                    log::trace!("{} -> {} chords", combination, ids.len());
                    candidates.extend(ids.iter().map(String::as_str));
                }
            }
        }
        candidates
    }

    fn rank<F>(&self, input: &Input, query: &Query, score: F) -> Result<Vec<MatchResult>>
    where
        F: Fn(&ChordEntry) -> MatchResult,
    {
        let candidates = self.candidates(input, query.threshold);
        log::debug!(
            "{} candidates for {} pitch classes",
            candidates.len(),
            input.sorted_pitch_classes().len()
        );

        let mut results = Vec::with_capacity(candidates.len());
        for identity in candidates {
            let entry = self
                .catalog
                .get(identity)
                .ok_or_else(|| MatchError::CatalogIntegrity(identity.to_string()))?;
            if let Some(key) = &query.key {
                if entry.key().normalized() != key.normalized() {
                    continue;
                }
            }
            results.push(score(entry));
        }

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.identity.cmp(&a.identity))
        });
        results.truncate(query.num_out);
        Ok(results)
    }
}
