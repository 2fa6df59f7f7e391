//! Combination index
//!
//! Reverse lookup from a pitch-class combination to the chords containing
//! it. Every 2-, 3- and 4-note subset of every catalog chord's distinct
//! pitch classes is indexed, so a query only has to look up its own subsets
//! instead of comparing against the whole catalog.

use crate::catalog::Catalog;
use crate::error::{MatchError, Result};
use crate::types::PitchClass;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Smallest combination the index stores
pub const MIN_COMBINATION: usize = 2;
/// Largest combination the index stores
pub const MAX_COMBINATION: usize = 4;

/// Set of pitch classes stored as a 12-bit mask.
///
/// A sorted, deduplicated pitch-class sequence maps to exactly one mask,
/// which makes this the canonical index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PitchClassSet(u16);

impl PitchClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pc: PitchClass) {
        self.0 |= 1 << (pc % 12);
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        pc < 12 && self.0 & (1 << pc) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        (0..12u8).filter(move |&pc| self.contains(pc))
    }
}

impl FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchClassSet::new();
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}

impl fmt::Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|pc| pc.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for PitchClassSet {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let mut set = PitchClassSet::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<PitchClass>() {
                Ok(pc) if pc < 12 => set.insert(pc),
                _ => return Err(MatchError::InvalidCombination(s.to_string())),
            }
        }
        Ok(set)
    }
}

/// Every `k`-element subset of `pool`, in lexicographic order of positions
pub struct Combinations<'a> {
    pool: &'a [PitchClass],
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(pool: &'a [PitchClass], k: usize) -> Self {
        Combinations {
            pool,
            indices: (0..k).collect(),
            started: false,
            done: k > pool.len(),
        }
    }

    fn current(&self) -> PitchClassSet {
        self.indices.iter().map(|&i| self.pool[i]).collect()
    }
}

impl Iterator for Combinations<'_> {
    type Item = PitchClassSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }

        let n = self.pool.len();
        let k = self.indices.len();
        // Rightmost position that can still advance
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + n - k) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.current())
    }
}

/// Reverse index from pitch-class combination to chord identities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinationIndex {
    entries: HashMap<PitchClassSet, BTreeSet<String>>,
}

impl CombinationIndex {
    /// Index every 2-4 note subset of every catalog chord
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = CombinationIndex::default();
        for entry in catalog.entries() {
            let pcs = entry.unique_pitch_classes();
            for k in MIN_COMBINATION..=MAX_COMBINATION {
                for subset in Combinations::new(&pcs, k) {
                    index.insert(subset, entry.identity());
                }
            }
        }
        log::info!(
            "indexed {} chords under {} combinations",
            catalog.len(),
            index.len()
        );
        index
    }

    pub(crate) fn insert(&mut self, combination: PitchClassSet, identity: &str) {
        self.entries
            .entry(combination)
            .or_default()
            .insert(identity.to_string());
    }

    /// Chords containing exactly this combination among their subsets
    pub fn lookup(&self, combination: PitchClassSet) -> Option<&BTreeSet<String>> {
        self.entries.get(&combination)
    }

    /// Number of distinct combinations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every identity referenced by the index, without repeats
    pub fn identities(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .flat_map(|ids| ids.iter().map(String::as_str))
            .collect()
    }

    /// Check that every referenced identity exists in `catalog`
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        match self.identities().into_iter().find(|id| !catalog.contains(id)) {
            Some(missing) => Err(MatchError::CatalogIntegrity(missing.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "serde")]
impl CombinationIndex {
    /// Serialize as an object keyed by comma-joined pitch classes (`"0,4,7"`)
    pub fn to_json(&self) -> Result<String> {
        let rows: std::collections::BTreeMap<String, &BTreeSet<String>> = self
            .entries
            .iter()
            .map(|(combination, ids)| (combination.to_string(), ids))
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let rows: HashMap<String, BTreeSet<String>> = serde_json::from_str(json)?;
        let mut index = CombinationIndex::default();
        for (key, identities) in rows {
            let combination: PitchClassSet = key.parse()?;
            index.entries.entry(combination).or_default().extend(identities);
        }
        Ok(index)
    }
}
