use crate::catalog::ChordEntry;
use crate::error::{MatchError, Result};
use crate::types::{parse_notes, strip_marker, NoteName, PitchClass};

/// Edit distance reported when two sequences differ in length by two or more
pub const INCOMPARABLE_DISTANCE: u32 = 999;

/// One input note with its salience (1.0 for plain queries)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputNote {
    pub name: NoteName,
    pub weight: f64,
}

/// Normalized query notes.
///
/// Notes keep their input order with repeated spellings dropped (the first
/// occurrence wins); pitch classes are sorted and deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    notes: Vec<InputNote>,
    sorted: Vec<PitchClass>,
}

impl Input {
    /// Parse plain note tokens
    pub fn plain<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let notes = parse_notes(tokens)?
            .into_iter()
            .map(|name| InputNote { name, weight: 1.0 })
            .collect();
        Ok(Self::from_notes(notes))
    }

    /// Parse note tokens paired with salience weights
    pub fn weighted<S: AsRef<str>>(pairs: &[(S, f64)]) -> Result<Self> {
        let tokens: Vec<&str> = pairs.iter().map(|(token, _)| token.as_ref()).collect();
        let pairs = &pairs[..strip_marker(&tokens).len()];

        let notes = pairs
            .iter()
            .map(|(token, weight)| {
                let token = token.as_ref();
                if !weight.is_finite() || *weight < 0.0 {
                    return Err(MatchError::InvalidWeight {
                        note: token.to_string(),
                        weight: *weight,
                    });
                }
                Ok(InputNote {
                    name: token.parse()?,
                    weight: *weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_notes(notes))
    }

    fn from_notes(notes: Vec<InputNote>) -> Self {
        let mut unique: Vec<InputNote> = Vec::with_capacity(notes.len());
        for note in notes {
            if !unique.iter().any(|n| n.name == note.name) {
                unique.push(note);
            }
        }

        let mut sorted: Vec<PitchClass> = unique.iter().map(|n| n.name.pitch_class()).collect();
        sorted.sort_unstable();
        sorted.dedup();

        Input {
            notes: unique,
            sorted,
        }
    }

    pub fn notes(&self) -> &[InputNote] {
        &self.notes
    }

    /// Distinct pitch classes, ascending
    pub fn sorted_pitch_classes(&self) -> &[PitchClass] {
        &self.sorted
    }

    pub fn first(&self) -> Option<NoteName> {
        self.notes.first().map(|n| n.name)
    }

    pub fn contains_name(&self, name: &NoteName) -> bool {
        self.notes.iter().any(|n| n.name == *name)
    }

    /// Weight of the input note spelled `name`, zero if absent
    pub fn weight_of(&self, name: &NoteName) -> f64 {
        self.notes
            .iter()
            .find(|n| n.name == *name)
            .map_or(0.0, |n| n.weight)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// How one candidate chord relates to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStats {
    /// Distinct input pitch classes found in the chord
    pub pitch_matches: usize,
    /// Distinct input note names found in the chord
    pub name_matches: usize,
    /// The chord's root is among the input names
    pub root_present: bool,
    /// The chord's root is the first input name
    pub root_first: bool,
    pub edit_distance: u32,
    /// Input and chord have the same number of pitch classes
    pub length_match: bool,
}

impl MatchStats {
    pub fn analyze(input: &Input, entry: &ChordEntry) -> Self {
        let chord_pcs = entry.pitch_classes();
        let root = entry.root();

        let pitch_matches = input
            .sorted_pitch_classes()
            .iter()
            .filter(|&pc| chord_pcs.contains(pc))
            .count();
        let name_matches = input
            .notes()
            .iter()
            .filter(|n| entry.names().contains(&n.name))
            .count();

        MatchStats {
            pitch_matches,
            name_matches,
            root_present: input.contains_name(&root),
            root_first: input.first() == Some(root),
            edit_distance: edit_distance(input.sorted_pitch_classes(), chord_pcs),
            length_match: input.sorted_pitch_classes().len() == chord_pcs.len(),
        }
    }
}

/// Sum of positional differences between two pitch-class sequences.
///
/// When one sequence is a single element longer its last element is
/// ignored; a larger gap is not comparable and yields
/// [`INCOMPARABLE_DISTANCE`].
pub fn edit_distance(a: &[PitchClass], b: &[PitchClass]) -> u32 {
    if a.len().abs_diff(b.len()) >= 2 {
        return INCOMPARABLE_DISTANCE;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| x.abs_diff(*y) as u32)
        .sum()
}
