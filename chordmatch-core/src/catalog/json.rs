//! JSON form of the catalog, an object keyed by identity:
//!
//! ```json
//! { "CMajorI": { "idx": [0, 4, 7], "naming": ["C", "E", "G"], "chord": "I", "key": "CMajor" } }
//! ```

use crate::catalog::{Catalog, ChordEntry};
use crate::error::Result;
use crate::types::{ChordSymbol, Key, NoteName, PitchClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize)]
struct Row {
    idx: Vec<PitchClass>,
    naming: Vec<NoteName>,
    chord: ChordSymbol,
    key: Key,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: BTreeMap<String, Row> = serde_json::from_str(json)?;
        let entries = rows
            .into_iter()
            .map(|(identity, row)| ChordEntry::new(identity, row.key, row.chord, row.idx, row.naming))
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(entries)
    }

    pub fn to_json(&self) -> Result<String> {
        let rows: BTreeMap<&str, Row> = self
            .entries()
            .map(|entry| {
                let row = Row {
                    idx: entry.pitch_classes().to_vec(),
                    naming: entry.names().to_vec(),
                    chord: entry.symbol(),
                    key: *entry.key(),
                };
                (entry.identity(), row)
            })
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }
}
