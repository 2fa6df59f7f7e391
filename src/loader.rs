//! Loading and saving the catalog and index files

use crate::config::Config;
use anyhow::{Context, Result};
use chordmatch_core::{standard_catalog, Catalog, CombinationIndex, Matcher};
use std::path::Path;
use std::sync::Arc;

/// Load a JSON catalog, or build the standard one when no path is given
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return standard_catalog().context("could not build the standard catalog");
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("could not read catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    log::info!("loaded {} chords from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn load_index(path: &Path) -> Result<CombinationIndex> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("could not read index {}", path.display()))?;
    let index = CombinationIndex::from_json(&json)
        .with_context(|| format!("invalid index {}", path.display()))?;
    log::info!("loaded {} combinations from {}", index.len(), path.display());
    Ok(index)
}

/// Build the matcher the front ends share. Paths given on the command line
/// take precedence over the configured ones.
pub fn load_matcher(
    config: &Config,
    catalog_path: Option<&Path>,
    index_path: Option<&Path>,
) -> Result<Arc<Matcher>> {
    let catalog = load_catalog(catalog_path.or(config.catalog_path()))?;

    let matcher = match index_path.or(config.index_path()) {
        Some(path) => {
            let matcher = Matcher::with_index(catalog, load_index(path)?);
            matcher
                .validate()
                .with_context(|| format!("index {} does not match the catalog", path.display()))?;
            matcher
        }
        None => Matcher::new(catalog),
    };

    Ok(Arc::new(matcher.with_weights(config.scoring())))
}

pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = catalog.to_json()?;
    std::fs::write(path, json).with_context(|| format!("could not write {}", path.display()))
}

pub fn write_index(index: &CombinationIndex, path: &Path) -> Result<()> {
    let json = index.to_json()?;
    std::fs::write(path, json).with_context(|| format!("could not write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordmatch_core::Query;

    #[test]
    fn test_default_matcher_uses_standard_catalog() {
        let matcher = load_matcher(&Config::default(), None, None).unwrap();
        assert_eq!(matcher.catalog().len(), standard_catalog().unwrap().len());
    }

    #[test]
    fn test_exported_files_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        let index_path = dir.path().join("index.json");

        let matcher = load_matcher(&Config::default(), None, None).unwrap();
        write_catalog(matcher.catalog(), &catalog_path).unwrap();
        write_index(matcher.index(), &index_path).unwrap();

        let loaded =
            load_matcher(&Config::default(), Some(&catalog_path), Some(&index_path)).unwrap();
        let notes = ["G", "B", "D", "F"];
        assert_eq!(
            loaded.match_notes(&notes, &Query::new()).unwrap(),
            matcher.match_notes(&notes, &Query::new()).unwrap()
        );
    }

    #[test]
    fn test_index_for_other_catalog_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index.json");
        std::fs::write(&index_path, r#"{"0,4,7": ["NoSuchChord"]}"#).unwrap();

        let err = load_matcher(&Config::default(), None, Some(&index_path)).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/catalog.json"))).unwrap_err();
        assert!(err.to_string().contains("could not read catalog"));
    }
}
