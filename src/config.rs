//! Layered configuration
//!
//! The embedded `config.toml` supplies every default. A user file, either
//! `<config_dir>/chordmatch/config.toml` or the path given with `--config`,
//! overrides individual values.

use anyhow::{Context, Result};
use chordmatch_core::config::{clamp_threshold, DEFAULT_NUM_OUT, DEFAULT_THRESHOLD};
use chordmatch_core::{Key, Query, ScoringWeights};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    matching: MatchingConfig,
    #[serde(default)]
    catalog: CatalogConfig,
    scoring: Option<ScoringWeights>,
}

#[derive(Deserialize, Default)]
struct MatchingConfig {
    num_out: Option<usize>,
    threshold: Option<usize>,
    key: Option<String>,
    weighted_default_weight: Option<f64>,
}

#[derive(Deserialize, Default)]
struct CatalogConfig {
    path: Option<PathBuf>,
    index_path: Option<PathBuf>,
}

pub struct Config {
    matching: MatchingConfig,
    catalog: CatalogConfig,
    scoring: Option<ScoringWeights>,
}

impl Config {
    /// Embedded defaults overlaid by the user config file, if there is one.
    /// A user file that cannot be read or parsed is logged and skipped.
    pub fn load() -> Self {
        let mut base = embedded();

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge(&mut base, user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Self::from_file(base)
    }

    /// Embedded defaults overlaid by an explicitly chosen file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        let user: ConfigFile = toml::from_str(&contents)
            .with_context(|| format!("malformed config {}", path.display()))?;

        let mut base = embedded();
        merge(&mut base, user);
        Ok(Self::from_file(base))
    }

    fn from_file(file: ConfigFile) -> Self {
        Config {
            matching: file.matching,
            catalog: file.catalog,
            scoring: file.scoring,
        }
    }

    pub fn num_out(&self) -> usize {
        self.matching.num_out.unwrap_or(DEFAULT_NUM_OUT)
    }

    pub fn threshold(&self) -> usize {
        clamp_threshold(self.matching.threshold.unwrap_or(DEFAULT_THRESHOLD))
    }

    /// Default key filter. An unparseable key is logged and ignored.
    pub fn key(&self) -> Option<Key> {
        let raw = self.matching.key.as_deref()?;
        match raw.parse() {
            Ok(key) => Some(key),
            Err(e) => {
                log::warn!(target: "config", "ignoring key {:?}: {}", raw, e);
                None
            }
        }
    }

    /// Weight given to notes entered without one in weighted queries
    pub fn default_weight(&self) -> f64 {
        self.matching
            .weighted_default_weight
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or(1.0)
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog.path.as_deref()
    }

    pub fn index_path(&self) -> Option<&Path> {
        self.catalog.index_path.as_deref()
    }

    pub fn scoring(&self) -> ScoringWeights {
        self.scoring.unwrap_or_default()
    }

    /// Query options built from the `[matching]` section
    pub fn query(&self) -> Query {
        let query = Query::new()
            .with_num_out(self.num_out())
            .with_threshold(self.threshold());
        match self.key() {
            Some(key) => query.with_key(key),
            None => query,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(embedded())
    }
}

fn embedded() -> ConfigFile {
    match toml::from_str(DEFAULT_CONFIG) {
        Ok(file) => file,
        Err(e) => {
            log::error!(target: "config", "embedded config.toml is malformed: {}", e);
            ConfigFile::default()
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chordmatch").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    merge_matching(&mut base.matching, user.matching);
    merge_catalog(&mut base.catalog, user.catalog);
    if user.scoring.is_some() {
        base.scoring = user.scoring;
    }
}

fn merge_matching(base: &mut MatchingConfig, user: MatchingConfig) {
    if user.num_out.is_some() {
        base.num_out = user.num_out;
    }
    if user.threshold.is_some() {
        base.threshold = user.threshold;
    }
    if user.key.is_some() {
        base.key = user.key;
    }
    if user.weighted_default_weight.is_some() {
        base.weighted_default_weight = user.weighted_default_weight;
    }
}

fn merge_catalog(base: &mut CatalogConfig, user: CatalogConfig) {
    if user.path.is_some() {
        base.path = user.path;
    }
    if user.index_path.is_some() {
        base.index_path = user.index_path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_embedded_config() {
        let file: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        let config = Config::from_file(file);
        assert_eq!(config.num_out(), 10);
        assert_eq!(config.threshold(), 2);
        assert_eq!(config.key(), None);
        assert_eq!(config.default_weight(), 1.0);
        assert!(config.catalog_path().is_none());
        assert_eq!(config.scoring(), ScoringWeights::default());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
            [matching]
            num_out = 3
            key = "aMinor"

            [catalog]
            path = "chords.json"
            "#,
        );
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.num_out(), 3);
        // Untouched values keep their defaults
        assert_eq!(config.threshold(), 2);
        assert_eq!(config.catalog_path(), Some(Path::new("chords.json")));

        let query = config.query();
        assert_eq!(query.num_out, 3);
        assert_eq!(query.key.unwrap().normalized(), "AMINOR");
    }

    #[test]
    fn test_partial_scoring_override() {
        let (_dir, path) = write_config("[scoring]\nroot_present = 250.0\n");
        let scoring = Config::load_from(&path).unwrap().scoring();
        assert_eq!(scoring.root_present, 250.0);
        assert_eq!(scoring.pitch_match, 1000.0);
    }

    #[test]
    fn test_out_of_range_values() {
        let (_dir, path) = write_config(
            r#"
            [matching]
            threshold = 9
            key = "HMajor"
            weighted_default_weight = -2.0
            "#,
        );
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.threshold(), 4);
        assert_eq!(config.key(), None);
        assert_eq!(config.default_weight(), 1.0);
    }

    #[test]
    fn test_malformed_explicit_config_is_error() {
        let (_dir, path) = write_config("[matching\nnum_out = ");
        assert!(Config::load_from(&path).is_err());
        assert!(Config::load_from(Path::new("/nonexistent/chordmatch.toml")).is_err());
    }
}
