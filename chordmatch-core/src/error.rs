use thiserror::Error;

/// Errors raised while building a catalog or answering a query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid note `{0}`")]
    InvalidNote(String),

    #[error("Invalid weight {weight} for note `{note}`")]
    InvalidWeight { note: String, weight: f64 },

    #[error("Index references chord `{0}` which is not in the catalog")]
    CatalogIntegrity(String),

    #[error("Invalid catalog entry `{identity}`: {reason}")]
    InvalidEntry { identity: String, reason: String },

    #[error("Unknown chord symbol `{0}`")]
    UnknownChordSymbol(String),

    #[error("Invalid key `{0}`")]
    InvalidKey(String),

    #[error("Invalid pitch-class combination `{0}`")]
    InvalidCombination(String),

    #[error("Duplicate chord identity `{0}`")]
    DuplicateIdentity(String),

    #[cfg(feature = "serde")]
    #[error("Malformed JSON: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(feature = "serde")]
impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Json(err.to_string())
    }
}
