//! Error kinds surfaced by the catalog, classifier, and feature helpers.
//!
//! Every failure here is a deterministic data-integrity or caller-usage fault;
//! nothing is retried or papered over with a default value.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A source row is missing a column, or a numeric cell is unusable.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("duplicate element symbol '{0}'")]
    DuplicateSymbol(String),

    #[error("unknown element '{0}'")]
    UnknownElement(String),

    /// The symbol was empty once decoration was stripped.
    #[error("malformed element symbol '{0}'")]
    MalformedSymbol(String),

    #[error("cannot aggregate an empty set of records")]
    EmptyAggregate,

    #[error("total weight must be positive, got {0}")]
    NonPositiveWeight(f64),

    #[error("weight for '{symbol}' must be finite and non-negative, got {weight}")]
    InvalidWeight { symbol: String, weight: f64 },

    /// Two families claim the same member symbol.
    #[error("element '{symbol}' is claimed by both {first} and {second}")]
    FamilyOverlap {
        symbol: String,
        first: String,
        second: String,
    },

    #[error("unknown family '{0}'")]
    UnknownFamily(String),

    #[error("malformed score at row {row}: {reason}")]
    MalformedScore { row: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }
}
