//! Precomputed model scores (R²) for the previous and proposed feature sets.
//!
//! Tables have one row per `(id, type, value)` where `type` is `old` for the
//! compound-level features and `new` for the family-refactored ones. Extra
//! columns such as a spreadsheet index are ignored.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Previous,
    Proposed,
}

impl Method {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "old" | "previous" => Some(Method::Previous),
            "new" | "proposed" => Some(Method::Proposed),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreRow {
    pub id: String,
    pub method: Method,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
/// Scores of the selected ids split by method, each in table order.
pub struct MethodComparison {
    pub previous: Vec<f64>,
    pub proposed: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct ScoreTable {
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn load(path: &Path) -> Result<Self> {
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        tracing::debug!(path = %path.display(), rows = table.rows.len(), "loaded score table");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (idx, result) in rdr.deserialize::<RawScore>().enumerate() {
            let row = idx + 1;
            let raw = result.map_err(|err| CatalogError::MalformedScore {
                row,
                reason: err.to_string(),
            })?;
            if raw.id.is_empty() {
                return Err(CatalogError::MalformedScore {
                    row,
                    reason: "missing id".to_string(),
                });
            }
            let method = Method::parse(&raw.kind).ok_or_else(|| CatalogError::MalformedScore {
                row,
                reason: format!("type '{}' is neither old nor new", raw.kind),
            })?;
            if !raw.value.is_finite() {
                return Err(CatalogError::MalformedScore {
                    row,
                    reason: format!("value {} is not finite", raw.value),
                });
            }
            rows.push(ScoreRow {
                id: raw.id,
                method,
                value: raw.value,
            });
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// Distinct ids in first-seen order.
    pub fn ids(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .map(|row| row.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Scores of the selected ids. Ids absent from the table select nothing.
    pub fn compare<S: AsRef<str>>(&self, selected: &[S]) -> MethodComparison {
        let selected: BTreeSet<&str> = selected.iter().map(|id| id.as_ref().trim()).collect();
        let mut comparison = MethodComparison::default();
        for row in self.rows.iter().filter(|row| selected.contains(row.id.as_str())) {
            match row.method {
                Method::Previous => comparison.previous.push(row.value),
                Method::Proposed => comparison.proposed.push(row.value),
            }
        }
        comparison
    }
}
