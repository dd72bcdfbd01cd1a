//! Indexed, immutable view of the element property table.
//!
//! The index is strict: a duplicate symbol, a missing column, or an unusable
//! number anywhere in the source rejects the whole load, so callers never see a
//! partially populated catalog.

use crate::catalog::model::{AggregateRecord, ElementRecord, check_property, read_csv_records};
use crate::catalog::schema::read_json_records;
use crate::catalog::symbol::ElementSymbol;
use crate::error::{CatalogError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Clone, Debug)]
/// Element records keyed by canonical symbol.
pub struct ElementCatalog {
    by_symbol: BTreeMap<ElementSymbol, ElementRecord>,
}

impl ElementCatalog {
    /// Load a property table from disk.
    ///
    /// `.json` files are read as versioned catalog documents; anything else is
    /// treated as a delimited table with a header row.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_reader(reader)?
        } else {
            Self::from_csv_reader(reader)?
        };
        tracing::debug!(
            path = %path.display(),
            elements = catalog.len(),
            "loaded element catalog"
        );
        Ok(catalog)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_records(read_csv_records(reader)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_records(read_json_records(reader)?)
    }

    /// Build the index from already-decoded records.
    pub fn from_records(records: impl IntoIterator<Item = ElementRecord>) -> Result<Self> {
        let mut by_symbol = BTreeMap::new();
        for (idx, record) in records.into_iter().enumerate() {
            let row = idx + 1;
            if !ElementSymbol::is_canonical(record.symbol.as_str()) {
                return Err(CatalogError::malformed(
                    row,
                    format!("symbol '{}' is not canonical", record.symbol),
                ));
            }
            check_property(row, &record.symbol, "molecular_weight", record.molecular_weight)?;
            check_property(row, &record.symbol, "molar_volume", record.molar_volume)?;
            check_property(row, &record.symbol, "atomic_radius", record.atomic_radius)?;
            if by_symbol.contains_key(&record.symbol) {
                return Err(CatalogError::DuplicateSymbol(record.symbol.to_string()));
            }
            by_symbol.insert(record.symbol.clone(), record);
        }
        if by_symbol.is_empty() {
            return Err(CatalogError::malformed(0, "source contains no element records"));
        }
        Ok(Self { by_symbol })
    }

    /// Resolve a possibly decorated symbol (`_K`, `Cl-`) to its record.
    pub fn lookup(&self, symbol: &str) -> Result<&ElementRecord> {
        let symbol = ElementSymbol::parse(symbol)?;
        self.get(&symbol)
            .ok_or_else(|| CatalogError::UnknownElement(symbol.to_string()))
    }

    pub fn get(&self, symbol: &ElementSymbol) -> Option<&ElementRecord> {
        self.by_symbol.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    /// Iterates records in symbol order.
    pub fn records(&self) -> impl Iterator<Item = &ElementRecord> {
        self.by_symbol.values()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Weighted mean of each property: `sum(w_i * f_i) / sum(w_i)`.
    ///
    /// Individual weights may be zero; the total must be positive.
    pub fn weighted_aggregate<'a, I>(entries: I) -> Result<AggregateRecord>
    where
        I: IntoIterator<Item = (&'a ElementRecord, f64)>,
    {
        let mut seen = 0usize;
        let mut last_symbol = String::new();
        let mut total_weight = 0.0;
        let mut molecular_weight = 0.0;
        let mut molar_volume = 0.0;
        let mut atomic_radius = 0.0;

        for (record, weight) in entries {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CatalogError::InvalidWeight {
                    symbol: record.symbol.to_string(),
                    weight,
                });
            }
            seen += 1;
            last_symbol = record.symbol.to_string();
            total_weight += weight;
            molecular_weight += weight * record.molecular_weight;
            molar_volume += weight * record.molar_volume;
            atomic_radius += weight * record.atomic_radius;
        }

        if seen == 0 {
            return Err(CatalogError::EmptyAggregate);
        }
        if total_weight <= 0.0 {
            return Err(CatalogError::NonPositiveWeight(total_weight));
        }
        // Individually finite weights can still overflow once summed.
        if ![total_weight, molecular_weight, molar_volume, atomic_radius]
            .iter()
            .all(|sum| sum.is_finite())
        {
            return Err(CatalogError::InvalidWeight {
                symbol: last_symbol,
                weight: total_weight,
            });
        }

        Ok(AggregateRecord {
            weighted_molecular_weight: molecular_weight / total_weight,
            weighted_molar_volume: molar_volume / total_weight,
            weighted_atomic_radius: atomic_radius / total_weight,
            total_weight,
        })
    }
}
