//! Record types for the element property table and their tabular decoding.
//!
//! The property table comes from a spreadsheet export, so the CSV reader
//! accepts both the snake_case column names and the spreadsheet headers
//! (`MolecularFormula`, `MolecularWeight`, `Molar_volume`, `Atomic_radius`).
//! Row numbers in errors are 1-based data rows; row 0 is the header.

use crate::catalog::symbol::ElementSymbol;
use crate::error::{CatalogError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Physical properties of one element as stored in the catalog.
pub struct ElementRecord {
    pub symbol: ElementSymbol,
    /// g/mol
    pub molecular_weight: f64,
    /// cm³/mol
    pub molar_volume: f64,
    /// pm
    pub atomic_radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
/// Weighted means of the three catalog properties over a group of records.
pub struct AggregateRecord {
    pub weighted_molecular_weight: f64,
    pub weighted_molar_volume: f64,
    pub weighted_atomic_radius: f64,
    pub total_weight: f64,
}

/// Catalog fields a tabular source must provide.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Column {
    Symbol,
    MolecularWeight,
    MolarVolume,
    AtomicRadius,
}

impl Column {
    const ALL: [Column; 4] = [
        Column::Symbol,
        Column::MolecularWeight,
        Column::MolarVolume,
        Column::AtomicRadius,
    ];

    fn name(self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::MolecularWeight => "molecular_weight",
            Column::MolarVolume => "molar_volume",
            Column::AtomicRadius => "atomic_radius",
        }
    }

    fn matches_header(self, header: &str) -> bool {
        let header = header.trim();
        let aliases: &[&str] = match self {
            Column::Symbol => &["symbol", "molecularformula"],
            Column::MolecularWeight => &["molecular_weight", "molecularweight"],
            Column::MolarVolume => &["molar_volume", "molarvolume"],
            Column::AtomicRadius => &["atomic_radius", "atomicradius"],
        };
        aliases
            .iter()
            .any(|alias| header.eq_ignore_ascii_case(alias))
    }
}

/// Header positions of the four required columns.
struct ColumnMap {
    positions: [usize; 4],
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; 4];
        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            *slot = headers
                .iter()
                .position(|header| column.matches_header(header))
                .ok_or_else(|| {
                    CatalogError::malformed(0, format!("missing column '{}'", column.name()))
                })?;
        }
        Ok(Self { positions })
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        let idx = match column {
            Column::Symbol => self.positions[0],
            Column::MolecularWeight => self.positions[1],
            Column::MolarVolume => self.positions[2],
            Column::AtomicRadius => self.positions[3],
        };
        record.get(idx).map(str::trim).filter(|cell| !cell.is_empty())
    }
}

/// Decode every row of a delimited property table.
///
/// Does not check for duplicate symbols; `ElementCatalog` owns that rule.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<ElementRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::resolve(rdr.headers()?)?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|err| CatalogError::malformed(row, err.to_string()))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push(record_from_cells(row, &columns, &record)?);
    }
    Ok(records)
}

fn record_from_cells(row: usize, columns: &ColumnMap, record: &StringRecord) -> Result<ElementRecord> {
    let raw_symbol = columns
        .cell(record, Column::Symbol)
        .ok_or_else(|| CatalogError::malformed(row, "missing symbol"))?;
    let symbol = ElementSymbol::parse(raw_symbol)
        .map_err(|_| CatalogError::malformed(row, format!("symbol '{raw_symbol}' is empty")))?;

    let numeric = |column: Column| -> Result<f64> {
        let cell = columns.cell(record, column).ok_or_else(|| {
            CatalogError::malformed(row, format!("{symbol}: missing {}", column.name()))
        })?;
        let value: f64 = cell.parse().map_err(|_| {
            CatalogError::malformed(
                row,
                format!("{symbol}: {} '{cell}' is not a number", column.name()),
            )
        })?;
        check_property(row, &symbol, column.name(), value)
    };

    Ok(ElementRecord {
        molecular_weight: numeric(Column::MolecularWeight)?,
        molar_volume: numeric(Column::MolarVolume)?,
        atomic_radius: numeric(Column::AtomicRadius)?,
        symbol,
    })
}

/// Reject property values that cannot describe a physical quantity.
pub(crate) fn check_property(
    row: usize,
    symbol: &ElementSymbol,
    field: &str,
    value: f64,
) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::malformed(
            row,
            format!("{symbol}: {field} must be finite and non-negative, got {value}"),
        ));
    }
    Ok(value)
}
