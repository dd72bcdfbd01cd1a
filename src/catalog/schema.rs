//! JSON catalog documents and their schema check.
//!
//! JSON sources wrap the element rows in a versioned document
//! (`schema_version: element_catalog_v1`). The document is validated against
//! the compiled-in schema before any record is built, so a bad file fails as a
//! whole with every violation listed.

use crate::catalog::model::{ElementRecord, check_property};
use crate::catalog::symbol::ElementSymbol;
use crate::error::{CatalogError, Result};
use jsonschema::JSONSchema;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

pub const CATALOG_SCHEMA_VERSION: &str = "element_catalog_v1";

const CATALOG_SCHEMA: &str = include_str!("../../schema/element_catalog.schema.json");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    symbol: String,
    molecular_weight: f64,
    molar_volume: f64,
    atomic_radius: f64,
}

/// Parse, validate, and decode a JSON catalog document.
pub fn read_json_records<R: Read>(reader: R) -> Result<Vec<ElementRecord>> {
    let value: Value = serde_json::from_reader(reader)?;
    validate_document(&value)?;

    let document: CatalogDocument = serde_json::from_value(value)?;
    document
        .elements
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            let row = idx + 1;
            let symbol = ElementSymbol::parse(&raw.symbol).map_err(|_| {
                CatalogError::malformed(row, format!("symbol '{}' is empty", raw.symbol))
            })?;
            Ok(ElementRecord {
                molecular_weight: check_property(
                    row,
                    &symbol,
                    "molecular_weight",
                    raw.molecular_weight,
                )?,
                molar_volume: check_property(row, &symbol, "molar_volume", raw.molar_volume)?,
                atomic_radius: check_property(row, &symbol, "atomic_radius", raw.atomic_radius)?,
                symbol,
            })
        })
        .collect()
}

fn validate_document(document: &Value) -> Result<()> {
    let version = document
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::malformed(
            0,
            format!("schema_version '{version}' is not {CATALOG_SCHEMA_VERSION}"),
        ));
    }

    let schema: Value = serde_json::from_str(CATALOG_SCHEMA)?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| CatalogError::malformed(0, format!("invalid catalog schema: {err}")))?;

    if let Err(errors) = compiled.validate(document) {
        let details = errors
            .map(|err| format!("{}: {err}", err.instance_path))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CatalogError::malformed(
            0,
            format!("catalog failed schema validation:\n{details}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(elements: Value) -> String {
        json!({ "schema_version": CATALOG_SCHEMA_VERSION, "elements": elements }).to_string()
    }

    #[test]
    fn decodes_valid_document() {
        let raw = document(json!([
            {"symbol": "K", "molecular_weight": 39.0983, "molar_volume": 45.94, "atomic_radius": 220},
            {"symbol": "_Na", "molecular_weight": 22.9898, "molar_volume": 23.78, "atomic_radius": 180}
        ]));
        let records = read_json_records(raw.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].symbol.as_str(), "Na");
        assert_eq!(records[0].atomic_radius, 220.0);
    }

    #[test]
    fn schema_rejects_missing_and_negative_fields() {
        let missing = document(json!([
            {"symbol": "K", "molecular_weight": 39.0983, "molar_volume": 45.94}
        ]));
        let err = read_json_records(missing.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { row: 0, .. }), "{err:?}");

        let negative = document(json!([
            {"symbol": "K", "molecular_weight": -1.0, "molar_volume": 45.94, "atomic_radius": 220}
        ]));
        let err = read_json_records(negative.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { .. }), "{err:?}");
    }

    #[test]
    fn rejects_unknown_schema_version() {
        let raw = json!({"schema_version": "element_catalog_v0", "elements": []}).to_string();
        let err = read_json_records(raw.as_bytes()).unwrap_err();
        match err {
            CatalogError::MalformedRecord { reason, .. } => {
                assert!(reason.contains("element_catalog_v0"), "{reason}")
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        let err = read_json_records("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)), "{err:?}");
    }
}
