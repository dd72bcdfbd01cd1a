//! Dopant feature vocabulary and family-level feature refactoring.
//!
//! Experiment rows carry one column per compound-level dopant feature (`_K`,
//! `_NO3`, `_TiO(C2O4)2`, ...). Single-element columns are folded into four
//! features per family (dopant mass plus three weighted properties) so a model
//! trained on K/Mg data can still see Na/Ba rows as "alkali"/"alkali earth".
//! Everything that is not a classified element passes through unchanged.

use crate::catalog::{AggregateRecord, ElementCatalog, ElementSymbol};
use crate::error::{CatalogError, Result};
use crate::family::{Classification, Family, FamilyClassifier};
use serde::Serialize;
use std::collections::BTreeMap;

pub const REGULAR_DOPANTS: &[&str] = &[
    "ReO4", "WO4", "SO4", "KNO3", "KOH", "LiOH", "CsOH", "LiNO3",
];

pub const ADD_ON_DOPANTS: &[&str] = &[
    "NaNO3",
    "RbNO3",
    "LiReO4",
    "NH4F",
    "KCL",
    "Mo",
    "Se",
    "LiF",
    "Ca(NO3)2",
    "Sr(NO3)2",
    "Ba(NO3)2",
    "(NH4)S2O3",
    "La(NO3)3",
];

/// Compound-level feature columns of the current model, in column order.
pub const COMPOUND_FEATURES: &[&str] = &[
    "_ReO4", "_WO4", "_SO4", "_K", "_NO3", "_OH", "_Li", "_Cs", "_Na", "_Rb", "_NH4", "_Cl",
    "_Mo0", "_Mo7O24", "_MoO4", "_SeO4", "_SiF6", "_H", "_ZrF6", "_TiO(C2O4)2", "_C2O4",
    "_SbF6", "_SO3F", "_AlF6", "_F", "_Ca", "_Sr", "_Ba", "_S2O3", "_SO3", "_NH2", "_CS",
    "_EDTA", "_SiO3", "_TEA", "_Br", "_MnO4", "_Mn", "_Mn2+", "_HAsO4", "_Fe", "_PF6", "_DTPA",
    "_Yb", "_Lu", "_Al", "_Mg", "_La", "_TaF7", "_Cr", "_Si5O11", "_VO", "_TiF6",
];

/// The subset of `COMPOUND_FEATURES` that names a single element.
pub const SINGLE_ELEMENT_FEATURES: &[&str] = &[
    "_K", "_Li", "_Cs", "_Na", "_Rb", "_Cl", "_F", "_Ca", "_Sr", "_Ba", "_Br", "_Mn", "_Fe",
    "_Yb", "_Lu", "_Al", "_Mg", "_La", "_Cr",
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Four refactored features describing one family's share of a dopant recipe.
pub struct FamilyFeatures {
    /// Total dopant amount of the family's members.
    pub mass: f64,
    pub weighted_molecular_weight: f64,
    pub weighted_molar_volume: f64,
    pub weighted_atomic_radius: f64,
}

impl FamilyFeatures {
    /// Features of a family with no dopant in the row.
    pub const ABSENT: FamilyFeatures = FamilyFeatures {
        mass: 0.0,
        weighted_molecular_weight: 0.0,
        weighted_molar_volume: 0.0,
        weighted_atomic_radius: 0.0,
    };

    fn from_aggregate(aggregate: AggregateRecord) -> Self {
        Self {
            mass: aggregate.total_weight,
            weighted_molecular_weight: aggregate.weighted_molecular_weight,
            weighted_molar_volume: aggregate.weighted_molar_volume,
            weighted_atomic_radius: aggregate.weighted_atomic_radius,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One experiment row after refactoring.
pub struct FeatureRow {
    pub families: BTreeMap<Family, FamilyFeatures>,
    /// Columns that are not single-element dopants (`_NO3`, `pEO`, ...).
    pub passthrough: BTreeMap<String, f64>,
}

impl FeatureRow {
    /// Flatten into labelled columns (`Alkali mass`, `Alkali molecular weight`,
    /// ...) followed by the passthrough columns.
    pub fn columns(&self) -> Vec<(String, f64)> {
        let mut columns = Vec::with_capacity(self.families.len() * 4 + self.passthrough.len());
        for (family, features) in &self.families {
            let label = family.label();
            columns.push((format!("{label} mass"), features.mass));
            columns.push((
                format!("{label} molecular weight"),
                features.weighted_molecular_weight,
            ));
            columns.push((
                format!("{label} molecular volume"),
                features.weighted_molar_volume,
            ));
            columns.push((
                format!("{label} atomic radius"),
                features.weighted_atomic_radius,
            ));
        }
        for (name, value) in &self.passthrough {
            columns.push((name.clone(), *value));
        }
        columns
    }
}

/// Refactor one row of `feature name -> amount` into family features.
///
/// Every family gets a block; families with no dopant mass get
/// `FamilyFeatures::ABSENT`. Catalog gaps still fail with `UnknownElement`.
pub fn featurize<I, K>(
    row: I,
    classifier: &FamilyClassifier,
    catalog: &ElementCatalog,
) -> Result<FeatureRow>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut weights: BTreeMap<ElementSymbol, f64> = BTreeMap::new();
    let mut passthrough = BTreeMap::new();

    for (raw, amount) in row {
        let raw = raw.as_ref().trim();
        match classifier.classify(raw) {
            Classification::Family(_) => {
                let symbol = ElementSymbol::parse(raw)?;
                if !amount.is_finite() || amount < 0.0 {
                    return Err(CatalogError::InvalidWeight {
                        symbol: symbol.to_string(),
                        weight: amount,
                    });
                }
                if weights.insert(symbol.clone(), amount).is_some() {
                    return Err(CatalogError::DuplicateSymbol(symbol.to_string()));
                }
            }
            Classification::Unclassified => {
                tracing::debug!(feature = raw, "passing through unclassified feature");
                if passthrough.insert(raw.to_string(), amount).is_some() {
                    return Err(CatalogError::DuplicateSymbol(raw.to_string()));
                }
            }
        }
    }

    let mut families = BTreeMap::new();
    for family in Family::ALL {
        let features = match classifier.aggregate_family(family, catalog, &weights) {
            Ok(aggregate) => FamilyFeatures::from_aggregate(aggregate),
            Err(CatalogError::NonPositiveWeight(_)) | Err(CatalogError::EmptyAggregate) => {
                FamilyFeatures::ABSENT
            }
            Err(err) => return Err(err),
        };
        families.insert(family, features);
    }

    Ok(FeatureRow {
        families,
        passthrough,
    })
}

/// Refactor every row, stopping at the first failure.
pub fn featurize_table<R, I, K>(
    rows: R,
    classifier: &FamilyClassifier,
    catalog: &ElementCatalog,
) -> Result<Vec<FeatureRow>>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    rows.into_iter()
        .map(|row| featurize(row, classifier, catalog))
        .collect()
}
