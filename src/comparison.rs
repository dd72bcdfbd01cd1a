//! Side-by-side comparison of two elements.

use crate::catalog::{ElementCatalog, ElementRecord};
use crate::error::Result;
use crate::family::{Classification, FamilyClassifier};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Catalog record of one element together with its family and family text.
pub struct ElementProfile {
    pub record: ElementRecord,
    pub classification: Classification,
    pub description: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Property differences, second element minus first.
pub struct PropertyDelta {
    pub molecular_weight: f64,
    pub molar_volume: f64,
    pub atomic_radius: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementComparison {
    pub first: ElementProfile,
    pub second: ElementProfile,
    pub delta: PropertyDelta,
    pub same_family: bool,
}

pub fn profile(
    symbol: &str,
    classifier: &FamilyClassifier,
    catalog: &ElementCatalog,
) -> Result<ElementProfile> {
    let record = catalog.lookup(symbol)?.clone();
    let classification = classifier.classify(record.symbol.as_str());
    Ok(ElementProfile {
        description: classification.description(),
        classification,
        record,
    })
}

pub fn compare(
    first: &str,
    second: &str,
    classifier: &FamilyClassifier,
    catalog: &ElementCatalog,
) -> Result<ElementComparison> {
    let first = profile(first, classifier, catalog)?;
    let second = profile(second, classifier, catalog)?;
    let delta = PropertyDelta {
        molecular_weight: second.record.molecular_weight - first.record.molecular_weight,
        molar_volume: second.record.molar_volume - first.record.molar_volume,
        atomic_radius: second.record.atomic_radius - first.record.atomic_radius,
    };
    let same_family = matches!(
        (first.classification.family(), second.classification.family()),
        (Some(a), Some(b)) if a == b
    );
    Ok(ElementComparison {
        first,
        second,
        delta,
        same_family,
    })
}
