//! Reverse index from element symbol to family, plus family-level aggregates.

use crate::catalog::{AggregateRecord, ElementCatalog, ElementSymbol, strip_decoration};
use crate::error::{CatalogError, Result};
use crate::family::definitions::{FamilyDefinition, STANDARD_FAMILIES};
use crate::family::{Classification, Family};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
/// Immutable partition of known symbols into families.
pub struct FamilyClassifier {
    members: BTreeMap<Family, Vec<ElementSymbol>>,
    by_symbol: HashMap<ElementSymbol, Family>,
}

impl FamilyClassifier {
    /// Classifier over the compiled-in family table.
    pub fn standard() -> Result<Self> {
        Self::from_definitions(&STANDARD_FAMILIES)
    }

    /// Build the reverse index, rejecting any symbol claimed by two families.
    ///
    /// A symbol repeated inside one family collapses to a single member.
    pub fn from_definitions(definitions: &[FamilyDefinition<'_>]) -> Result<Self> {
        let mut members: BTreeMap<Family, Vec<ElementSymbol>> = BTreeMap::new();
        let mut by_symbol: HashMap<ElementSymbol, Family> = HashMap::new();

        for definition in definitions {
            let list = members.entry(definition.family).or_default();
            for raw in definition.members {
                let symbol = ElementSymbol::parse(raw)?;
                match by_symbol.get(&symbol) {
                    Some(existing) if *existing == definition.family => continue,
                    Some(existing) => {
                        return Err(CatalogError::FamilyOverlap {
                            symbol: symbol.to_string(),
                            first: existing.to_string(),
                            second: definition.family.to_string(),
                        });
                    }
                    None => {}
                }
                by_symbol.insert(symbol.clone(), definition.family);
                list.push(symbol);
            }
        }

        Ok(Self { members, by_symbol })
    }

    /// Family of a (possibly decorated) symbol, or `Unclassified`.
    pub fn classify(&self, symbol: &str) -> Classification {
        match self.by_symbol.get(strip_decoration(symbol)) {
            Some(family) => Classification::Family(*family),
            None => Classification::Unclassified,
        }
    }

    pub fn describe(&self, family: Family) -> &'static str {
        family.description()
    }

    /// Members of `family` in declaration order.
    pub fn members(&self, family: Family) -> &[ElementSymbol] {
        self.members.get(&family).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weighted properties of every member of `family`.
    ///
    /// Members without an entry in `weights` count with weight 0. A member
    /// missing from `catalog` is a data mismatch and fails with
    /// `UnknownElement` rather than being skipped.
    pub fn aggregate_family(
        &self,
        family: Family,
        catalog: &ElementCatalog,
        weights: &BTreeMap<ElementSymbol, f64>,
    ) -> Result<AggregateRecord> {
        let entries = self
            .members(family)
            .iter()
            .map(|symbol| {
                let weight = weights.get(symbol).copied().unwrap_or(0.0);
                catalog
                    .get(symbol)
                    .map(|record| (record, weight))
                    .ok_or_else(|| CatalogError::UnknownElement(symbol.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let aggregate = ElementCatalog::weighted_aggregate(entries)?;
        tracing::debug!(
            family = %family,
            total_weight = aggregate.total_weight,
            "aggregated family properties"
        );
        Ok(aggregate)
    }
}

/// Normalize caller-supplied weight keys (`_K`, `K_`) to canonical symbols.
///
/// Two keys that collapse to the same symbol are ambiguous and rejected.
pub fn normalize_weights<I, K>(pairs: I) -> Result<BTreeMap<ElementSymbol, f64>>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut weights = BTreeMap::new();
    for (raw, weight) in pairs {
        let symbol = ElementSymbol::parse(raw.as_ref())?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(CatalogError::InvalidWeight {
                symbol: symbol.to_string(),
                weight,
            });
        }
        if weights.contains_key(&symbol) {
            return Err(CatalogError::DuplicateSymbol(symbol.to_string()));
        }
        weights.insert(symbol, weight);
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ElementRecord;

    fn record(symbol: &str, mw: f64, mv: f64, ar: f64) -> ElementRecord {
        ElementRecord {
            symbol: ElementSymbol::parse(symbol).unwrap(),
            molecular_weight: mw,
            molar_volume: mv,
            atomic_radius: ar,
        }
    }

    fn alkali_catalog() -> ElementCatalog {
        ElementCatalog::from_records([
            record("K", 39.0983, 45.94, 220.0),
            record("Na", 22.9898, 23.78, 180.0),
            record("Li", 6.941, 13.02, 145.0),
            record("Cs", 132.9055, 70.94, 260.0),
            record("Rb", 85.4678, 55.76, 235.0),
        ])
        .unwrap()
    }

    #[test]
    fn classify_covers_every_member_exactly_once() {
        let classifier = FamilyClassifier::standard().unwrap();
        let mut seen = HashMap::new();
        for definition in STANDARD_FAMILIES {
            for member in definition.members {
                assert_eq!(
                    classifier.classify(member),
                    Classification::Family(definition.family)
                );
                assert!(seen.insert(*member, definition.family).is_none());
            }
        }
        assert_eq!(seen.len(), 19);
    }

    #[test]
    fn classify_handles_decoration_and_unknowns() {
        let classifier = FamilyClassifier::standard().unwrap();
        assert_eq!(
            classifier.classify("_Ba"),
            Classification::Family(Family::AlkaliEarth)
        );
        assert_eq!(
            classifier.classify("Cl-"),
            Classification::Family(Family::Halogen)
        );
        assert_eq!(classifier.classify("_NO3"), Classification::Unclassified);
        assert_eq!(classifier.classify("_CS"), Classification::Unclassified);
        assert_eq!(classifier.classify(""), Classification::Unclassified);
        assert_eq!(classifier.classify("__"), Classification::Unclassified);
    }

    #[test]
    fn overlapping_definitions_are_rejected() {
        let definitions = [
            FamilyDefinition {
                family: Family::Alkali,
                members: &["K", "Na"],
            },
            FamilyDefinition {
                family: Family::AlkaliEarth,
                members: &["Mg", "_Na"],
            },
        ];
        let err = FamilyClassifier::from_definitions(&definitions).unwrap_err();
        match err {
            CatalogError::FamilyOverlap {
                symbol,
                first,
                second,
            } => {
                assert_eq!(symbol, "Na");
                assert_eq!(first, "alkali");
                assert_eq!(second, "alkali_earth");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn repeated_member_within_family_collapses() {
        let definitions = [FamilyDefinition {
            family: Family::Alkali,
            members: &["_K", "_Cs", "_Cs"],
        }];
        let classifier = FamilyClassifier::from_definitions(&definitions).unwrap();
        let members: Vec<&str> = classifier
            .members(Family::Alkali)
            .iter()
            .map(ElementSymbol::as_str)
            .collect();
        assert_eq!(members, ["K", "Cs"]);
        assert!(classifier.members(Family::Halogen).is_empty());
    }

    #[test]
    fn aggregate_with_single_nonzero_weight_returns_that_element() {
        let classifier = FamilyClassifier::standard().unwrap();
        let catalog = alkali_catalog();
        let weights = normalize_weights([("_K", 1.0), ("_Na", 0.0)]).unwrap();
        let agg = classifier
            .aggregate_family(Family::Alkali, &catalog, &weights)
            .unwrap();
        assert_eq!(agg.weighted_molecular_weight, 39.0983);
        assert_eq!(agg.weighted_molar_volume, 45.94);
        assert_eq!(agg.weighted_atomic_radius, 220.0);
        assert_eq!(agg.total_weight, 1.0);
    }

    #[test]
    fn aggregate_surfaces_catalog_gaps() {
        let classifier = FamilyClassifier::standard().unwrap();
        let catalog = alkali_catalog();
        let weights = normalize_weights([("Mg", 1.0)]).unwrap();
        let err = classifier
            .aggregate_family(Family::AlkaliEarth, &catalog, &weights)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownElement(ref s) if s == "Ca"), "{err:?}");
    }

    #[test]
    fn aggregate_with_all_zero_weights_is_non_positive() {
        let classifier = FamilyClassifier::standard().unwrap();
        let catalog = alkali_catalog();
        let err = classifier
            .aggregate_family(Family::Alkali, &catalog, &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, CatalogError::NonPositiveWeight(w) if w == 0.0));
    }

    #[test]
    fn empty_family_is_an_empty_aggregate() {
        let definitions = [FamilyDefinition {
            family: Family::Alkali,
            members: &["K"],
        }];
        let classifier = FamilyClassifier::from_definitions(&definitions).unwrap();
        let err = classifier
            .aggregate_family(Family::Triel, &alkali_catalog(), &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyAggregate));
    }

    #[test]
    fn normalize_weights_rejects_ambiguous_and_invalid_keys() {
        assert!(matches!(
            normalize_weights([("_K", 1.0), ("K_", 2.0)]),
            Err(CatalogError::DuplicateSymbol(ref s)) if s == "K"
        ));
        assert!(matches!(
            normalize_weights([("_", 1.0)]),
            Err(CatalogError::MalformedSymbol(_))
        ));
        assert!(matches!(
            normalize_weights([("K", -0.5)]),
            Err(CatalogError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn classifier_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FamilyClassifier>();
    }
}
