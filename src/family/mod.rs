//! Chemical families used to group dopant elements.
//!
//! `Family` is a closed set; membership lives in `definitions` and is indexed by
//! `FamilyClassifier`, which refuses to build when two families claim the same
//! symbol.

pub mod classifier;
pub mod definitions;

pub use classifier::{FamilyClassifier, normalize_weights};
pub use definitions::{FamilyDefinition, STANDARD_FAMILIES};

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Alkali,
    AlkaliEarth,
    TransitionMetal,
    Triel,
    Halogen,
    Lanthanide,
}

/// Outcome of classifying a symbol. `Unclassified` is a normal answer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Family(Family),
    Unclassified,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::Alkali,
        Family::AlkaliEarth,
        Family::TransitionMetal,
        Family::Triel,
        Family::Halogen,
        Family::Lanthanide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Alkali => "alkali",
            Family::AlkaliEarth => "alkali_earth",
            Family::TransitionMetal => "transition_metal",
            Family::Triel => "triel",
            Family::Halogen => "halogen",
            Family::Lanthanide => "lanthanide",
        }
    }

    /// Column-heading form used in refactored feature tables.
    pub fn label(&self) -> &'static str {
        match self {
            Family::Alkali => "Alkali",
            Family::AlkaliEarth => "Alkali earth",
            Family::TransitionMetal => "Transition metal",
            Family::Triel => "Triels",
            Family::Halogen => "Halogens",
            Family::Lanthanide => "Lanthanides",
        }
    }

    pub fn description(&self) -> &'static str {
        definitions::description(*self)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = CatalogError;

    /// Accepts `alkali_earth`, `alkali-earth`, `Alkali earth`, and the other
    /// spellings that differ only in case and separator.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        let trimmed = normalized.trim_end_matches('s');
        Family::ALL
            .into_iter()
            .find(|family| family.as_str() == trimmed || family.as_str() == normalized)
            .ok_or_else(|| CatalogError::UnknownFamily(raw.to_string()))
    }
}

impl Classification {
    pub fn family(&self) -> Option<Family> {
        match self {
            Classification::Family(family) => Some(*family),
            Classification::Unclassified => None,
        }
    }

    pub fn description(&self) -> Option<&'static str> {
        self.family().map(|family| family.description())
    }
}
