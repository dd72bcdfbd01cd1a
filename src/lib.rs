//! Element property catalog and dopant family aggregation.
//!
//! The crate exposes the reference-data layer behind the catalyst feature
//! engineering work: an immutable `ElementCatalog` of per-element physical
//! properties, a `FamilyClassifier` that partitions dopant elements into
//! chemical families, and helpers that fold single-element dopant columns into
//! family-level features. Both core structures are built explicitly by the
//! caller and passed by reference; nothing here keeps global state.

use anyhow::{Context, Result, bail};
use std::{
    env,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod comparison;
pub mod error;
pub mod family;
pub mod features;
pub mod scores;

pub use catalog::{AggregateRecord, ElementCatalog, ElementRecord, ElementSymbol};
pub use comparison::{ElementComparison, ElementProfile, PropertyDelta, compare};
pub use error::CatalogError;
pub use family::{Classification, Family, FamilyClassifier, normalize_weights};
pub use features::{FamilyFeatures, FeatureRow, featurize, featurize_table};
pub use scores::{MethodComparison, ScoreTable};

/// Environment variable naming the property table directly.
pub const PROPERTIES_ENV: &str = "CATALYST_PROPERTIES";
/// Environment variable naming a directory that contains `data/properties.csv`.
pub const DATA_ROOT_ENV: &str = "CATALYST_DATA_ROOT";

const PROPERTIES_RELATIVE: &str = "data/properties.csv";

fn is_data_root(candidate: &Path) -> bool {
    candidate.join(PROPERTIES_RELATIVE).is_file()
}

/// Directories that may hold the shipped data, in priority order, each tagged
/// with where it came from.
fn candidate_roots() -> Vec<(&'static str, PathBuf)> {
    let mut candidates = Vec::new();
    if let Some(root) = env::var_os(DATA_ROOT_ENV).filter(|root| !root.is_empty()) {
        candidates.push((DATA_ROOT_ENV, PathBuf::from(root)));
    }
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.extend(exe_dir.ancestors().map(|dir| ("executable", dir.to_path_buf())));
    }
    if let Some(hint) = option_env!("CATALYST_DATA_ROOT_HINT").filter(|hint| !hint.is_empty()) {
        candidates.push(("build hint", PathBuf::from(hint)));
    }
    candidates
}

/// Locate the directory holding the shipped reference data.
///
/// Search order: `CATALYST_DATA_ROOT`, then the directories above the running
/// executable, then the build-time hint recorded by `build.rs`.
pub fn find_data_root() -> Result<PathBuf> {
    let candidates = candidate_roots();
    let Some((source, root)) = candidates.iter().find(|(_, dir)| is_data_root(dir)) else {
        bail!(
            "unable to locate {PROPERTIES_RELATIVE} in {} candidate directories; set {DATA_ROOT_ENV} or {PROPERTIES_ENV}",
            candidates.len()
        );
    };
    tracing::debug!(source, root = %root.display(), "resolved data root");
    root.canonicalize()
        .with_context(|| format!("canonicalizing data root {}", root.display()))
}

/// Resolve the property table path: explicit path, `CATALYST_PROPERTIES`, or
/// the shipped table under the data root.
pub fn resolve_properties_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("property table not found: {}", path.display());
        }
        return Ok(path.to_path_buf());
    }

    if let Ok(raw) = env::var(PROPERTIES_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let path = PathBuf::from(trimmed);
            if !path.is_file() {
                bail!("{PROPERTIES_ENV} points at a missing file: {}", path.display());
            }
            return Ok(path);
        }
    }

    Ok(find_data_root()?.join(PROPERTIES_RELATIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_dir_is_a_data_root() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        assert!(is_data_root(&root));
        assert!(!is_data_root(&root.join("src")));
    }

    #[test]
    fn candidates_end_with_build_hint() {
        let candidates = candidate_roots();
        let (source, hint) = candidates.last().unwrap();
        assert_eq!(*source, "build hint");
        assert!(is_data_root(hint));
        assert!(candidates.iter().any(|(source, _)| *source == "executable"));
    }

    #[test]
    fn shipped_data_root_is_found() {
        let root = find_data_root().unwrap();
        assert!(root.join(PROPERTIES_RELATIVE).is_file());
    }

    #[test]
    fn explicit_properties_path_must_exist() {
        let shipped = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(PROPERTIES_RELATIVE);
        assert_eq!(resolve_properties_path(Some(shipped.as_path())).unwrap(), shipped);
        assert!(resolve_properties_path(Some(Path::new("/no/such/properties.csv"))).is_err());
    }
}
