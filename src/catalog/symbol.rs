use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Canonical, undecorated element symbol (e.g., `K`, `Cl`).
///
/// Upstream feature names decorate symbols with separators (`_K`, `K_`) and
/// the property table writes anions with a trailing charge (`Cl-`). Matching
/// is case-sensitive: `_CS` (thiocyanate-ish feature) and `_Cs` (caesium) are
/// different columns upstream.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementSymbol(String);

impl ElementSymbol {
    /// Strip decoration and build a symbol, rejecting values that end up empty.
    pub fn parse(raw: &str) -> Result<Self> {
        let stripped = strip_decoration(raw);
        if stripped.is_empty() {
            return Err(CatalogError::MalformedSymbol(raw.to_string()));
        }
        Ok(Self(stripped.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `raw` is already in canonical form.
    pub fn is_canonical(raw: &str) -> bool {
        !raw.is_empty() && strip_decoration(raw) == raw
    }
}

impl TryFrom<String> for ElementSymbol {
    type Error = CatalogError;

    fn try_from(raw: String) -> Result<Self> {
        if Self::is_canonical(&raw) {
            return Ok(Self(raw));
        }
        Self::parse(&raw)
    }
}

impl From<ElementSymbol> for String {
    fn from(symbol: ElementSymbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementSymbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Remove separator and charge decoration from both ends of a symbol.
pub fn strip_decoration(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '_' || c == '-' || c.is_whitespace())
}
