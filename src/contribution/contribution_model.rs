use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

// ============================================================================
// Contribution - one authored (namespace, mapping) unit before merging
// ============================================================================

/// A single authored block of element identifiers for one namespace.
///
/// Entries keep the literal order of the source, duplicates included. The
/// mapping a contribution actually contributes is resolved by
/// [`Contribution::mapping`], where a later declaration of the same symbol
/// replaces an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// Where the contribution came from (file path, URL, embedded name)
    pub locator: String,

    /// Namespace name, e.g. `login` or `forgotPasscode`
    pub namespace: String,

    /// (symbolic name, identifier) pairs in literal order
    entries: Vec<(String, String)>,
}

impl Contribution {
    pub fn new(
        locator: impl Into<String>,
        namespace: impl Into<String>,
        entries: Vec<(String, String)>,
    ) -> Self {
        Self {
            locator: locator.into(),
            namespace: namespace.into(),
            entries,
        }
    }

    /// Declared entries in literal order, duplicates included.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Flat mapping after last-write-wins resolution of duplicate symbols.
    pub fn mapping(&self) -> BTreeMap<&str, &str> {
        self.entries
            .iter()
            .map(|(symbol, identifier)| (symbol.as_str(), identifier.as_str()))
            .collect()
    }

    /// Symbols declared more than once in this contribution.
    pub fn shadowed_symbols(&self) -> BTreeSet<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .filter(|(symbol, _)| !seen.insert(symbol.as_str()))
            .map(|(symbol, _)| symbol.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
