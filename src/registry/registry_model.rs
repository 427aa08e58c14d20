use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::RegistryError;

/// Merged symbol → identifier mapping of one namespace.
pub type NamespaceMap = BTreeMap<String, String>;

// ============================================================================
// Registry - immutable namespace → (symbol → identifier) table
// ============================================================================

/// The queryable element table handed to flow tooling.
///
/// A registry is only produced by the merge step and is never mutated
/// afterwards; a reload builds a new one. Serializes as a plain
/// `{ namespace: { symbol: identifier } }` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    namespaces: BTreeMap<String, NamespaceMap>,
}

impl Registry {
    pub(crate) fn from_namespaces(namespaces: BTreeMap<String, NamespaceMap>) -> Self {
        Self { namespaces }
    }

    /// Resolve `symbol` inside `namespace` to its element identifier.
    pub fn lookup(&self, namespace: &str, symbol: &str) -> Result<&str, RegistryError> {
        let map = self.namespace(namespace)?;
        map.get(symbol)
            .map(String::as_str)
            .ok_or_else(|| RegistryError::UnknownSymbol {
                namespace: namespace.to_string(),
                symbol: symbol.to_string(),
            })
    }

    /// Resolve a dotted `namespace.symbol` reference.
    pub fn resolve(&self, reference: &str) -> Result<&str, RegistryError> {
        let (namespace, symbol) = split_reference(reference)?;
        self.lookup(namespace, symbol)
    }

    pub fn namespaces(&self) -> BTreeSet<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    pub fn symbols(&self, namespace: &str) -> Result<BTreeSet<&str>, RegistryError> {
        Ok(self.namespace(namespace)?.keys().map(String::as_str).collect())
    }

    pub fn get(&self, namespace: &str) -> Option<&NamespaceMap> {
        self.namespaces.get(namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamespaceMap)> {
        self.namespaces.iter().map(|(name, map)| (name.as_str(), map))
    }

    /// Number of namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Total number of symbols across all namespaces.
    pub fn symbol_count(&self) -> usize {
        self.namespaces.values().map(BTreeMap::len).sum()
    }

    /// SHA-1 over the sorted content. Equal registries share a fingerprint.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        // every field is length-prefixed so no content can forge a boundary
        fn field(hasher: &mut Sha1, bytes: &[u8]) {
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }

        let mut hasher = Sha1::new();
        for (namespace, map) in &self.namespaces {
            field(&mut hasher, namespace.as_bytes());
            // namespaces with no symbols still count
            hasher.update((map.len() as u64).to_le_bytes());
            for (symbol, identifier) in map {
                field(&mut hasher, symbol.as_bytes());
                field(&mut hasher, identifier.as_bytes());
            }
        }
        format!("{:x}", hasher.finalize())
    }

    fn namespace(&self, namespace: &str) -> Result<&NamespaceMap, RegistryError> {
        self.namespaces
            .get(namespace)
            .ok_or_else(|| RegistryError::UnknownNamespace {
                namespace: namespace.to_string(),
            })
    }
}

/// Split `login.loginContinueButton` into (`login`, `loginContinueButton`).
///
/// Splits on the first dot, so symbols may themselves contain dots.
pub fn split_reference(reference: &str) -> Result<(&str, &str), RegistryError> {
    match reference.split_once('.') {
        Some((namespace, symbol)) if !namespace.is_empty() && !symbol.is_empty() => Ok((namespace, symbol)),
        _ => Err(RegistryError::InvalidReference {
            reference: reference.to_string(),
        }),
    }
}
