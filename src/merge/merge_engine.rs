use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::contribution::contribution_model::Contribution;
use crate::registry::registry_model::{NamespaceMap, Registry};

// ============================================================================
// Merge diagnostics
// ============================================================================

/// Two contributions to the same namespace disagree about what a symbol
/// points at. The later contribution wins; this records the override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeWarning {
    pub namespace: String,
    pub symbol: String,

    /// Identifier declared by the earlier contribution
    pub previous_identifier: String,
    pub previous_locator: String,

    /// Identifier that replaced it
    pub identifier: String,
    pub locator: String,
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: '{}' from {} overridden by '{}' from {}",
            self.namespace,
            self.symbol,
            self.previous_identifier,
            self.previous_locator,
            self.identifier,
            self.locator
        )
    }
}

/// Result of merging one load cycle's contributions. The registry is not
/// validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub registry: Registry,
    pub warnings: Vec<MergeWarning>,
}

// ============================================================================
// Merge
// ============================================================================

/// Where a merged entry currently comes from.
struct MergedEntry<'a> {
    identifier: &'a str,
    locator: &'a str,
}

/// Merge contributions, in discovery order, into one registry.
///
/// Contributions sharing a namespace are unioned. Inside a single
/// contribution a repeated symbol resolves to its last declaration without
/// comment. Across contributions the later one wins, and a warning is
/// recorded when the identifiers differ. Warnings come back in the order the
/// overriding contributions were encountered.
pub fn merge(contributions: &[Contribution]) -> MergeOutcome {
    let mut namespaces: BTreeMap<&str, BTreeMap<&str, MergedEntry>> = BTreeMap::new();
    let mut warnings = Vec::new();

    for contribution in contributions {
        let shadowed = contribution.shadowed_symbols();
        if !shadowed.is_empty() {
            debug!(
                locator = %contribution.locator,
                namespace = %contribution.namespace,
                symbols = ?shadowed,
                "duplicate symbols in one contribution, keeping last declaration"
            );
        }

        let target = namespaces.entry(contribution.namespace.as_str()).or_default();

        for (symbol, identifier) in contribution.mapping() {
            let incoming = MergedEntry {
                identifier,
                locator: contribution.locator.as_str(),
            };

            if let Some(previous) = target.insert(symbol, incoming) {
                if previous.identifier != identifier {
                    let warning = MergeWarning {
                        namespace: contribution.namespace.clone(),
                        symbol: symbol.to_string(),
                        previous_identifier: previous.identifier.to_string(),
                        previous_locator: previous.locator.to_string(),
                        identifier: identifier.to_string(),
                        locator: contribution.locator.clone(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }
    }

    let namespaces = namespaces
        .into_iter()
        .map(|(name, entries)| {
            let map: NamespaceMap = entries
                .into_iter()
                .map(|(symbol, entry)| (symbol.to_string(), entry.identifier.to_string()))
                .collect();
            (name.to_string(), map)
        })
        .collect();

    MergeOutcome {
        registry: Registry::from_namespaces(namespaces),
        warnings,
    }
}
