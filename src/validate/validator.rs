use std::collections::BTreeMap;

use crate::error::RegistryError;
use crate::registry::registry_model::Registry;
use crate::validate::violation::Violation;

// ============================================================================
// Registry validation
// ============================================================================

/// Collect every structural defect in a merged registry.
///
/// Checks run per namespace in sorted order: the namespace name first, then
/// each symbol name and identifier, then identifier collisions. An empty
/// result means the registry can be published.
pub fn validate(registry: &Registry) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (namespace, map) in registry.iter() {
        if let Some(reason) = check_name(namespace) {
            violations.push(Violation::InvalidNamespaceName {
                namespace: namespace.to_string(),
                reason: reason.to_string(),
            });
        }

        let mut by_identifier: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for (symbol, identifier) in map {
            if let Some(reason) = check_name(symbol) {
                violations.push(Violation::InvalidSymbolName {
                    namespace: namespace.to_string(),
                    symbol: symbol.clone(),
                    reason: reason.to_string(),
                });
            }

            if identifier.is_empty() {
                violations.push(Violation::EmptyIdentifier {
                    namespace: namespace.to_string(),
                    symbol: symbol.clone(),
                });
                continue;
            }

            by_identifier.entry(identifier.as_str()).or_default().push(symbol.as_str());
        }

        for (identifier, symbols) in by_identifier {
            if symbols.len() > 1 {
                violations.push(Violation::IdentifierCollision {
                    namespace: namespace.to_string(),
                    identifier: identifier.to_string(),
                    symbols: symbols.into_iter().map(str::to_string).collect(),
                });
            }
        }
    }

    violations
}

/// Validate and hand the registry back only if it is clean.
pub fn check(registry: Registry) -> Result<Registry, RegistryError> {
    let violations = validate(&registry);
    if violations.is_empty() {
        Ok(registry)
    } else {
        Err(RegistryError::RegistryValidationFailed {
            violations,
            warnings: Vec::new(),
        })
    }
}

/// Naming rule for namespaces and symbols: a non-empty printable token with
/// no surrounding whitespace. Returns the reason when `name` breaks it.
pub fn check_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name is empty")
    } else if name.trim() != name {
        Some("name has leading or trailing whitespace")
    } else if name.chars().any(char::is_control) {
        Some("name contains non-printable characters")
    } else {
        None
    }
}
