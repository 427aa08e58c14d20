use std::fmt;

use serde::Serialize;

/// One structural defect found in a merged registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    EmptyIdentifier {
        namespace: String,
        symbol: String,
    },

    /// Several symbols of one namespace resolve to the same element.
    IdentifierCollision {
        namespace: String,
        identifier: String,
        symbols: Vec<String>,
    },

    InvalidNamespaceName {
        namespace: String,
        reason: String,
    },

    InvalidSymbolName {
        namespace: String,
        symbol: String,
        reason: String,
    },
}

impl Violation {
    pub fn namespace(&self) -> &str {
        match self {
            Violation::EmptyIdentifier { namespace, .. }
            | Violation::IdentifierCollision { namespace, .. }
            | Violation::InvalidNamespaceName { namespace, .. }
            | Violation::InvalidSymbolName { namespace, .. } => namespace,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyIdentifier { namespace, symbol } => {
                write!(f, "{}.{}: identifier is empty", namespace, symbol)
            }
            Violation::IdentifierCollision {
                namespace,
                identifier,
                symbols,
            } => {
                write!(
                    f,
                    "{}: identifier '{}' is shared by {}",
                    namespace,
                    identifier,
                    symbols.join(", ")
                )
            }
            Violation::InvalidNamespaceName { namespace, reason } => {
                write!(f, "namespace {:?}: {}", namespace, reason)
            }
            Violation::InvalidSymbolName {
                namespace,
                symbol,
                reason,
            } => {
                write!(f, "{}.{:?}: {}", namespace, symbol, reason)
            }
        }
    }
}
