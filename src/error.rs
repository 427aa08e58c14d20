use std::path::PathBuf;

use thiserror::Error;

use crate::merge::merge_engine::MergeWarning;
use crate::validate::violation::Violation;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// A source document could not be decoded into (namespace, mapping) pairs.
    #[error("malformed contribution in {locator}: {reason}")]
    MalformedContribution { locator: String, reason: String },

    /// The merged registry has structural defects. Carries every violation
    /// found, plus the merge warnings raised while building it.
    #[error("registry validation failed with {} violation(s):\n{}", .violations.len(), format_violations(.violations))]
    RegistryValidationFailed {
        violations: Vec<Violation>,
        warnings: Vec<MergeWarning>,
    },

    #[error("unknown namespace '{namespace}'")]
    UnknownNamespace { namespace: String },

    #[error("unknown symbol '{symbol}' in namespace '{namespace}'")]
    UnknownSymbol { namespace: String, symbol: String },

    /// A dotted reference that does not split into `namespace.symbol`.
    #[error("invalid reference '{reference}': expected <namespace>.<symbol>")]
    InvalidReference { reference: String },

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
}

impl RegistryError {
    pub fn malformed(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        RegistryError::MalformedContribution {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RegistryError::Io {
            path: path.into(),
            source,
        }
    }

    /// Violations carried by a failed validation, empty for every other kind.
    pub fn violations(&self) -> &[Violation] {
        match self {
            RegistryError::RegistryValidationFailed { violations, .. } => violations,
            _ => &[],
        }
    }

    /// Merge warnings of a cycle that failed validation.
    pub fn warnings(&self) -> &[MergeWarning] {
        match self {
            RegistryError::RegistryValidationFailed { warnings, .. } => warnings,
            _ => &[],
        }
    }

    /// Attach merge warnings to a validation failure. Other kinds pass through.
    pub fn with_warnings(self, merge_warnings: Vec<MergeWarning>) -> Self {
        match self {
            RegistryError::RegistryValidationFailed { violations, .. } => {
                RegistryError::RegistryValidationFailed {
                    violations,
                    warnings: merge_warnings,
                }
            }
            other => other,
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}
