use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    LoadOutcome, error::RegistryError, merge::merge_engine::MergeWarning,
    validate::violation::Violation,
};

// ============================================================================
// Load report - one load cycle, summarized for humans and CI
// ============================================================================

/// Summary of one load cycle.
///
/// Built from a successful [`LoadOutcome`] or from the error that aborted
/// the cycle. Consumed by the console, JUnit and JSON renderers.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Description of the contribution source
    pub source: String,

    /// Whether the registry was published (and, in strict mode, warning-free)
    pub passed: bool,

    pub contributions: usize,

    /// Published namespaces with their symbol counts (empty on failure)
    pub namespaces: Vec<NamespaceSummary>,

    pub symbols: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    pub warnings: Vec<MergeWarning>,

    /// Set when warnings were promoted to failures
    pub warnings_denied: bool,

    pub violations: Vec<Violation>,

    /// Fatal error other than a validation failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceSummary {
    pub name: String,
    pub symbols: usize,
}

impl LoadReport {
    pub fn from_outcome(source: &str, outcome: &LoadOutcome) -> Self {
        let namespaces = outcome
            .registry
            .iter()
            .map(|(name, map)| NamespaceSummary {
                name: name.to_string(),
                symbols: map.len(),
            })
            .collect();

        Self {
            source: source.to_string(),
            passed: true,
            contributions: outcome.contributions,
            namespaces,
            symbols: outcome.registry.symbol_count(),
            fingerprint: Some(outcome.registry.fingerprint()),
            warnings: outcome.warnings.clone(),
            warnings_denied: false,
            violations: Vec::new(),
            error: None,
            duration_ms: None,
        }
    }

    pub fn from_error(source: &str, error: &RegistryError) -> Self {
        let violations = error.violations().to_vec();
        let warnings = error.warnings().to_vec();
        let error = if violations.is_empty() {
            Some(error.to_string())
        } else {
            None
        };

        Self {
            source: source.to_string(),
            passed: false,
            contributions: 0,
            namespaces: Vec::new(),
            symbols: 0,
            fingerprint: None,
            warnings,
            warnings_denied: false,
            violations,
            error,
            duration_ms: None,
        }
    }

    /// Treat any merge warning as a failure.
    pub fn deny_warnings(mut self) -> Self {
        if !self.warnings.is_empty() {
            self.warnings_denied = true;
            self.passed = false;
        }
        self
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Every namespace mentioned by the report, in sorted order.
    pub fn namespace_names(&self) -> BTreeSet<&str> {
        self.namespaces
            .iter()
            .map(|n| n.name.as_str())
            .chain(self.violations.iter().map(Violation::namespace))
            .chain(self.warnings.iter().map(|w| w.namespace.as_str()))
            .collect()
    }
}
