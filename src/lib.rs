use tracing::info;

use crate::{
    contribution::{loader::load_contributions, source::ContributionSource},
    error::RegistryError,
    merge::merge_engine::{MergeWarning, merge},
    registry::registry_model::Registry,
    validate::validator::check,
};

pub mod cli;
pub mod contribution;
pub mod error;
pub mod logging;
pub mod merge;
pub mod registry;
pub mod report;
pub mod validate;

/// A published registry together with the merge warnings of its load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub registry: Registry,
    pub warnings: Vec<MergeWarning>,
    /// Number of contributions read from the source
    pub contributions: usize,
}

/// Run one full load cycle: read, merge, validate.
///
/// Either every contribution makes it into a validated registry or the
/// cycle fails as a whole. A malformed document stops the cycle at load
/// time; validation failures are reported together.
pub fn load_registry(source: &dyn ContributionSource) -> Result<LoadOutcome, RegistryError> {
    let contributions = load_contributions(source)?;
    let merged = merge(&contributions);
    let registry = match check(merged.registry) {
        Ok(registry) => registry,
        Err(e) => return Err(e.with_warnings(merged.warnings)),
    };

    info!(
        source = %source.describe(),
        contributions = contributions.len(),
        namespaces = registry.len(),
        symbols = registry.symbol_count(),
        warnings = merged.warnings.len(),
        "element registry loaded"
    );

    Ok(LoadOutcome {
        registry,
        warnings: merged.warnings,
        contributions: contributions.len(),
    })
}
