use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::{
    LoadOutcome, contribution::source::ContributionSource, error::RegistryError,
    load_registry, merge::merge_engine::MergeWarning, registry::registry_model::Registry,
};

/// The registry readers currently see.
///
/// Readers take an `Arc` snapshot with [`current`](Self::current) and keep
/// it as long as they need; a reload never touches a snapshot already
/// handed out. The pointer is swapped only after a cycle validates in full,
/// so a failed reload leaves the previous registry in place.
pub struct PublishedRegistry {
    current: ArcSwap<Registry>,
}

impl PublishedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// Run the first load cycle and publish its registry.
    pub fn load(source: &dyn ContributionSource) -> Result<(Self, Vec<MergeWarning>), RegistryError> {
        let LoadOutcome {
            registry, warnings, ..
        } = load_registry(source)?;
        Ok((Self::new(registry), warnings))
    }

    pub fn current(&self) -> Arc<Registry> {
        self.current.load_full()
    }

    /// Build a fresh registry from `source` and publish it on success.
    pub fn reload(&self, source: &dyn ContributionSource) -> Result<Vec<MergeWarning>, RegistryError> {
        match load_registry(source) {
            Ok(outcome) => {
                let fingerprint = outcome.registry.fingerprint();
                self.current.store(Arc::new(outcome.registry));
                info!(%fingerprint, "published reloaded element registry");
                Ok(outcome.warnings)
            }
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous element registry");
                Err(e)
            }
        }
    }
}

impl Default for PublishedRegistry {
    fn default() -> Self {
        Self::new(Registry::default())
    }
}
