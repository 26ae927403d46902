//! Server-side scenario state.
//!
//! One mutable pointer, the active scenario, over the immutable registry. The
//! pointer is a single atomic so concurrent handlers never see a torn value.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::scenarios::ScenarioRegistry;
use crate::types::{Scenario, ScenarioName, UnknownScenario};

/// Owned scenario context shared by all request handlers.
#[derive(Debug)]
pub struct ScenarioState {
    registry: Arc<ScenarioRegistry>,
    current: AtomicUsize,
}

impl ScenarioState {
    /// Start on the default scenario.
    pub fn new(registry: Arc<ScenarioRegistry>) -> Self {
        Self::with_initial(registry, ScenarioName::default())
    }

    pub fn with_initial(registry: Arc<ScenarioRegistry>, initial: ScenarioName) -> Self {
        Self {
            registry,
            current: AtomicUsize::new(initial.index()),
        }
    }

    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// The active scenario name.
    pub fn current(&self) -> ScenarioName {
        ScenarioName::from_index(self.current.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Data bundle of the active scenario.
    pub fn snapshot(&self) -> &Scenario {
        self.registry.scenario(self.current())
    }

    /// Names a client may switch to.
    pub fn available(&self) -> &'static [ScenarioName] {
        self.registry.names()
    }

    /// Switch to `name`. Returns the previous scenario.
    pub fn set(&self, name: ScenarioName) -> ScenarioName {
        let previous = self.current.swap(name.index(), Ordering::AcqRel);
        let previous = ScenarioName::from_index(previous).unwrap_or_default();
        if previous != name {
            info!("Scenario changed: {} -> {}", previous, name);
        }
        previous
    }

    /// Validate a raw name and switch to it.
    ///
    /// Unknown names leave the state untouched; they never reach the
    /// registry's fallback lookup.
    pub fn set_by_name(&self, raw: &str) -> Result<ScenarioName, UnknownScenario> {
        let name: ScenarioName = raw.parse()?;
        self.set(name);
        Ok(name)
    }
}
