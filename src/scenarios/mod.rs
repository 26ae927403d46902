//! Scenario registry.
//!
//! Holds the closed set of named data snapshots. Fixture timestamps are
//! relative ("two hours ago"), so the registry resolves them once against the
//! instant it is built and every later lookup sees the same bundle.

mod fixtures;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::warn;

use crate::types::{Scenario, ScenarioName};

/// Immutable name → scenario lookup.
#[derive(Debug, Clone)]
pub struct ScenarioRegistry {
    reference_time: DateTime<Utc>,
    scenarios: [Scenario; ScenarioName::ALL.len()],
}

impl ScenarioRegistry {
    /// Build the registry with timestamps relative to now.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Build the registry with timestamps relative to `reference_time`.
    pub fn at(reference_time: DateTime<Utc>) -> Self {
        let reference_time = reference_time.trunc_subsecs(3);
        let clock = fixtures::Clock::new(reference_time);

        Self {
            reference_time,
            scenarios: ScenarioName::ALL.map(|name| fixtures::build(name, &clock)),
        }
    }

    /// Instant the relative fixture timestamps were resolved against.
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Look up a scenario by its typed name.
    pub fn scenario(&self, name: ScenarioName) -> &Scenario {
        &self.scenarios[name.index()]
    }

    /// Look up a scenario by raw name.
    ///
    /// Unknown names fall back to the default scenario instead of failing.
    /// Callers handling external input must validate the name first.
    pub fn get(&self, name: &str) -> &Scenario {
        match name.parse::<ScenarioName>() {
            Ok(name) => self.scenario(name),
            Err(e) => {
                warn!("{}, falling back to {}", e, ScenarioName::default());
                self.scenario(ScenarioName::default())
            }
        }
    }

    /// All registered names in declaration order.
    pub fn names(&self) -> &'static [ScenarioName] {
        &ScenarioName::ALL
    }
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn registry() -> ScenarioRegistry {
        ScenarioRegistry::at(Utc.with_ymd_and_hms(2024, 1, 15, 15, 30, 0).unwrap())
    }

    #[test]
    fn test_lookup_is_stable() {
        let registry = registry();
        for name in registry.names() {
            assert_eq!(registry.get(name.as_str()), registry.scenario(*name));
            assert_eq!(registry.get(name.as_str()), registry.get(name.as_str()));
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let registry = registry();
        assert_eq!(
            registry.get("not-a-real-name"),
            registry.scenario(ScenarioName::Healthy)
        );
        assert_eq!(
            registry.get("mixed_alerts"),
            registry.scenario(ScenarioName::MixedAlerts)
        );
    }

    #[test]
    fn test_same_reference_builds_equal_registries() {
        let a = registry();
        let b = registry();
        for name in ScenarioName::ALL {
            assert_eq!(a.scenario(name), b.scenario(name));
        }
    }

    #[test]
    fn test_reference_time_truncated_to_millis() {
        let at = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        let registry = ScenarioRegistry::at(at);
        assert_eq!(registry.reference_time().timestamp_subsec_nanos(), 123_000_000);
    }
}
