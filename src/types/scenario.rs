//! Scenario names, bundles, and the scenario-control wire types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{AccountData, Alert, Position, Trade};

/// The closed set of canned data scenarios, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioName {
    #[default]
    Healthy,
    WarningMargin,
    CriticalMargin,
    DailyLossLimit,
    NoPositions,
    SinglePosition,
    ManyPositions,
    ProfitableDay,
    LosingDay,
    MixedAlerts,
    EmptyState,
}

impl ScenarioName {
    /// Every scenario, in declaration order.
    pub const ALL: [ScenarioName; 11] = [
        ScenarioName::Healthy,
        ScenarioName::WarningMargin,
        ScenarioName::CriticalMargin,
        ScenarioName::DailyLossLimit,
        ScenarioName::NoPositions,
        ScenarioName::SinglePosition,
        ScenarioName::ManyPositions,
        ScenarioName::ProfitableDay,
        ScenarioName::LosingDay,
        ScenarioName::MixedAlerts,
        ScenarioName::EmptyState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioName::Healthy => "healthy",
            ScenarioName::WarningMargin => "warning_margin",
            ScenarioName::CriticalMargin => "critical_margin",
            ScenarioName::DailyLossLimit => "daily_loss_limit",
            ScenarioName::NoPositions => "no_positions",
            ScenarioName::SinglePosition => "single_position",
            ScenarioName::ManyPositions => "many_positions",
            ScenarioName::ProfitableDay => "profitable_day",
            ScenarioName::LosingDay => "losing_day",
            ScenarioName::MixedAlerts => "mixed_alerts",
            ScenarioName::EmptyState => "empty_state",
        }
    }

    /// Position in [`ScenarioName::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scenario name that is not part of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioName {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

/// A complete, immutable data snapshot served while the scenario is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub account_data: AccountData,
    pub positions: Vec<Position>,
    pub trades: Vec<Trade>,
    pub alerts: Vec<Alert>,
}

/// Response of `GET /api/scenario`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioStatus {
    pub current_scenario: ScenarioName,
    pub available_scenarios: Vec<ScenarioName>,
}

/// Body of `POST /api/scenario`.
///
/// The name stays a raw string so unknown names reach the server's own
/// validation instead of failing inside the JSON extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetScenarioRequest {
    pub scenario: String,
}

/// Successful response of `POST /api/scenario`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScenarioResponse {
    pub success: bool,
    pub current_scenario: ScenarioName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_display() {
        for name in ScenarioName::ALL {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
        }
    }

    #[test]
    fn test_parse_round_trips_every_name() {
        for name in ScenarioName::ALL {
            assert_eq!(name.as_str().parse::<ScenarioName>(), Ok(name));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "not-a-real-name".parse::<ScenarioName>().unwrap_err();
        assert_eq!(err, UnknownScenario("not-a-real-name".to_string()));
        assert_eq!(err.to_string(), "unknown scenario: not-a-real-name");

        // Case matters on the wire.
        assert!("Healthy".parse::<ScenarioName>().is_err());
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, name) in ScenarioName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
            assert_eq!(ScenarioName::from_index(i), Some(*name));
        }
        assert_eq!(ScenarioName::from_index(ScenarioName::ALL.len()), None);
    }

    #[test]
    fn test_default_is_healthy() {
        assert_eq!(ScenarioName::default(), ScenarioName::Healthy);
    }

    #[test]
    fn test_status_camel_case() {
        let status = ScenarioStatus {
            current_scenario: ScenarioName::WarningMargin,
            available_scenarios: vec![ScenarioName::Healthy],
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["currentScenario"], "warning_margin");
        assert_eq!(json["availableScenarios"][0], "healthy");
    }
}
