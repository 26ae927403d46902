//! Scenario registry and server state tests through the public API.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use dashboard_mock::scenarios::ScenarioRegistry;
use dashboard_mock::state::ScenarioState;
use dashboard_mock::types::{ScenarioName, UnknownScenario};
use rust_decimal_macros::dec;

#[test]
fn test_every_name_resolves_to_its_own_fixture() {
    let registry = ScenarioRegistry::new();

    for name in ScenarioName::ALL {
        assert_eq!(registry.get(name.as_str()), registry.scenario(name));
    }
}

#[test]
fn test_unknown_name_falls_back_to_healthy() {
    let registry = ScenarioRegistry::new();

    assert!("does_not_exist".parse::<ScenarioName>().is_err());
    assert_eq!(
        registry.get("does_not_exist"),
        registry.scenario(ScenarioName::Healthy)
    );
}

#[test]
fn test_names_in_declaration_order() {
    let registry = ScenarioRegistry::new();
    let names: Vec<&str> = registry.names().iter().map(|n| n.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "healthy",
            "warning_margin",
            "critical_margin",
            "daily_loss_limit",
            "no_positions",
            "single_position",
            "many_positions",
            "profitable_day",
            "losing_day",
            "mixed_alerts",
            "empty_state",
        ]
    );
}

#[test]
fn test_name_parsing_is_strict() {
    assert_eq!(
        ScenarioName::from_str("many_positions"),
        Ok(ScenarioName::ManyPositions)
    );
    assert_eq!(
        "MANY_POSITIONS".parse::<ScenarioName>(),
        Err(UnknownScenario("MANY_POSITIONS".to_string()))
    );
}

#[test]
fn test_fixed_reference_time_resolves_relative_timestamps() {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 15, 30, 0).unwrap();
    let registry = ScenarioRegistry::at(now);
    let healthy = registry.scenario(ScenarioName::Healthy);

    assert_eq!(registry.reference_time(), now);
    assert_eq!(healthy.positions[0].created_at, now - Duration::hours(2));
    assert_eq!(healthy.trades[0].entry_time, now - Duration::hours(4));
    assert_eq!(healthy.trades[0].exit_time, now - Duration::hours(3));

    let mixed = registry.scenario(ScenarioName::MixedAlerts);
    assert_eq!(mixed.alerts[0].created_at, now - Duration::minutes(2));
}

#[test]
fn test_repeated_lookups_are_identical() {
    let registry = ScenarioRegistry::new();
    let first = registry.scenario(ScenarioName::ProfitableDay).clone();
    let second = registry.scenario(ScenarioName::ProfitableDay).clone();
    assert_eq!(first, second);
}

#[test]
fn test_states_sharing_a_registry_are_independent() {
    let registry = Arc::new(ScenarioRegistry::new());
    let a = ScenarioState::new(registry.clone());
    let b = ScenarioState::new(registry);

    a.set(ScenarioName::EmptyState);
    assert_eq!(a.current(), ScenarioName::EmptyState);
    assert_eq!(b.current(), ScenarioName::Healthy);
}

#[test]
fn test_state_snapshot_follows_current() {
    let state = ScenarioState::new(Arc::new(ScenarioRegistry::new()));

    state.set_by_name("critical_margin").unwrap();
    let account = &state.snapshot().account_data;
    assert_eq!(account.equity, dec!(3000.00));
    assert_eq!(account.margin_health, dec!(85));

    assert!(state.set_by_name("nope").is_err());
    assert_eq!(state.current(), ScenarioName::CriticalMargin);
}
