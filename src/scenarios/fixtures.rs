//! Canned scenario data.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{
    AccountData, Alert, AlertSeverity, ExitReason, Position, PositionStatus, Scenario,
    ScenarioName, Trade, TradeSide,
};

/// Resolves relative fixture times against a fixed instant.
pub(super) struct Clock {
    now: DateTime<Utc>,
}

impl Clock {
    pub(super) fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    fn minutes_ago(&self, minutes: i64) -> DateTime<Utc> {
        self.now - Duration::minutes(minutes)
    }

    fn hours_ago(&self, hours: i64) -> DateTime<Utc> {
        self.now - Duration::hours(hours)
    }
}

pub(super) fn build(name: ScenarioName, clock: &Clock) -> Scenario {
    match name {
        ScenarioName::Healthy => healthy(clock),
        ScenarioName::WarningMargin => warning_margin(clock),
        ScenarioName::CriticalMargin => critical_margin(clock),
        ScenarioName::DailyLossLimit => daily_loss_limit(clock),
        ScenarioName::NoPositions => no_positions(),
        ScenarioName::SinglePosition => single_position(clock),
        ScenarioName::ManyPositions => many_positions(clock),
        ScenarioName::ProfitableDay => profitable_day(clock),
        ScenarioName::LosingDay => losing_day(clock),
        ScenarioName::MixedAlerts => mixed_alerts(clock),
        ScenarioName::EmptyState => empty_state(),
    }
}

// =============================================================================
// Row helpers
// =============================================================================

fn account(equity: Decimal, buying_power: Decimal, margin_health: Decimal, daily_pnl: Decimal) -> AccountData {
    AccountData {
        equity,
        buying_power,
        margin_health,
        daily_pnl,
    }
}

#[allow(clippy::too_many_arguments)]
fn position(
    id: &str,
    symbol: &str,
    company: &str,
    quantity: u32,
    entry_price: Decimal,
    current_price: Decimal,
    unrealized_pnl: Decimal,
    unrealized_pnl_percent: Decimal,
    created_at: DateTime<Utc>,
) -> Position {
    Position {
        position_id: id.to_string(),
        symbol: symbol.to_string(),
        company_name: Some(company.to_string()),
        quantity: Decimal::from(quantity),
        entry_price,
        current_price: Some(current_price),
        unrealized_pnl: Some(unrealized_pnl),
        unrealized_pnl_percent: Some(unrealized_pnl_percent),
        status: PositionStatus::Open,
        created_at,
    }
}

/// A long round trip; `held` is `(entry_time, exit_time)`.
#[allow(clippy::too_many_arguments)]
fn trade(
    id: &str,
    symbol: &str,
    company: &str,
    quantity: u32,
    entry_price: Decimal,
    exit_price: Decimal,
    profit_loss: Decimal,
    profit_loss_percent: Decimal,
    held: (DateTime<Utc>, DateTime<Utc>),
    status: ExitReason,
) -> Trade {
    Trade {
        trade_id: id.to_string(),
        symbol: symbol.to_string(),
        company_name: Some(company.to_string()),
        quantity: Decimal::from(quantity),
        entry_price,
        exit_price,
        profit_loss,
        profit_loss_percent: Some(profit_loss_percent),
        entry_time: held.0,
        exit_time: held.1,
        status,
        side: Some(TradeSide::Buy),
    }
}

fn alert(
    id: &str,
    symbol: Option<&str>,
    alert_type: &str,
    message: &str,
    severity: AlertSeverity,
    created_at: DateTime<Utc>,
) -> Alert {
    Alert {
        alert_id: id.to_string(),
        symbol: symbol.map(str::to_string),
        company_name: None,
        alert_type: alert_type.to_string(),
        message: message.to_string(),
        severity,
        created_at,
    }
}

// =============================================================================
// Scenarios
// =============================================================================

fn healthy(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(10000.00), dec!(8500.00), dec!(200), dec!(150.50)),
        positions: vec![
            position("pos-001", "AAPL", "Apple Inc.", 10, dec!(175.50), dec!(180.25), dec!(47.50), dec!(2.71), c.hours_ago(2)),
            position("pos-002", "MSFT", "Microsoft Corporation", 5, dec!(380.00), dec!(395.00), dec!(75.00), dec!(3.95), c.hours_ago(1)),
        ],
        trades: vec![
            trade("trade-001", "GOOGL", "Alphabet Inc.", 8, dec!(140.00), dec!(145.50), dec!(44.00), dec!(3.93), (c.hours_ago(4), c.hours_ago(3)), ExitReason::ProfitTarget),
            trade("trade-002", "TSLA", "Tesla Inc.", 5, dec!(245.00), dec!(242.00), dec!(-15.00), dec!(-1.22), (c.hours_ago(5), c.hours_ago(4)), ExitReason::StopLoss),
        ],
        alerts: vec![
            alert("alert-001", Some("AAPL"), "POSITION_OPENED", "Position opened: BUY 10 AAPL @ $175.50", AlertSeverity::Info, c.hours_ago(2)),
            alert("alert-002", Some("GOOGL"), "PROFIT_TARGET", "Profit target hit: GOOGL +$44.00 (+3.93%)", AlertSeverity::Success, c.hours_ago(3)),
        ],
    }
}

fn warning_margin(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(5000.00), dec!(1200.00), dec!(135), dec!(-75.00)),
        positions: vec![
            position("pos-001", "NVDA", "NVIDIA Corporation", 8, dec!(480.00), dec!(465.00), dec!(-120.00), dec!(-3.13), c.hours_ago(3)),
        ],
        trades: vec![],
        alerts: vec![
            alert("alert-001", None, "MARGIN_WARNING", "Margin health at 135% - approaching minimum threshold", AlertSeverity::Warning, c.minutes_ago(5)),
        ],
    }
}

fn critical_margin(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(3000.00), dec!(200.00), dec!(85), dec!(-180.00)),
        positions: vec![
            position("pos-001", "TSLA", "Tesla Inc.", 10, dec!(260.00), dec!(235.00), dec!(-250.00), dec!(-9.62), c.hours_ago(4)),
        ],
        trades: vec![],
        alerts: vec![
            alert("alert-001", None, "MARGIN_CRITICAL", "CRITICAL: Margin health below 100% - liquidation imminent", AlertSeverity::Error, c.minutes_ago(1)),
            alert("alert-002", None, "MARGIN_WARNING", "Margin health dropped to 85%", AlertSeverity::Warning, c.minutes_ago(10)),
        ],
    }
}

fn daily_loss_limit(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(8000.00), dec!(6000.00), dec!(175), dec!(-400.00)),
        positions: vec![],
        trades: vec![
            trade("trade-001", "AMD", "Advanced Micro Devices", 15, dec!(145.00), dec!(138.00), dec!(-105.00), dec!(-4.83), (c.hours_ago(3), c.hours_ago(2)), ExitReason::StopLoss),
            trade("trade-002", "META", "Meta Platforms Inc.", 5, dec!(500.00), dec!(470.00), dec!(-150.00), dec!(-6.00), (c.hours_ago(5), c.hours_ago(4)), ExitReason::StopLoss),
        ],
        alerts: vec![
            alert("alert-001", None, "DAILY_LOSS_LIMIT", "Daily loss limit reached (-5%). Trading paused until tomorrow.", AlertSeverity::Error, c.minutes_ago(30)),
        ],
    }
}

fn no_positions() -> Scenario {
    Scenario {
        account_data: account(dec!(10000.00), dec!(10000.00), dec!(300), dec!(0)),
        positions: vec![],
        trades: vec![],
        alerts: vec![],
    }
}

fn single_position(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(10000.00), dec!(8000.00), dec!(200), dec!(47.50)),
        positions: vec![
            position("pos-001", "AAPL", "Apple Inc.", 10, dec!(175.50), dec!(180.25), dec!(47.50), dec!(2.71), c.hours_ago(1)),
        ],
        trades: vec![],
        alerts: vec![
            alert("alert-001", Some("AAPL"), "POSITION_OPENED", "Position opened: BUY 10 AAPL @ $175.50", AlertSeverity::Info, c.hours_ago(1)),
        ],
    }
}

fn many_positions(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(25000.00), dec!(5000.00), dec!(165), dec!(325.00)),
        positions: vec![
            position("pos-001", "AAPL", "Apple Inc.", 10, dec!(175.50), dec!(180.25), dec!(47.50), dec!(2.71), c.hours_ago(1)),
            position("pos-002", "MSFT", "Microsoft Corporation", 5, dec!(380.00), dec!(395.00), dec!(75.00), dec!(3.95), c.hours_ago(2)),
            position("pos-003", "GOOGL", "Alphabet Inc.", 8, dec!(140.00), dec!(138.50), dec!(-12.00), dec!(-1.07), c.hours_ago(3)),
            position("pos-004", "TSLA", "Tesla Inc.", 5, dec!(245.00), dec!(252.00), dec!(35.00), dec!(2.86), c.hours_ago(4)),
            position("pos-005", "AMZN", "Amazon.com Inc.", 12, dec!(178.00), dec!(185.50), dec!(90.00), dec!(4.21), c.hours_ago(5)),
            position("pos-006", "NVDA", "NVIDIA Corporation", 3, dec!(480.00), dec!(495.00), dec!(45.00), dec!(3.13), c.hours_ago(6)),
            position("pos-007", "AMD", "Advanced Micro Devices", 15, dec!(145.00), dec!(142.00), dec!(-45.00), dec!(-2.07), c.hours_ago(7)),
            position("pos-008", "META", "Meta Platforms Inc.", 4, dec!(500.00), dec!(515.00), dec!(60.00), dec!(3.00), c.hours_ago(8)),
            position("pos-009", "NFLX", "Netflix Inc.", 6, dec!(475.00), dec!(468.00), dec!(-42.00), dec!(-1.47), c.hours_ago(9)),
            position("pos-010", "CRM", "Salesforce Inc.", 8, dec!(265.00), dec!(272.00), dec!(56.00), dec!(2.64), c.hours_ago(10)),
            position("pos-011", "ORCL", "Oracle Corporation", 10, dec!(125.00), dec!(128.00), dec!(30.00), dec!(2.40), c.hours_ago(11)),
            position("pos-012", "INTC", "Intel Corporation", 20, dec!(45.00), dec!(43.50), dec!(-30.00), dec!(-3.33), c.hours_ago(12)),
        ],
        trades: vec![],
        alerts: vec![],
    }
}

fn profitable_day(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(12500.00), dec!(10000.00), dec!(220), dec!(450.00)),
        positions: vec![],
        trades: vec![
            trade("trade-001", "AAPL", "Apple Inc.", 10, dec!(175.00), dec!(180.50), dec!(55.00), dec!(3.14), (c.hours_ago(6), c.hours_ago(5)), ExitReason::ProfitTarget),
            trade("trade-002", "MSFT", "Microsoft Corporation", 8, dec!(375.00), dec!(388.00), dec!(104.00), dec!(3.47), (c.hours_ago(5), c.hours_ago(4)), ExitReason::ProfitTarget),
            trade("trade-003", "GOOGL", "Alphabet Inc.", 12, dec!(138.00), dec!(143.50), dec!(66.00), dec!(3.99), (c.hours_ago(4), c.hours_ago(3)), ExitReason::TrailingStop),
            trade("trade-004", "NVDA", "NVIDIA Corporation", 5, dec!(470.00), dec!(465.00), dec!(-25.00), dec!(-1.06), (c.hours_ago(3), c.hours_ago(2)), ExitReason::StopLoss),
            trade("trade-005", "AMZN", "Amazon.com Inc.", 15, dec!(175.00), dec!(185.00), dec!(150.00), dec!(5.71), (c.hours_ago(2), c.hours_ago(1)), ExitReason::ProfitTarget),
            trade("trade-006", "TSLA", "Tesla Inc.", 8, dec!(240.00), dec!(252.50), dec!(100.00), dec!(5.21), (c.hours_ago(1), c.minutes_ago(30)), ExitReason::ProfitTarget),
        ],
        alerts: vec![
            alert("alert-001", None, "DAILY_SUMMARY", "Great day! 5 wins, 1 loss. Total P&L: +$450.00", AlertSeverity::Success, c.minutes_ago(5)),
        ],
    }
}

fn losing_day(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(9200.00), dec!(7500.00), dec!(180), dec!(-280.00)),
        positions: vec![],
        trades: vec![
            trade("trade-001", "TSLA", "Tesla Inc.", 5, dec!(250.00), dec!(242.00), dec!(-40.00), dec!(-3.20), (c.hours_ago(5), c.hours_ago(4)), ExitReason::StopLoss),
            trade("trade-002", "NVDA", "NVIDIA Corporation", 3, dec!(480.00), dec!(468.00), dec!(-36.00), dec!(-2.50), (c.hours_ago(4), c.hours_ago(3)), ExitReason::StopLoss),
            trade("trade-003", "AMD", "Advanced Micro Devices", 10, dec!(148.00), dec!(140.00), dec!(-80.00), dec!(-5.41), (c.hours_ago(3), c.hours_ago(2)), ExitReason::StopLoss),
            trade("trade-004", "META", "Meta Platforms Inc.", 2, dec!(505.00), dec!(480.00), dec!(-50.00), dec!(-4.95), (c.hours_ago(2), c.hours_ago(1)), ExitReason::StopLoss),
            trade("trade-005", "AAPL", "Apple Inc.", 8, dec!(178.00), dec!(168.50), dec!(-76.00), dec!(-5.34), (c.hours_ago(1), c.minutes_ago(30)), ExitReason::StopLoss),
        ],
        alerts: vec![
            alert("alert-001", None, "DAILY_WARNING", "Tough day. 0 wins, 5 losses. Consider reviewing strategy.", AlertSeverity::Warning, c.minutes_ago(10)),
        ],
    }
}

fn mixed_alerts(c: &Clock) -> Scenario {
    Scenario {
        account_data: account(dec!(10000.00), dec!(8000.00), dec!(180), dec!(50.00)),
        positions: vec![
            position("pos-001", "AAPL", "Apple Inc.", 10, dec!(175.50), dec!(178.00), dec!(25.00), dec!(1.42), c.hours_ago(1)),
        ],
        trades: vec![],
        alerts: vec![
            alert("alert-001", Some("AAPL"), "POSITION_OPENED", "Position opened: BUY 10 AAPL @ $175.50", AlertSeverity::Info, c.minutes_ago(2)),
            alert("alert-002", None, "MARGIN_WARNING", "Margin health at 140% - monitor closely", AlertSeverity::Warning, c.minutes_ago(15)),
            alert("alert-003", None, "API_ERROR", "Alpha Vantage API rate limit reached. Using cached data.", AlertSeverity::Error, c.minutes_ago(30)),
            alert("alert-004", Some("MSFT"), "POSITION_CLOSED", "Position closed: MSFT +$56.00 (Profit Target)", AlertSeverity::Success, c.minutes_ago(45)),
            alert("alert-005", None, "SYSTEM_INFO", "Market scanner running. Next scan in 5 minutes.", AlertSeverity::Info, c.minutes_ago(60)),
        ],
    }
}

fn empty_state() -> Scenario {
    Scenario {
        account_data: AccountData::default(),
        positions: vec![],
        trades: vec![],
        alerts: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all() -> Vec<(ScenarioName, Scenario)> {
        let clock = Clock::new(Utc::now());
        ScenarioName::ALL
            .into_iter()
            .map(|name| (name, build(name, &clock)))
            .collect()
    }

    #[test]
    fn test_ids_unique_within_scenario() {
        for (name, scenario) in all() {
            let positions: HashSet<_> = scenario.positions.iter().map(|p| &p.position_id).collect();
            let trades: HashSet<_> = scenario.trades.iter().map(|t| &t.trade_id).collect();
            let alerts: HashSet<_> = scenario.alerts.iter().map(|a| &a.alert_id).collect();

            assert_eq!(positions.len(), scenario.positions.len(), "{}", name);
            assert_eq!(trades.len(), scenario.trades.len(), "{}", name);
            assert_eq!(alerts.len(), scenario.alerts.len(), "{}", name);
        }
    }

    #[test]
    fn test_account_figures_non_negative() {
        for (name, scenario) in all() {
            let account = &scenario.account_data;
            assert!(account.equity >= Decimal::ZERO, "{}", name);
            assert!(account.buying_power >= Decimal::ZERO, "{}", name);
            assert!(account.margin_health >= Decimal::ZERO, "{}", name);
        }
    }

    #[test]
    fn test_positions_have_positive_size_and_price() {
        for (name, scenario) in all() {
            for p in &scenario.positions {
                assert!(p.quantity > Decimal::ZERO, "{} {}", name, p.position_id);
                assert!(p.entry_price > Decimal::ZERO, "{} {}", name, p.position_id);
                assert_eq!(p.status, PositionStatus::Open);
            }
        }
    }

    #[test]
    fn test_trades_exit_after_entry() {
        for (name, scenario) in all() {
            for t in &scenario.trades {
                assert!(t.entry_time <= t.exit_time, "{} {}", name, t.trade_id);
            }
        }
    }

    #[test]
    fn test_stored_pnl_matches_prices() {
        // Fixtures store P&L redundantly; keep them consistent with the prices.
        for (name, scenario) in all() {
            for p in &scenario.positions {
                let expected = (p.current_price.unwrap() - p.entry_price) * p.quantity;
                assert_eq!(p.unrealized_pnl, Some(expected), "{} {}", name, p.position_id);
            }
            for t in &scenario.trades {
                let expected = (t.exit_price - t.entry_price) * t.quantity;
                assert_eq!(t.profit_loss, expected, "{} {}", name, t.trade_id);
            }
        }
    }

    #[test]
    fn test_relative_times() {
        let now = Utc::now();
        let clock = Clock::new(now);
        assert_eq!(clock.minutes_ago(5), now - Duration::minutes(5));
        assert_eq!(clock.hours_ago(2), now - Duration::hours(2));
    }
}
