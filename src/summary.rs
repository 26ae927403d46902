//! Derived display figures.
//!
//! The small amount of arithmetic the dashboard shows on top of the raw API
//! data: daily P&L percent, margin status, the risk gauge, and trade totals.
//! All of it is `Decimal` math and never divides by zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::{AccountData, Trade};

/// Daily loss limit as a fraction of equity.
const DAILY_LOSS_LIMIT_FRACTION: Decimal = dec!(0.05);
/// Margin health below this adds to the risk gauge.
const MARGIN_RISK_THRESHOLD: Decimal = dec!(150);
const MAX_OPEN_POSITIONS: usize = 3;

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Margin health bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarginStatus {
    Healthy,
    Moderate,
    Critical,
}

impl MarginStatus {
    pub fn from_health(margin_health: Decimal) -> Self {
        if margin_health >= dec!(150) {
            MarginStatus::Healthy
        } else if margin_health >= dec!(100) {
            MarginStatus::Moderate
        } else {
            MarginStatus::Critical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Up,
    Down,
}

/// Headline account figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountOverview {
    pub equity: Decimal,
    pub buying_power: Decimal,
    pub margin_health: Decimal,
    pub margin_status: MarginStatus,
    pub daily_pnl: Decimal,
    /// Daily P&L relative to equity; zero when equity is zero.
    pub daily_pnl_percent: Decimal,
    pub trend: Trend,
}

impl From<&AccountData> for AccountOverview {
    fn from(account: &AccountData) -> Self {
        Self {
            equity: account.equity,
            buying_power: account.buying_power,
            margin_health: account.margin_health,
            margin_status: MarginStatus::from_health(account.margin_health),
            daily_pnl: account.daily_pnl,
            daily_pnl_percent: percent_of(account.daily_pnl, account.equity),
            trend: if account.daily_pnl >= Decimal::ZERO {
                Trend::Up
            } else {
                Trend::Down
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLabel {
    Low,
    Moderate,
    High,
}

impl RiskLabel {
    pub fn from_level(level: Decimal) -> Self {
        if level < dec!(30) {
            RiskLabel::Low
        } else if level < dec!(60) {
            RiskLabel::Moderate
        } else {
            RiskLabel::High
        }
    }
}

/// Risk gauge inputs and the combined 0-100 risk level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetrics {
    pub total_capital: Decimal,
    pub capital_deployed: Decimal,
    pub daily_loss: Decimal,
    pub daily_loss_limit: Decimal,
    pub margin_health: Decimal,
    pub open_positions: usize,
    pub max_positions: usize,
    pub risk_level: Decimal,
    pub risk_label: RiskLabel,
}

impl RiskMetrics {
    /// The level is the sum of three components, capped only in total at 100:
    /// daily loss against the limit (50 at the limit), capital deployed
    /// (30 when fully deployed), and margin health below 150% (20 at zero).
    pub fn compute(account: &AccountData, open_positions: usize) -> Self {
        let total_capital = account.equity;
        let daily_loss_limit = total_capital * DAILY_LOSS_LIMIT_FRACTION;
        let daily_loss = account.daily_pnl.min(Decimal::ZERO).abs();
        let capital_deployed = total_capital - account.buying_power;

        let loss_risk = percent_of(daily_loss, daily_loss_limit) / dec!(2);
        let deployment_risk = percent_of(capital_deployed, total_capital) * dec!(0.3);
        let margin_risk = if account.margin_health < MARGIN_RISK_THRESHOLD {
            (MARGIN_RISK_THRESHOLD - account.margin_health) / MARGIN_RISK_THRESHOLD * dec!(20)
        } else {
            Decimal::ZERO
        };

        let risk_level = (loss_risk + deployment_risk + margin_risk).min(Decimal::ONE_HUNDRED);

        Self {
            total_capital,
            capital_deployed,
            daily_loss,
            daily_loss_limit,
            margin_health: account.margin_health,
            open_positions,
            max_positions: MAX_OPEN_POSITIONS,
            risk_level,
            risk_label: RiskLabel::from_level(risk_level),
        }
    }

    /// Daily loss as a percentage of the limit.
    pub fn loss_used_percent(&self) -> Decimal {
        percent_of(self.daily_loss, self.daily_loss_limit)
    }

    pub fn capital_deployed_percent(&self) -> Decimal {
        percent_of(self.capital_deployed, self.total_capital)
    }
}

/// Totals over a trade history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub wins: usize,
    pub win_rate: Decimal,
    pub total_pnl: Decimal,
    pub best_trade: Option<Decimal>,
    pub worst_trade: Option<Decimal>,
}

impl TradeSummary {
    pub fn from_trades(trades: &[Trade]) -> Self {
        let total_trades = trades.len();
        let wins = trades.iter().filter(|t| t.is_win()).count();

        Self {
            total_trades,
            wins,
            win_rate: percent_of(Decimal::from(wins), Decimal::from(total_trades)),
            total_pnl: trades.iter().map(|t| t.profit_loss).sum(),
            best_trade: trades.iter().map(|t| t.profit_loss).max(),
            worst_trade: trades.iter().map(|t| t.profit_loss).min(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::ScenarioRegistry;
    use crate::types::ScenarioName;

    fn account(name: ScenarioName) -> AccountData {
        ScenarioRegistry::new().scenario(name).account_data.clone()
    }

    #[test]
    fn test_margin_status_thresholds() {
        assert_eq!(MarginStatus::from_health(dec!(200)), MarginStatus::Healthy);
        assert_eq!(MarginStatus::from_health(dec!(150)), MarginStatus::Healthy);
        assert_eq!(MarginStatus::from_health(dec!(135)), MarginStatus::Moderate);
        assert_eq!(MarginStatus::from_health(dec!(100)), MarginStatus::Moderate);
        assert_eq!(MarginStatus::from_health(dec!(85)), MarginStatus::Critical);
    }

    #[test]
    fn test_overview_healthy() {
        let overview = AccountOverview::from(&account(ScenarioName::Healthy));
        assert_eq!(overview.margin_status, MarginStatus::Healthy);
        assert_eq!(overview.trend, Trend::Up);
        assert_eq!(overview.daily_pnl_percent, dec!(1.505));
    }

    #[test]
    fn test_overview_warning_margin() {
        let overview = AccountOverview::from(&account(ScenarioName::WarningMargin));
        assert_eq!(overview.margin_status, MarginStatus::Moderate);
        assert_eq!(overview.trend, Trend::Down);
        assert_eq!(overview.daily_pnl_percent, dec!(-1.5));
    }

    #[test]
    fn test_overview_empty_state_does_not_divide_by_zero() {
        let overview = AccountOverview::from(&account(ScenarioName::EmptyState));
        assert_eq!(overview.daily_pnl_percent, Decimal::ZERO);
        assert_eq!(overview.margin_status, MarginStatus::Critical);
        assert_eq!(overview.trend, Trend::Up);
    }

    #[test]
    fn test_risk_healthy() {
        // No loss, 15% deployed, margin well above threshold.
        let risk = RiskMetrics::compute(&account(ScenarioName::Healthy), 2);
        assert_eq!(risk.daily_loss, Decimal::ZERO);
        assert_eq!(risk.daily_loss_limit, dec!(500));
        assert_eq!(risk.capital_deployed, dec!(1500));
        assert_eq!(risk.risk_level, dec!(4.5));
        assert_eq!(risk.risk_label, RiskLabel::Low);
        assert_eq!(risk.max_positions, 3);
    }

    #[test]
    fn test_risk_critical_margin() {
        // Loss 180 of a 150 limit adds 60, 2800/3000 deployed adds 28, margin 85 adds 65/150*20.
        let risk = RiskMetrics::compute(&account(ScenarioName::CriticalMargin), 1);
        assert_eq!(risk.daily_loss, dec!(180));
        assert_eq!(risk.daily_loss_limit, dec!(150));
        assert_eq!(risk.capital_deployed_percent().round_dp(4), dec!(93.3333));
        assert!(risk.loss_used_percent() > Decimal::ONE_HUNDRED);
        assert_eq!(risk.risk_level.round_dp(2), dec!(96.67));
        assert_eq!(risk.risk_label, RiskLabel::High);
    }

    #[test]
    fn test_risk_empty_state() {
        let risk = RiskMetrics::compute(&AccountData::default(), 0);
        assert_eq!(risk.daily_loss_limit, Decimal::ZERO);
        assert_eq!(risk.loss_used_percent(), Decimal::ZERO);
        assert_eq!(risk.capital_deployed_percent(), Decimal::ZERO);
        // Zero margin health still counts as maximum margin risk.
        assert_eq!(risk.risk_level, dec!(20));
        assert_eq!(risk.risk_label, RiskLabel::Low);
    }

    #[test]
    fn test_risk_total_capped_at_hundred() {
        // Losing twice the limit alone contributes 100.
        let account = AccountData {
            equity: dec!(1000),
            buying_power: dec!(0),
            margin_health: dec!(50),
            daily_pnl: dec!(-100),
        };
        let risk = RiskMetrics::compute(&account, 3);
        assert_eq!(risk.loss_used_percent(), dec!(200));
        assert_eq!(risk.risk_level, Decimal::ONE_HUNDRED);
        assert_eq!(risk.risk_label, RiskLabel::High);
    }

    #[test]
    fn test_risk_buying_power_above_equity_lowers_deployment() {
        let account = AccountData {
            equity: dec!(1000),
            buying_power: dec!(1100),
            margin_health: dec!(200),
            daily_pnl: dec!(0),
        };
        let risk = RiskMetrics::compute(&account, 0);
        assert_eq!(risk.capital_deployed, dec!(-100));
        assert_eq!(risk.risk_level, dec!(-3));
        assert_eq!(risk.risk_label, RiskLabel::Low);
    }

    #[test]
    fn test_risk_label_boundaries() {
        assert_eq!(RiskLabel::from_level(dec!(29.99)), RiskLabel::Low);
        assert_eq!(RiskLabel::from_level(dec!(30)), RiskLabel::Moderate);
        assert_eq!(RiskLabel::from_level(dec!(60)), RiskLabel::High);
    }

    #[test]
    fn test_trade_summary_profitable_day() {
        let registry = ScenarioRegistry::new();
        let summary =
            TradeSummary::from_trades(&registry.scenario(ScenarioName::ProfitableDay).trades);

        assert_eq!(summary.total_trades, 6);
        assert_eq!(summary.wins, 5);
        assert_eq!(summary.total_pnl, dec!(450.00));
        assert_eq!(summary.best_trade, Some(dec!(150.00)));
        assert_eq!(summary.worst_trade, Some(dec!(-25.00)));
        assert_eq!(summary.win_rate.round_dp(2), dec!(83.33));
    }

    #[test]
    fn test_trade_summary_empty() {
        let summary = TradeSummary::from_trades(&[]);
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.win_rate, Decimal::ZERO);
        assert_eq!(summary.total_pnl, Decimal::ZERO);
        assert_eq!(summary.best_trade, None);
        assert_eq!(summary.worst_trade, None);
    }
}
