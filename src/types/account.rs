use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of the trading account.
///
/// Missing fields deserialize to zero, which is also what the dashboard shows
/// when the backend returns an empty payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountData {
    /// Total account equity.
    pub equity: Decimal,
    /// Cash available for new positions.
    pub buying_power: Decimal,
    /// Buffer above the margin call threshold, in percent.
    pub margin_health: Decimal,
    /// Realized plus unrealized P&L for the current session.
    pub daily_pnl: Decimal,
}

impl AccountData {
    /// True for the all-zero snapshot served by the empty-state scenario.
    pub fn is_empty(&self) -> bool {
        self.equity.is_zero()
            && self.buying_power.is_zero()
            && self.margin_health.is_zero()
            && self.daily_pnl.is_zero()
    }
}
