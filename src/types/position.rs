use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle tag of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    Open,
    Closed,
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionStatus::Open => write!(f, "OPEN"),
            PositionStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// An open position as reported by the webhook API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unique within a scenario.
    pub position_id: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub quantity: Decimal,
    pub entry_price: Decimal,
    /// Last mark price, if the backend has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    /// Stored as reported; never recomputed from prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl_percent: Option<Decimal>,
    pub status: PositionStatus,
    pub created_at: DateTime<Utc>,
}

impl Position {
    /// Cost basis of the position.
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.entry_price
    }

    /// Market value at the current price, if one is known.
    pub fn market_value(&self) -> Option<Decimal> {
        self.current_price.map(|price| self.quantity * price)
    }
}
