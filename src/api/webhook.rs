//! Webhook data API
//!
//! Mirrors the read endpoints of the real backend. Every response is the
//! active scenario's data verbatim:
//!
//! - GET /webhook/account-data - `[AccountData]`, a one-element array
//! - GET /webhook/positions    - Open positions
//! - GET /webhook/trades       - Closed trades
//! - GET /webhook/alerts       - System alerts

use axum::{extract::State, routing::get, Json, Router};

use crate::types::{AccountData, Alert, Position, Trade};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/account-data", get(account_data))
        .route("/positions", get(positions))
        .route("/trades", get(trades))
        .route("/alerts", get(alerts))
}

/// The backend wraps the account snapshot in an array; clients rely on it.
async fn account_data(State(state): State<AppState>) -> Json<[AccountData; 1]> {
    Json([state.scenarios.snapshot().account_data.clone()])
}

async fn positions(State(state): State<AppState>) -> Json<Vec<Position>> {
    Json(state.scenarios.snapshot().positions.clone())
}

async fn trades(State(state): State<AppState>) -> Json<Vec<Trade>> {
    Json(state.scenarios.snapshot().trades.clone())
}

async fn alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.scenarios.snapshot().alerts.clone())
}
