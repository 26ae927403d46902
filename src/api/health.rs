use axum::{extract::State, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::types::ScenarioName;
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    scenario: ScenarioName,
    timestamp: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        scenario: state.scenarios.current(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
