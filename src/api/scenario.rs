//! Scenario control API
//!
//! - GET  /api/scenario - Current scenario and the valid names
//! - POST /api/scenario - Switch scenario, body `{"scenario": "<name>"}`

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::types::{ScenarioStatus, SetScenarioRequest, SetScenarioResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/scenario", get(get_scenario).post(set_scenario))
}

/// GET /api/scenario
async fn get_scenario(State(state): State<AppState>) -> Json<ScenarioStatus> {
    Json(ScenarioStatus {
        current_scenario: state.scenarios.current(),
        available_scenarios: state.scenarios.available().to_vec(),
    })
}

/// POST /api/scenario
///
/// A body that is not `{"scenario": "<string>"}` is rejected exactly like an
/// unknown name.
async fn set_scenario(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetScenarioRequest>, JsonRejection>,
) -> Result<Json<SetScenarioResponse>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected scenario request body: {}", rejection.body_text());
            return Err(AppError::InvalidScenario(String::new()));
        }
    };

    let current_scenario = state.scenarios.set_by_name(&request.scenario)?;

    Ok(Json(SetScenarioResponse {
        success: true,
        current_scenario,
    }))
}
