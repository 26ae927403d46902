use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::{ScenarioName, UnknownScenario};

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Scenario switch rejected; carries whatever the client sent.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<UnknownScenario> for AppError {
    fn from(e: UnknownScenario) -> Self {
        AppError::InvalidScenario(e.0)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidScenario(_) => {
                let body = Json(json!({
                    "success": false,
                    "error": "Invalid scenario",
                    "availableScenarios": ScenarioName::ALL,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::NotFound(msg) => {
                let status = StatusCode::NOT_FOUND;
                let body = Json(json!({
                    "error": msg,
                    "status": status.as_u16(),
                }));
                (status, body).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
