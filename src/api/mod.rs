pub mod health;
pub mod scenario;
pub mod webhook;

use axum::extract::OriginalUri;
use axum::Router;

use crate::error::AppError;
use crate::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(scenario::router())
        .nest("/webhook", webhook::router())
}

/// Fallback for unmatched paths.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
