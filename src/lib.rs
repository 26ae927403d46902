//! Dashboard Mock - scenario-driven stand-in for the trading dashboard webhook API

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod scenarios;
pub mod state;
pub mod summary;
pub mod types;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use scenarios::ScenarioRegistry;
use state::ScenarioState;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scenarios: Arc<ScenarioState>,
}

impl AppState {
    /// Build fixtures and start on the configured default scenario.
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(ScenarioRegistry::new());
        let scenarios = Arc::new(ScenarioState::with_initial(
            registry,
            config.default_scenario,
        ));

        Self {
            config: Arc::new(config),
            scenarios,
        }
    }
}

/// The full HTTP application: routes, 404 fallback, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .fallback(api::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
