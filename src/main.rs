use dashboard_mock::config::Config;
use dashboard_mock::types::ScenarioName;
use dashboard_mock::{app, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_mock=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr = config.bind_address();
    let state = AppState::new(config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local = listener.local_addr()?;
    info!("Dashboard mock server listening on {}", local);
    log_endpoints(local.port(), state.scenarios.current());

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard mock server shut down");
    Ok(())
}

fn log_endpoints(port: u16, current: ScenarioName) {
    let base = format!("http://localhost:{}", port);
    info!("Endpoints:");
    info!("  GET  {}/health", base);
    info!("  GET  {}/api/scenario", base);
    info!("  POST {}/api/scenario", base);
    info!("  GET  {}/webhook/account-data", base);
    info!("  GET  {}/webhook/positions", base);
    info!("  GET  {}/webhook/trades", base);
    info!("  GET  {}/webhook/alerts", base);

    let names: Vec<&str> = ScenarioName::ALL.iter().map(|s| s.as_str()).collect();
    info!("Available scenarios: {}", names.join(", "));
    info!("Current scenario: {}", current);
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
