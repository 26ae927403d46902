//! Polls the webhook API like the dashboard does and logs what it would show.

use dashboard_mock::client::{DashboardClient, DashboardPoller, DashboardSnapshot};
use dashboard_mock::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn log_snapshot(snapshot: &DashboardSnapshot) {
    let overview = snapshot.overview();
    let risk = snapshot.risk();
    let trades = snapshot.trade_summary();

    info!(
        "Equity {} | buying power {} | daily P&L {} ({}%) {:?} | margin {}% {:?}",
        overview.equity,
        overview.buying_power,
        overview.daily_pnl,
        overview.daily_pnl_percent.round_dp(2),
        overview.trend,
        overview.margin_health,
        overview.margin_status,
    );
    info!(
        "Risk {} {:?} | positions {}/{} worth {} | loss {} of {} limit ({}% used)",
        risk.risk_level.round_dp(1),
        risk.risk_label,
        risk.open_positions,
        risk.max_positions,
        snapshot.market_exposure().round_dp(2),
        risk.daily_loss,
        risk.daily_loss_limit,
        risk.loss_used_percent().round_dp(1),
    );
    info!(
        "Trades {} | wins {} ({}%) | total P&L {} | alerts {}",
        trades.total_trades,
        trades.wins,
        trades.win_rate.round_dp(1),
        trades.total_pnl,
        snapshot.alerts.len(),
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_mock=info,dashboard_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let client = DashboardClient::from_config(&config.client);
    let poller = DashboardPoller::spawn(client, config.client.update_interval);
    let mut updates = poller.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                log_snapshot(&snapshot);
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Ctrl+C received, stopping");
                break;
            }
        }
    }

    poller.stop().await;
    Ok(())
}
