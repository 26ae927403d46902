//! Periodic refresh of the dashboard data.
//!
//! One task per resource, each on its own interval, all publishing into a
//! single watch channel. Account data, positions and alerts refresh every
//! period; trades every second period.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{ClientError, DashboardClient};
use crate::summary::{AccountOverview, RiskMetrics, TradeSummary};
use crate::types::{AccountData, Alert, Position, PositionStatus, Trade};

/// Shortest accepted refresh period.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Latest values seen by the poller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub account: AccountData,
    pub positions: Vec<Position>,
    pub trades: Vec<Trade>,
    pub alerts: Vec<Alert>,
    /// Time of the most recent successful refresh of any resource.
    pub last_update: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn open_positions(&self) -> usize {
        self.positions
            .iter()
            .filter(|p| p.status == PositionStatus::Open)
            .count()
    }

    /// Value of the open positions at their mark price, or at cost when the
    /// backend has no mark.
    pub fn market_exposure(&self) -> Decimal {
        self.positions
            .iter()
            .filter(|p| p.status == PositionStatus::Open)
            .map(|p| p.market_value().unwrap_or_else(|| p.cost_basis()))
            .sum()
    }

    pub fn overview(&self) -> AccountOverview {
        AccountOverview::from(&self.account)
    }

    pub fn risk(&self) -> RiskMetrics {
        RiskMetrics::compute(&self.account, self.open_positions())
    }

    pub fn trade_summary(&self) -> TradeSummary {
        TradeSummary::from_trades(&self.trades)
    }
}

#[derive(Debug, Clone, Copy)]
enum Resource {
    Account,
    Positions,
    Trades,
    Alerts,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Account => "account data",
            Resource::Positions => "positions",
            Resource::Trades => "trades",
            Resource::Alerts => "alerts",
        };
        f.write_str(name)
    }
}

async fn refresh(
    client: &DashboardClient,
    resource: Resource,
    tx: &watch::Sender<DashboardSnapshot>,
) -> Result<(), ClientError> {
    match resource {
        Resource::Account => {
            let account = client.account_data().await?;
            tx.send_modify(|s| {
                s.account = account;
                s.last_update = Some(Utc::now());
            });
        }
        Resource::Positions => {
            let positions = client.positions().await?;
            tx.send_modify(|s| {
                s.positions = positions;
                s.last_update = Some(Utc::now());
            });
        }
        Resource::Trades => {
            let trades = client.trades().await?;
            tx.send_modify(|s| {
                s.trades = trades;
                s.last_update = Some(Utc::now());
            });
        }
        Resource::Alerts => {
            let alerts = client.alerts().await?;
            tx.send_modify(|s| {
                s.alerts = alerts;
                s.last_update = Some(Utc::now());
            });
        }
    }
    Ok(())
}

/// Background refresh of all dashboard resources.
///
/// Call [`stop`](Self::stop) to shut down cleanly. Dropping the poller aborts
/// any task still running.
pub struct DashboardPoller {
    snapshot_rx: watch::Receiver<DashboardSnapshot>,
    shutdown_tx: broadcast::Sender<()>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardPoller {
    /// Start polling. The first refresh of every resource happens immediately.
    /// A zero period is raised to [`MIN_PERIOD`].
    pub fn spawn(client: DashboardClient, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let (snapshot_tx, snapshot_rx) = watch::channel(DashboardSnapshot::default());
        let snapshot_tx = Arc::new(snapshot_tx);
        let (shutdown_tx, _) = broadcast::channel(1);

        let schedule = [
            (Resource::Account, period),
            (Resource::Positions, period),
            (Resource::Trades, period * 2),
            (Resource::Alerts, period),
        ];

        let tasks = schedule
            .into_iter()
            .map(|(resource, every)| {
                let client = client.clone();
                let tx = snapshot_tx.clone();
                let mut shutdown_rx = shutdown_tx.subscribe();

                tokio::spawn(async move {
                    let mut ticker = interval(every);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                    loop {
                        tokio::select! {
                            _ = ticker.tick() => {}
                            _ = shutdown_rx.recv() => break,
                        }

                        // Shutdown also cancels a request still in flight.
                        tokio::select! {
                            result = refresh(&client, resource, &tx) => {
                                if let Err(e) = result {
                                    warn!("Failed to refresh {}: {}", resource, e);
                                }
                            }
                            _ = shutdown_rx.recv() => break,
                        }
                    }
                    debug!("Poller for {} stopped", resource);
                })
            })
            .collect();

        info!(
            "Dashboard poller started against {} every {:?}",
            client.base_url(),
            period
        );

        Self {
            snapshot_rx,
            shutdown_tx,
            tasks,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn latest(&self) -> DashboardSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Signal every task and wait for it to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(());
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                warn!("Poller task ended abnormally: {}", e);
            }
        }
        info!("Dashboard poller stopped");
    }
}

impl Drop for DashboardPoller {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
