use std::env;
use std::time::Duration;

use tracing::warn;

use crate::types::ScenarioName;

/// Settings for the dashboard client and the scenario-control harness.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the webhook API the dashboard reads from.
    pub api_base_url: String,
    /// Refresh period for account data, positions, and alerts. Trades refresh
    /// at twice this period.
    pub update_interval: Duration,
    /// Root URL of the mock server, used for scenario control.
    pub mock_server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5678/webhook".to_string(),
            update_interval: Duration::from_millis(5000),
            mock_server_url: "http://localhost:5679".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Scenario active at startup.
    pub default_scenario: ScenarioName,
    pub client: ClientConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5679,
            default_scenario: ScenarioName::default(),
            client: ClientConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_scenario = match env::var("DEFAULT_SCENARIO") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("DEFAULT_SCENARIO: {}, using {}", e, defaults.default_scenario);
                defaults.default_scenario
            }),
            Err(_) => defaults.default_scenario,
        };

        let update_interval = env::var("DASHBOARD_UPDATE_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.client.update_interval);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("MOCK_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            default_scenario,
            client: ClientConfig {
                api_base_url: env::var("DASHBOARD_API_BASE_URL")
                    .unwrap_or(defaults.client.api_base_url),
                update_interval,
                mock_server_url: env::var("MOCK_SERVER_URL")
                    .unwrap_or(defaults.client.mock_server_url),
            },
        }
    }

    /// `host:port` to bind the server on.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5679);
        assert_eq!(config.default_scenario, ScenarioName::Healthy);
        assert_eq!(config.bind_address(), "0.0.0.0:5679");
        assert_eq!(config.client.update_interval, Duration::from_secs(5));
        assert_eq!(config.client.api_base_url, "http://localhost:5678/webhook");
    }
}
