//! HTTP consumers of the mock server.
//!
//! [`DashboardClient`] reads the webhook API the way the dashboard does,
//! including its tolerance for odd payloads. [`ScenarioControl`] drives the
//! scenario endpoints from end-to-end tests.

pub mod poller;

pub use poller::{DashboardPoller, DashboardSnapshot};

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::ClientConfig;
use crate::types::{
    AccountData, Alert, Position, ScenarioName, ScenarioStatus, SetScenarioResponse, Trade,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to set scenario: {0}")]
    ScenarioRejected(String),
}

/// Upper bound on a single request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn http_client() -> Client {
    Client::builder()
        .user_agent("dashboard-mock/0.1")
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Read-only client for the webhook data endpoints.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    /// `base_url` is the webhook root, e.g. `http://localhost:5678/webhook`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, path: &str) -> Result<Value, ClientError> {
        let url = join_url(&self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        match self.fetch(path).await? {
            items @ Value::Array(_) => Ok(serde_json::from_value(items)?),
            _ => Ok(Vec::new()),
        }
    }

    /// First element of the account-data array. A bare object body is used
    /// as-is; an empty array or any other body yields the all-zero snapshot.
    pub async fn account_data(&self) -> Result<AccountData, ClientError> {
        let account = match self.fetch("account-data").await? {
            Value::Array(items) => items.into_iter().next(),
            object @ Value::Object(_) => Some(object),
            _ => None,
        };

        match account {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(AccountData::default()),
        }
    }

    pub async fn positions(&self) -> Result<Vec<Position>, ClientError> {
        self.fetch_list("positions").await
    }

    pub async fn trades(&self) -> Result<Vec<Trade>, ClientError> {
        self.fetch_list("trades").await
    }

    pub async fn alerts(&self) -> Result<Vec<Alert>, ClientError> {
        self.fetch_list("alerts").await
    }
}

/// Switches and inspects the server's active scenario.
#[derive(Debug, Clone)]
pub struct ScenarioControl {
    client: Client,
    server_url: String,
}

impl ScenarioControl {
    /// `server_url` is the mock server root, e.g. `http://localhost:5679`.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            server_url: server_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.mock_server_url.clone())
    }

    /// Activate `name` on the server. A rejection carries the response text.
    pub async fn set_scenario(&self, name: &str) -> Result<ScenarioName, ClientError> {
        let url = join_url(&self.server_url, "api/scenario");
        let response = self
            .client
            .post(&url)
            .json(&json!({ "scenario": name }))
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ScenarioRejected(body));
        }

        let result: SetScenarioResponse = response.json().await?;
        debug!("Scenario set to {}", result.current_scenario);
        Ok(result.current_scenario)
    }

    async fn status(&self) -> Result<ScenarioStatus, ClientError> {
        let url = join_url(&self.server_url, "api/scenario");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(response.json().await?)
    }

    pub async fn current_scenario(&self) -> Result<ScenarioName, ClientError> {
        Ok(self.status().await?.current_scenario)
    }

    pub async fn available_scenarios(&self) -> Result<Vec<ScenarioName>, ClientError> {
        Ok(self.status().await?.available_scenarios)
    }
}
