//! Client side of the `/weather` proxy endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::DashboardConfig,
    error::{GENERIC_FETCH_FAILURE, WeatherError},
    model::{WeatherReport, error_message, has_error},
};

/// Where the dashboard gets its data from.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

/// Talks to the proxy endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    endpoint: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { endpoint: endpoint.into().trim_end_matches('/').to_string(), http })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, WeatherError> {
        Self::new(config.endpoint.clone(), Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl WeatherSource for ProxyClient {
    #[instrument(skip(self))]
    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let res = self
            .http
            .get(format!("{}/weather", self.endpoint))
            .query(&[("city", city)])
            .send()
            .await?;

        let status = res.status();
        debug!(%status, "proxy responded");

        if !status.is_success() {
            // The body may not even be JSON (e.g. a gateway error page).
            let body: Option<Value> = res.json().await.ok();
            return Err(match body.as_ref().and_then(error_message) {
                Some(msg) => WeatherError::Provider(msg),
                None => WeatherError::transport(GENERIC_FETCH_FAILURE),
            });
        }

        let body: Value = res.json().await?;

        if has_error(&body) {
            let msg = error_message(&body).unwrap_or_else(|| GENERIC_FETCH_FAILURE.to_string());
            return Err(WeatherError::Provider(msg));
        }

        WeatherReport::from_payload(body)
    }
}
