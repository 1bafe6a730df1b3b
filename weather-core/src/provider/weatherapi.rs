use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{config::ProviderConfig, error::WeatherError, model::error_message};

use super::WeatherProvider;

/// WeatherAPI.com forecast client.
#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    forecast_days: u8,
    http: Client,
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("base_url", &self.base_url)
            .field("forecast_days", &self.forecast_days)
            .finish_non_exhaustive()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: String, config: &ProviderConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forecast_days: config.forecast_days,
            http,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Value, WeatherError> {
        let url = format!("{}/forecast.json", self.base_url);
        let days = self.forecast_days.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "WeatherAPI request failed");
                WeatherError::from(e)
            })?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "WeatherAPI responded");

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            WeatherError::data_shape(format!(
                "WeatherAPI returned non-JSON body ({e}): {}",
                truncate_body(&body)
            ))
        })?;

        // WeatherAPI reports unknown locations and bad keys as `{"error": {"message": ..}}`,
        // usually with a 4xx status.
        if let Some(msg) = error_message(&parsed) {
            return Err(WeatherError::Provider(msg));
        }

        if !status.is_success() {
            return Err(WeatherError::transport(format!(
                "WeatherAPI forecast request failed with status {status}"
            )));
        }

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
