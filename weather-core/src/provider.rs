use crate::{Config, error::WeatherError, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod weatherapi;

/// Upstream forecast source used by the proxy endpoint.
///
/// Implementations return the provider's JSON untouched on success so it can be relayed verbatim.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, city: &str) -> Result<Value, WeatherError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for the weather provider.\n\
                 Hint: run `weather configure` or set the API_KEY environment variable."
        )
    })?;

    let provider = WeatherApiProvider::new(api_key.to_owned(), &config.provider)?;
    Ok(Box::new(provider))
}
