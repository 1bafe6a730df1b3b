use std::sync::Arc;

use weather_core::WeatherProvider;

/// Shared application state available to all route handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}
