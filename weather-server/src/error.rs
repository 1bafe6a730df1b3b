//! API error handling
//!
//! Every failure renders as `{"error": "..."}`. Upstream failures get a generic message;
//! their detail only goes to the log.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use weather_core::WeatherError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("City is required")]
    MissingCity,

    /// The provider rejected the lookup, e.g. an unknown city.
    #[error("{0}")]
    Provider(String),

    #[error("Failed to fetch weather")]
    Upstream(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCity | Self::Provider(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::Provider(msg) => Self::Provider(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upstream(detail) = &self {
            tracing::error!(%detail, "weather provider request failed");
        }

        let body = ErrorResponse { error: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}
