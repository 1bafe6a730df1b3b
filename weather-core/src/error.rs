use thiserror::Error;

/// Fallback shown when a failed response carries no usable message.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to fetch weather data";

/// Failure taxonomy shared by the provider client, the proxy client and the view controller.
///
/// `Transport` and `Provider` display their message verbatim so it can be shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The request never produced a usable response (network, timeout, unexpected status).
    #[error("{0}")]
    Transport(String),

    /// The upstream service answered but reported a semantic error, e.g. an unknown city.
    #[error("{0}")]
    Provider(String),

    /// The response was missing fields the caller needs.
    #[error("Unexpected weather data: {0}")]
    DataShape(String),
}

impl WeatherError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn data_shape(msg: impl Into<String>) -> Self {
        Self::DataShape(msg.into())
    }

    pub fn is_data_shape(&self) -> bool {
        matches!(self, Self::DataShape(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport("Weather request timed out".to_string())
        } else if err.is_decode() {
            Self::DataShape(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
