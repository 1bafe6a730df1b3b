//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider client used by the proxy endpoint
//! - The client of that endpoint and the shared domain models
//! - Chart data reduction and the view controller driving the dashboard regions
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod chart;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use chart::{ChartData, ForecastRange, reduce_for_chart};
pub use client::{ProxyClient, WeatherSource};
pub use config::{Config, DashboardConfig, ProviderConfig, ServerConfig};
pub use error::WeatherError;
pub use model::{ForecastDay, HourlyPoint, WeatherReport, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
