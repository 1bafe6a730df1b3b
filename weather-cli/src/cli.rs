use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_core::{
    Config, ForecastRange, ProxyClient,
    view::{LoadOutcome, MemorySurface, ViewController},
};

use crate::terminal::{self, TerminalChart};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard")]
pub struct Cli {
    /// Proxy endpoint to query, e.g. "http://127.0.0.1:3000". Defaults to the configured one.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the provider API key, proxy endpoint and city cards.
    Configure,

    /// Show current conditions, the forecast strip and the temperature chart for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Chart range: day, week, 10days or 14days.
        #[arg(long, default_value = "day")]
        range: ForecastRange,
    },

    /// Show the current temperature of every configured city card.
    Cards,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(endpoint) = self.endpoint {
            config.dashboard.endpoint = endpoint;
        }

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, range } => {
                let city = city.unwrap_or_else(|| config.dashboard.default_city.clone());
                show(&config, &city, range).await
            }
            Command::Cards => cards(&config).await,
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("WeatherAPI.com API key (leave empty to keep the current one):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    config.dashboard.endpoint = Text::new("Proxy endpoint:")
        .with_default(&config.dashboard.endpoint)
        .prompt()?;

    let cards = Text::new("City cards (comma separated):")
        .with_default(&config.dashboard.cards.join(", "))
        .prompt()?;
    config.dashboard.cards =
        cards.split(',').map(str::trim).filter(|c| !c.is_empty()).map(String::from).collect();

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(config: &Config, city: &str, range: ForecastRange) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        bail!("City is required");
    }

    debug!(%city, %range, endpoint = %config.dashboard.endpoint, "loading dashboard");

    let mut controller = ViewController::new(
        proxy_client(config)?,
        MemorySurface::default(),
        TerminalChart::default(),
        config.dashboard.clone().into(),
    );

    // No city is loaded yet, so this only records the range for the load below.
    controller.select_range(range).await;

    match controller.load_city(city).await {
        LoadOutcome::Rendered => {
            terminal::print_dashboard(controller.surface(), controller.chart().backend(), range);
            Ok(())
        }
        LoadOutcome::Failed(err) => Err(err.into()),
        LoadOutcome::Stale => bail!("Weather response for '{city}' arrived out of order"),
    }
}

async fn cards(config: &Config) -> anyhow::Result<()> {
    if config.dashboard.cards.is_empty() {
        bail!("No city cards configured.\nHint: run `weather configure` to add some.");
    }

    debug!(
        cards = ?config.dashboard.cards,
        endpoint = %config.dashboard.endpoint,
        "loading city cards"
    );

    let mut controller = ViewController::new(
        proxy_client(config)?,
        MemorySurface::with_cards(config.dashboard.cards.iter().cloned()),
        TerminalChart::default(),
        config.dashboard.clone().into(),
    );

    controller.load_static_cards().await;
    terminal::print_cards(controller.surface());

    Ok(())
}

fn proxy_client(config: &Config) -> anyhow::Result<ProxyClient> {
    ProxyClient::from_config(&config.dashboard)
        .with_context(|| format!("Failed to create client for {}", config.dashboard.endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_city_and_range() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris", "--range", "10days"])
            .expect("arguments should parse");

        match cli.command {
            Command::Show { city, range } => {
                assert_eq!(city.as_deref(), Some("Paris"));
                assert_eq!(range, ForecastRange::TenDays);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_defaults_to_day_range() {
        let cli = Cli::try_parse_from(["weather", "show"]).expect("arguments should parse");

        assert!(matches!(cli.command, Command::Show { city: None, range: ForecastRange::Day }));
    }

    #[test]
    fn unknown_range_is_rejected() {
        assert!(Cli::try_parse_from(["weather", "show", "Paris", "--range", "month"]).is_err());
    }

    #[test]
    fn endpoint_is_global() {
        let cli = Cli::try_parse_from(["weather", "cards", "--endpoint", "http://localhost:8080"])
            .expect("arguments should parse");

        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:8080"));
        assert!(matches!(cli.command, Command::Cards));
    }
}
