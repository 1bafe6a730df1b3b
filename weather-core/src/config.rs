use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable holding the provider credential, takes precedence over the file.
pub const API_KEY_ENV: &str = "API_KEY";
/// Environment variable overriding the server port.
pub const PORT_ENV: &str = "PORT";

/// Upstream weather provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Days requested from the provider; covers the longest chart range.
    pub forecast_days: u8,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weatherapi.com/v1".to_string(),
            forecast_days: 14,
            timeout_secs: 10,
        }
    }
}

/// Proxy server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every path that is not an API route.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000, static_dir: PathBuf::from("public") }
    }
}

/// Dashboard (client side) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the proxy endpoint.
    pub endpoint: String,
    pub default_city: String,
    /// Cities shown as static cards.
    pub cards: Vec<String>,
    pub timeout_secs: u64,
    /// Horizontal scroll step of the forecast strip slider.
    pub slide_offset: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000".to_string(),
            default_city: "Mumbai".to_string(),
            cards: ["Delhi", "London", "New York", "Tokyo"].map(String::from).to_vec(),
            timeout_secs: 10,
            slide_offset: 300,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [server]
/// port = 3000
///
/// [dashboard]
/// cards = ["Delhi", "London"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Provider credential, held by the server only.
    pub api_key: Option<String>,
    pub provider: ProviderConfig,
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Load from disk, then apply environment overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Apply `API_KEY` / `PORT` overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV} must be a port number, got '{port}'"))?;
        }

        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the provider API key, if present and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_dashboard() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.provider.forecast_days, 14);
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.dashboard.default_city, "Mumbai");
        assert_eq!(cfg.dashboard.slide_offset, 300);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn partial_toml_keeps_section_defaults() {
        let cfg = Config::from_toml(
            r#"
            api_key = "KEY"

            [dashboard]
            cards = ["Paris"]
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.api_key(), Some("KEY"));
        assert_eq!(cfg.dashboard.cards, vec!["Paris".to_string()]);
        assert_eq!(cfg.dashboard.endpoint, "http://127.0.0.1:3000");
        assert_eq!(cfg.server, ServerConfig::default());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn env_overrides_key_and_port() {
        let env: HashMap<&str, &str> = HashMap::from([(API_KEY_ENV, "ENV_KEY"), (PORT_ENV, "8080")]);
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).expect("overrides should apply");

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_env(|k| (k == PORT_ENV).then(|| "not-a-port".to_string()))
            .unwrap_err();

        assert!(err.to_string().contains("must be a port number"));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.dashboard.cards = vec!["Oslo".into()];

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        assert_eq!(Config::from_toml(&text).expect("parse"), cfg);
    }
}
