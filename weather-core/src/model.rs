use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WeatherError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Provider local time, e.g. `2024-01-15 14:30`.
    pub local_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub precip_mm: f64,
    pub condition_text: String,
}

/// Current conditions for one city, produced fresh on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// Provider timestamp, e.g. `2024-01-15 13:00`.
    pub time: String,
    pub temp_c: f64,
}

impl HourlyPoint {
    /// The `HH:MM` part of the timestamp.
    pub fn time_of_day(&self) -> &str {
        self.time.split_once(' ').map_or(self.time.as_str(), |(_, t)| t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// ISO date, e.g. `2024-01-15`.
    pub date: String,
    pub condition_icon_url: String,
    pub condition_text: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_temp_c: f64,
    /// `None` when the provider omitted the hourly breakdown.
    pub hourly: Option<Vec<HourlyPoint>>,
}

/// Everything one successful fetch yields. `days[0]` is today; order is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub days: Vec<ForecastDay>,
}

impl WeatherReport {
    /// Map a provider forecast payload onto the domain model.
    pub fn from_payload(payload: Value) -> Result<Self, WeatherError> {
        let parsed: WaPayload = serde_json::from_value(payload)
            .map_err(|e| WeatherError::data_shape(format!("forecast payload: {e}")))?;

        Ok(parsed.into())
    }
}

/// Extract the message of an error body.
///
/// Accepts both the proxy shape `{"error": "..."}` and the provider shape
/// `{"error": {"message": "..."}}`.
pub fn error_message(body: &Value) -> Option<String> {
    let msg = match body.get("error")? {
        Value::String(msg) => msg.as_str(),
        Value::Object(obj) => obj.get("message").and_then(Value::as_str)?,
        _ => return None,
    };
    Some(msg.to_owned()).filter(|m| !m.is_empty())
}

/// Whether `body` carries an `error` field that marks it as a failure.
///
/// `null`, `false` and `""` do not count.
pub fn has_error(body: &Value) -> bool {
    match body.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(msg)) => !msg.is_empty(),
        Some(_) => true,
    }
}

/// Provider icons come protocol-relative (`//cdn.weatherapi.com/...`).
fn absolute_icon_url(icon: &str) -> String {
    if icon.starts_with("//") { format!("https:{icon}") } else { icon.to_string() }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    #[serde(default)]
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    precip_mm: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    avgtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    time: String,
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    #[serde(default)]
    hour: Option<Vec<WaHour>>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    #[serde(default)]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaPayload {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

impl From<WaPayload> for WeatherReport {
    fn from(p: WaPayload) -> Self {
        let snapshot = WeatherSnapshot {
            location: Location {
                name: p.location.name,
                country: p.location.country,
                local_time: p.location.localtime,
            },
            current: CurrentConditions {
                temp_c: p.current.temp_c,
                humidity_pct: p.current.humidity,
                wind_kph: p.current.wind_kph,
                precip_mm: p.current.precip_mm,
                condition_text: p.current.condition.text,
            },
        };

        let days = p
            .forecast
            .forecastday
            .into_iter()
            .map(|d| ForecastDay {
                date: d.date,
                condition_icon_url: absolute_icon_url(&d.day.condition.icon),
                condition_text: d.day.condition.text,
                max_temp_c: d.day.maxtemp_c,
                min_temp_c: d.day.mintemp_c,
                avg_temp_c: d.day.avgtemp_c,
                hourly: d.hour.map(|hours| {
                    hours
                        .into_iter()
                        .map(|h| HourlyPoint { time: h.time, temp_c: h.temp_c })
                        .collect()
                }),
            })
            .collect();

        Self { snapshot, days }
    }
}
