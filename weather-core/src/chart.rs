//! Reduction of a forecast into chart points for the selected range.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{error::WeatherError, model::ForecastDay};

/// Granularity of the temperature chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForecastRange {
    /// Hourly points of today.
    #[default]
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "10days")]
    TenDays,
    #[serde(rename = "14days")]
    FourteenDays,
}

impl ForecastRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastRange::Day => "day",
            ForecastRange::Week => "week",
            ForecastRange::TenDays => "10days",
            ForecastRange::FourteenDays => "14days",
        }
    }

    pub const fn all() -> &'static [ForecastRange] {
        &[
            ForecastRange::Day,
            ForecastRange::Week,
            ForecastRange::TenDays,
            ForecastRange::FourteenDays,
        ]
    }

    /// Number of forecast days charted, `None` for the hourly view.
    pub fn day_count(&self) -> Option<usize> {
        match self {
            ForecastRange::Day => None,
            ForecastRange::Week => Some(7),
            ForecastRange::TenDays => Some(10),
            ForecastRange::FourteenDays => Some(14),
        }
    }
}

impl fmt::Display for ForecastRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastRange {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "day" => Ok(ForecastRange::Day),
            "week" => Ok(ForecastRange::Week),
            "10days" => Ok(ForecastRange::TenDays),
            "14days" => Ok(ForecastRange::FourteenDays),
            _ => Err(anyhow::anyhow!(
                "Unknown range '{value}'. Supported ranges: day, week, 10days, 14days."
            )),
        }
    }
}

/// Labels and values of one chart series; both always have the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Reduce `days` to the points plotted for `range`.
///
/// `Day` plots the hourly temperatures of `days[0]`. Longer ranges plot the daily average of the
/// first 7/10/14 days, or of every available day when the provider returned fewer.
pub fn reduce_for_chart(
    days: &[ForecastDay],
    range: ForecastRange,
) -> Result<ChartData, WeatherError> {
    match range.day_count() {
        None => {
            let today = days
                .first()
                .ok_or_else(|| WeatherError::data_shape("forecast contains no days"))?;
            let hourly = today.hourly.as_ref().ok_or_else(|| {
                WeatherError::data_shape(format!("no hourly data for {}", today.date))
            })?;

            Ok(ChartData {
                labels: hourly.iter().map(|h| h.time_of_day().to_string()).collect(),
                values: hourly.iter().map(|h| h.temp_c).collect(),
            })
        }
        Some(count) => {
            let window = &days[..count.min(days.len())];

            Ok(ChartData {
                labels: window.iter().map(|d| d.date.clone()).collect(),
                values: window.iter().map(|d| d.avg_temp_c).collect(),
            })
        }
    }
}
