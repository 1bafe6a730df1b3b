use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::summary::round_degrees;
use crate::model::ForecastDay;

/// One card of the forecast strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastCard {
    /// Day of month and weekday, e.g. `15 Mon`.
    pub day_label: String,
    pub icon_url: String,
    pub icon_alt: String,
    /// e.g. `31° / 24°`.
    pub temperatures: String,
}

impl ForecastCard {
    pub fn from_day(day: &ForecastDay) -> Self {
        let day_label = match NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") {
            Ok(date) => format!("{} {}", date.day(), date.format("%a")),
            Err(_) => day.date.clone(),
        };

        Self {
            day_label,
            icon_url: day.condition_icon_url.clone(),
            icon_alt: day.condition_text.clone(),
            temperatures: format!(
                "{}° / {}°",
                round_degrees(day.max_temp_c),
                round_degrees(day.min_temp_c)
            ),
        }
    }
}

/// One card per day, in provider order, nothing skipped.
pub fn build_forecast_cards(days: &[ForecastDay]) -> Vec<ForecastCard> {
    days.iter().map(ForecastCard::from_day).collect()
}
