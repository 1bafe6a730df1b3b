use chrono::NaiveDateTime;

use crate::model::WeatherSnapshot;

/// Text for every field of the summary panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub temperature: String,
    pub city: String,
    pub country: String,
    pub humidity: String,
    pub wind: String,
    pub precip: String,
    /// `HH:MM`, empty when the provider's local time can't be parsed.
    pub time: String,
    /// e.g. `Mon Jan 15 2024`, empty when the provider's local time can't be parsed.
    pub date: String,
}

impl SummaryView {
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        let current = &snapshot.current;
        let local = NaiveDateTime::parse_from_str(&snapshot.location.local_time, "%Y-%m-%d %H:%M")
            .ok();

        Self {
            temperature: format_temperature(current.temp_c),
            city: snapshot.location.name.clone(),
            country: snapshot.location.country.clone(),
            humidity: format!("{}%", current.humidity_pct),
            wind: format!("{} km/h", current.wind_kph),
            precip: format!("{} mm", current.precip_mm),
            time: local.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            date: local.map(|t| t.format("%a %b %d %Y").to_string()).unwrap_or_default(),
        }
    }
}

/// Whole degrees with a `°C` suffix.
pub fn format_temperature(temp_c: f64) -> String {
    format!("{}°C", round_degrees(temp_c))
}

/// Rounds half up, so -2.5 becomes -2 like the browser dashboard does.
pub(crate) fn round_degrees(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, Location};

    fn snapshot(local_time: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location: Location {
                name: "Mumbai".into(),
                country: "India".into(),
                local_time: local_time.into(),
            },
            current: CurrentConditions {
                temp_c: 31.6,
                humidity_pct: 62,
                wind_kph: 14.4,
                precip_mm: 0.0,
                condition_text: "Haze".into(),
            },
        }
    }

    #[test]
    fn formats_every_field() {
        let view = SummaryView::from_snapshot(&snapshot("2024-01-05 14:30"));

        assert_eq!(view.temperature, "32°C");
        assert_eq!(view.city, "Mumbai");
        assert_eq!(view.country, "India");
        assert_eq!(view.humidity, "62%");
        assert_eq!(view.wind, "14.4 km/h");
        assert_eq!(view.precip, "0 mm");
        assert_eq!(view.time, "14:30");
        assert_eq!(view.date, "Fri Jan 05 2024");
    }

    #[test]
    fn accepts_unpadded_hours() {
        let view = SummaryView::from_snapshot(&snapshot("2024-01-15 9:05"));
        assert_eq!(view.time, "09:05");
    }

    #[test]
    fn bad_local_time_leaves_clock_empty() {
        let view = SummaryView::from_snapshot(&snapshot("soon"));

        assert!(view.time.is_empty());
        assert!(view.date.is_empty());
        assert_eq!(view.temperature, "32°C");
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_degrees(21.5), 22);
        assert_eq!(round_degrees(-2.5), -2);
        assert_eq!(round_degrees(-0.4), 0);
    }
}
