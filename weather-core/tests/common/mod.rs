//! Shared fixtures for the weather-core integration tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use weather_core::WeatherReport;

/// A WeatherAPI-shaped forecast payload with `days` days of `hours` hourly points each.
pub fn forecast_payload(city: &str, temp_c: f64, days: usize, hours: usize) -> Value {
    let forecastday: Vec<Value> = (0..days)
        .map(|d| {
            let date = format!("2024-01-{:02}", d + 15);
            let hour: Vec<Value> = (0..hours)
                .map(|h| json!({ "time": format!("{date} {h:02}:00"), "temp_c": 20.0 + h as f64 / 2.0 }))
                .collect();

            json!({
                "date": date,
                "day": {
                    "maxtemp_c": 32.4,
                    "mintemp_c": 21.6,
                    "avgtemp_c": 26.0 + d as f64,
                    "condition": {
                        "text": "Sunny",
                        "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png"
                    }
                },
                "hour": hour
            })
        })
        .collect();

    json!({
        "location": {
            "name": city,
            "country": "Testland",
            "localtime": "2024-01-15 14:30"
        },
        "current": {
            "temp_c": temp_c,
            "humidity": 62,
            "wind_kph": 14.4,
            "precip_mm": 0.1,
            "condition": { "text": "Haze", "icon": "//cdn.weatherapi.com/weather/64x64/day/143.png" }
        },
        "forecast": { "forecastday": forecastday }
    })
}

pub fn report(city: &str, temp_c: f64, days: usize, hours: usize) -> WeatherReport {
    WeatherReport::from_payload(forecast_payload(city, temp_c, days, hours))
        .expect("fixture payload should map")
}
