//! Terminal rendering of the dashboard page.

use weather_core::{
    ForecastRange,
    view::{ChartBackend, ChartSpec, ElementId, MemorySurface, RenderSurface, SENTINEL},
};

const BAR_WIDTH: usize = 40;

/// Chart backend that keeps the live chart so it can be drawn as text bars.
#[derive(Debug, Default)]
pub struct TerminalChart {
    live: Option<(u32, ChartSpec)>,
    next_id: u32,
}

impl TerminalChart {
    pub fn current(&self) -> Option<&ChartSpec> {
        self.live.as_ref().map(|(_, spec)| spec)
    }
}

impl ChartBackend for TerminalChart {
    type Handle = u32;

    fn create(&mut self, spec: &ChartSpec) -> anyhow::Result<u32> {
        self.next_id += 1;
        self.live = Some((self.next_id, spec.clone()));
        Ok(self.next_id)
    }

    fn destroy(&mut self, handle: u32) {
        if self.live.as_ref().is_some_and(|(id, _)| *id == handle) {
            self.live = None;
        }
    }
}

pub fn print_dashboard(page: &MemorySurface, chart: &TerminalChart, range: ForecastRange) {
    let field = |id| page.text_or_empty(id);

    println!(
        "{}, {}    {} {}",
        field(ElementId::CityName),
        field(ElementId::CountryName),
        field(ElementId::Date),
        field(ElementId::Time)
    );
    println!("  Temperature    {}", field(ElementId::Temperature));
    println!("  Humidity       {}", field(ElementId::Humidity));
    println!("  Wind           {}", field(ElementId::Wind));
    println!("  Precipitation  {}", field(ElementId::Precip));
    println!();

    println!("Forecast for {}", field(ElementId::ForecastCity));
    for card in page.forecast_cards() {
        println!("  {:<8} {:<28} {}", card.day_label, card.icon_alt, card.temperatures);
    }
    println!();

    match chart.current() {
        Some(spec) => {
            println!("Temperature ({range})");
            for line in chart_lines(spec) {
                println!("  {line}");
            }
        }
        None => println!("Temperature chart unavailable for range {range}"),
    }
}

pub fn print_cards(page: &MemorySurface) {
    for i in 0..page.card_count() {
        let temp = page.text(ElementId::CardTemperature(i));
        println!(
            "{:<20} {}",
            page.text_or_empty(ElementId::CardCity(i)),
            temp.as_deref().unwrap_or(SENTINEL)
        );
    }
}

/// One bar per point, scaled between the series' minimum and maximum.
fn chart_lines(spec: &ChartSpec) -> Vec<String> {
    let Some(values) = spec.datasets.first().map(|d| d.data.as_slice()) else {
        return Vec::new();
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);
    let label_width = spec.labels.iter().map(String::len).max().unwrap_or(0);

    spec.labels
        .iter()
        .zip(values)
        .map(|(label, value)| {
            let filled = 1 + ((value - min) / span * (BAR_WIDTH - 1) as f64).round() as usize;
            format!("{label:>label_width$} {} {value:.1}°C", "█".repeat(filled))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::view::Dataset;

    fn spec(labels: &[&str], data: &[f64]) -> ChartSpec {
        ChartSpec {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            datasets: vec![Dataset { label: "Temperature (°C)".into(), data: data.to_vec() }],
        }
    }

    #[test]
    fn destroy_only_drops_the_matching_chart() {
        let mut chart = TerminalChart::default();
        let first = chart.create(&spec(&["a"], &[1.0])).expect("create");
        let _second = chart.create(&spec(&["b"], &[2.0])).expect("create");

        chart.destroy(first);
        assert_eq!(chart.current().map(|s| s.labels[0].as_str()), Some("b"));
    }

    #[test]
    fn bars_scale_between_min_and_max() {
        let lines = chart_lines(&spec(&["00:00", "12:00"], &[10.0, 20.0]));

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00:00 █ 10.0°C"));
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
    }

    #[test]
    fn flat_series_still_draws() {
        let lines = chart_lines(&spec(&["d1", "d2"], &[5.0, 5.0]));
        assert!(lines.iter().all(|l| l.contains('█')));
    }
}
