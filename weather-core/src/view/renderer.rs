use anyhow::{Result, ensure};
use serde::Serialize;

use crate::chart::ChartData;

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// What the charting library is asked to draw. Styling is left to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    pub fn temperature(data: ChartData) -> Self {
        Self {
            labels: data.labels,
            datasets: vec![Dataset { label: "Temperature (°C)".to_string(), data: data.values }],
        }
    }
}

/// The charting library: builds chart instances and tears them down.
pub trait ChartBackend {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> Result<Self::Handle>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the single live chart instance.
pub struct ChartRenderer<B: ChartBackend> {
    backend: B,
    live: Option<B::Handle>,
}

impl<B: ChartBackend> ChartRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, live: None }
    }

    /// Replace the current chart. The previous instance is destroyed before the new one is built.
    pub fn render(&mut self, data: ChartData) -> Result<()> {
        ensure!(
            data.labels.len() == data.values.len(),
            "chart labels ({}) and values ({}) differ in length",
            data.labels.len(),
            data.values.len()
        );

        if let Some(previous) = self.live.take() {
            self.backend.destroy(previous);
        }

        let handle = self.backend.create(&ChartSpec::temperature(data))?;
        self.live = Some(handle);
        Ok(())
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingBackend {
        next: u32,
        live: Vec<u32>,
        fail: bool,
    }

    impl ChartBackend for CountingBackend {
        type Handle = u32;

        fn create(&mut self, _spec: &ChartSpec) -> Result<u32> {
            ensure!(!self.fail, "canvas unavailable");
            self.next += 1;
            self.live.push(self.next);
            Ok(self.next)
        }

        fn destroy(&mut self, handle: u32) {
            self.live.retain(|h| *h != handle);
        }
    }

    fn data(n: usize) -> ChartData {
        ChartData {
            labels: (0..n).map(|i| i.to_string()).collect(),
            values: (0..n).map(|i| i as f64).collect(),
        }
    }

    #[test]
    fn second_render_disposes_the_first() {
        let mut renderer = ChartRenderer::new(CountingBackend::default());

        renderer.render(data(3)).expect("first render");
        renderer.render(data(5)).expect("second render");

        assert_eq!(renderer.backend().live, vec![2]);
        assert!(renderer.is_live());
    }

    #[test]
    fn mismatched_lengths_are_rejected_without_touching_the_chart() {
        let mut renderer = ChartRenderer::new(CountingBackend::default());
        renderer.render(data(2)).expect("render");

        let bad = ChartData { labels: vec!["a".into()], values: vec![] };
        assert!(renderer.render(bad).is_err());
        assert_eq!(renderer.backend().live, vec![1]);
    }

    #[test]
    fn failed_create_leaves_no_live_chart() {
        let mut renderer = ChartRenderer::new(CountingBackend::default());
        renderer.render(data(2)).expect("render");
        renderer.backend.fail = true;

        assert!(renderer.render(data(2)).is_err());
        assert!(!renderer.is_live());
        assert!(renderer.backend().live.is_empty());
    }
}
