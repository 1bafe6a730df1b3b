//! Dashboard view layer: keeps the summary panel, forecast strip, chart and static city cards
//! in step with the selected city and chart range.
//!
//! The page itself is abstracted behind [`RenderSurface`] and the charting library behind
//! [`ChartBackend`], so the controller runs the same against a browser bridge, a terminal or
//! the in-memory surface used in tests.

mod controller;
mod memory;
mod renderer;
mod strip;
mod summary;

pub use controller::{LoadOutcome, LoadTicket, UiEvent, ViewController, ViewOptions, ViewState};
pub use memory::MemorySurface;
pub use renderer::{ChartBackend, ChartRenderer, ChartSpec, Dataset};
pub use strip::{ForecastCard, build_forecast_cards};
pub use summary::{SummaryView, format_temperature};

use crate::chart::ForecastRange;

/// Text shown on a static city card whose temperature could not be loaded.
pub const SENTINEL: &str = "N/A";

/// Stable identifiers of the page elements the controller reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Temperature,
    CityName,
    CountryName,
    Humidity,
    Wind,
    Precip,
    Time,
    Date,
    SummarySection,
    ForecastSection,
    ForecastCity,
    ErrorSection,
    ErrorMessage,
    SearchInput,
    Navbar,
    Overlay,
    MenuToggle,
    /// City name printed on the n-th static card.
    CardCity(usize),
    /// Temperature slot of the n-th static card.
    CardTemperature(usize),
}

/// The page as seen by the controller: a key-value surface addressed by [`ElementId`].
pub trait RenderSurface {
    fn text(&self, id: ElementId) -> Option<String>;

    fn set_text(&mut self, id: ElementId, text: &str);

    fn set_visible(&mut self, id: ElementId, visible: bool);

    fn clear_forecast(&mut self);

    fn append_forecast_card(&mut self, card: ForecastCard);

    /// Scroll the forecast strip horizontally by `dx` pixels.
    fn scroll_forecast(&mut self, dx: i32);

    fn set_tab_active(&mut self, range: ForecastRange, active: bool);

    /// Number of static city cards on the page.
    fn card_count(&self) -> usize;
}
