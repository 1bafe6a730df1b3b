use futures::{
    FutureExt,
    future::BoxFuture,
    stream::{FuturesUnordered, StreamExt},
};
use tracing::{debug, info, instrument, warn};

use super::{
    ChartBackend, ChartRenderer, ElementId, RenderSurface, SENTINEL, SummaryView,
    build_forecast_cards, format_temperature,
};
use crate::{
    chart::{ForecastRange, reduce_for_chart},
    client::WeatherSource,
    config::DashboardConfig,
    error::WeatherError,
    model::{ForecastDay, WeatherReport},
};

/// User interactions the dashboard reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PageLoaded,
    /// Click on the n-th static city card.
    CardClicked(usize),
    SearchClicked,
    /// Key pressed inside the search box, e.g. `"Enter"`.
    SearchKeyDown(String),
    RangeTabClicked(ForecastRange),
    MenuToggleClicked,
    CloseMenuClicked,
    OverlayClicked,
    SlideLeftClicked,
    SlideRightClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub default_city: String,
    pub slide_offset: i32,
}

impl Default for ViewOptions {
    fn default() -> Self {
        DashboardConfig::default().into()
    }
}

impl From<DashboardConfig> for ViewOptions {
    fn from(config: DashboardConfig) -> Self {
        Self { default_city: config.default_city, slide_offset: config.slide_offset }
    }
}

/// Selection state shared by the handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Last city that loaded successfully. No chart is drawn until this is set.
    pub selected_city: Option<String>,
    pub selected_range: ForecastRange,
    pub nav_open: bool,
}

/// Identifies one in-flight city load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    city: String,
}

impl LoadTicket {
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Rendered,
    /// The error panel shows this error's message.
    Failed(WeatherError),
    /// A newer load was already applied; nothing changed.
    Stale,
}

/// Drives the dashboard regions from fetched weather data and UI events.
pub struct ViewController<W, S, B: ChartBackend> {
    source: W,
    options: ViewOptions,
    page: Page<S, B>,
}

/// Everything the handlers write to, kept apart from the source so responses can be applied
/// while other fetches are still in flight.
struct Page<S, B: ChartBackend> {
    surface: S,
    chart: ChartRenderer<B>,
    state: ViewState,
    issued: u64,
    applied: u64,
}

/// A response arriving during the initial page load.
enum Arrival {
    City(Result<WeatherReport, WeatherError>),
    Card { index: usize, city: String, result: Result<WeatherReport, WeatherError> },
}

impl<W, S, B> ViewController<W, S, B>
where
    W: WeatherSource,
    S: RenderSurface,
    B: ChartBackend,
{
    pub fn new(source: W, surface: S, backend: B, options: ViewOptions) -> Self {
        Self {
            source,
            options,
            page: Page {
                surface,
                chart: ChartRenderer::new(backend),
                state: ViewState::default(),
                issued: 0,
                applied: 0,
            },
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.page.state
    }

    pub fn surface(&self) -> &S {
        &self.page.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.page.surface
    }

    pub fn chart(&self) -> &ChartRenderer<B> {
        &self.page.chart
    }

    /// Route a UI event to its handler.
    pub async fn dispatch(&mut self, event: UiEvent) {
        debug!(?event, "dispatching");
        match event {
            UiEvent::PageLoaded => self.page_loaded().await,
            UiEvent::CardClicked(index) => self.card_clicked(index).await,
            UiEvent::SearchClicked => self.submit_search().await,
            UiEvent::SearchKeyDown(key) => {
                if key == "Enter" {
                    self.submit_search().await;
                }
            }
            UiEvent::RangeTabClicked(range) => self.select_range(range).await,
            UiEvent::MenuToggleClicked => self.open_nav(),
            UiEvent::CloseMenuClicked | UiEvent::OverlayClicked => self.close_nav(),
            UiEvent::SlideLeftClicked => self.slide(-self.options.slide_offset),
            UiEvent::SlideRightClicked => self.slide(self.options.slide_offset),
        }
    }

    /// Initial page load: the default city and every static card are fetched together, and
    /// each region is rendered as soon as its own response arrives.
    pub async fn page_loaded(&mut self) {
        self.page.mark_active_tab();
        let ticket = self.page.begin_load(&self.options.default_city);

        let source = &self.source;
        let mut pending: FuturesUnordered<BoxFuture<'_, Arrival>> = FuturesUnordered::new();
        let city = ticket.city().to_string();
        pending.push(async move { Arrival::City(source.fetch(&city).await) }.boxed());
        for (index, city) in self.page.card_cities() {
            pending.push(
                async move {
                    let result = fetch_card(source, &city).await;
                    Arrival::Card { index, city, result }
                }
                .boxed(),
            );
        }

        let mut ticket = Some(ticket);
        while let Some(arrival) = pending.next().await {
            match arrival {
                Arrival::City(result) => {
                    if let Some(ticket) = ticket.take() {
                        self.page.apply_load(ticket, result);
                    }
                }
                Arrival::Card { index, city, result } => self.page.write_card(index, &city, result),
            }
        }
    }

    /// Fetch `city` and render it, or show the error panel.
    ///
    /// The caller is expected to have rejected blank input.
    pub async fn load_city(&mut self, city: &str) -> LoadOutcome {
        let ticket = self.page.begin_load(city);
        let result = self.source.fetch(ticket.city()).await;
        self.page.apply_load(ticket, result)
    }

    /// Start a load: hide any previous error and hand out a ticket for the response.
    pub fn begin_load(&mut self, city: &str) -> LoadTicket {
        self.page.begin_load(city)
    }

    /// Render the response of `ticket`, unless a newer load has already been applied.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<WeatherReport, WeatherError>,
    ) -> LoadOutcome {
        self.page.apply_load(ticket, result)
    }

    /// Switch the chart range; redraws for the selected city when there is one.
    #[instrument(skip(self))]
    pub async fn select_range(&mut self, range: ForecastRange) {
        self.page.state.selected_range = range;
        self.page.mark_active_tab();

        let Some(city) = self.page.state.selected_city.clone() else {
            debug!("no city loaded yet, chart left empty");
            return;
        };

        match self.source.fetch(&city).await {
            Ok(report) => self.page.refresh_chart(&report.days),
            Err(err) => warn!(%city, error = %err, "chart data fetch failed"),
        }
    }

    pub async fn submit_search(&mut self) {
        let input = self.page.surface.text(ElementId::SearchInput).unwrap_or_default();
        let city = input.trim();
        if city.is_empty() {
            return;
        }

        self.page.surface.set_text(ElementId::SearchInput, "");
        self.load_city(city).await;
    }

    pub async fn card_clicked(&mut self, index: usize) {
        let city = self.page.surface.text(ElementId::CardCity(index)).unwrap_or_default();
        let city = city.trim();
        if city.is_empty() {
            warn!(index, "clicked card has no city name");
            return;
        }
        self.load_city(city).await;
    }

    /// Fill every static card's temperature. Cards load concurrently and each one is
    /// written as soon as its own response arrives; failures show [`SENTINEL`].
    pub async fn load_static_cards(&mut self) {
        let source = &self.source;
        let mut pending: FuturesUnordered<_> = self
            .page
            .card_cities()
            .into_iter()
            .map(|(index, city)| async move {
                let result = fetch_card(source, &city).await;
                (index, city, result)
            })
            .collect();

        while let Some((index, city, result)) = pending.next().await {
            self.page.write_card(index, &city, result);
        }
    }

    pub fn open_nav(&mut self) {
        self.page.set_nav(true);
    }

    pub fn close_nav(&mut self) {
        self.page.set_nav(false);
    }

    fn slide(&mut self, dx: i32) {
        self.page.surface.scroll_forecast(dx);
    }
}

async fn fetch_card<W: WeatherSource>(
    source: &W,
    city: &str,
) -> Result<WeatherReport, WeatherError> {
    if city.is_empty() {
        return Err(WeatherError::data_shape("card has no city name"));
    }
    source.fetch(city).await
}

impl<S, B> Page<S, B>
where
    S: RenderSurface,
    B: ChartBackend,
{
    fn begin_load(&mut self, city: &str) -> LoadTicket {
        self.issued += 1;
        self.surface.set_visible(ElementId::ErrorSection, false);
        self.surface.set_visible(ElementId::SummarySection, true);
        self.surface.set_visible(ElementId::ForecastSection, true);

        LoadTicket { seq: self.issued, city: city.to_string() }
    }

    fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<WeatherReport, WeatherError>,
    ) -> LoadOutcome {
        if ticket.seq <= self.applied {
            info!(city = %ticket.city, seq = ticket.seq, "discarding stale weather response");
            return LoadOutcome::Stale;
        }
        self.applied = ticket.seq;

        match result {
            Ok(report) => {
                self.render_summary(&report);
                self.render_strip(&report);
                self.state.selected_city = Some(ticket.city);
                self.refresh_chart(&report.days);
                LoadOutcome::Rendered
            }
            Err(err) => {
                warn!(city = %ticket.city, error = %err, "weather load failed");
                self.state.selected_city = None;
                self.show_error(&err.to_string());
                LoadOutcome::Failed(err)
            }
        }
    }

    fn card_cities(&self) -> Vec<(usize, String)> {
        (0..self.surface.card_count())
            .map(|i| {
                let city = self.surface.text(ElementId::CardCity(i)).unwrap_or_default();
                (i, city.trim().to_string())
            })
            .collect()
    }

    fn write_card(
        &mut self,
        index: usize,
        city: &str,
        result: Result<WeatherReport, WeatherError>,
    ) {
        let text = match result {
            Ok(report) => format_temperature(report.snapshot.current.temp_c),
            Err(err) => {
                warn!(%city, error = %err, "card temperature unavailable");
                SENTINEL.to_string()
            }
        };
        self.surface.set_text(ElementId::CardTemperature(index), &text);
    }

    fn set_nav(&mut self, open: bool) {
        self.state.nav_open = open;
        self.surface.set_visible(ElementId::Navbar, open);
        self.surface.set_visible(ElementId::Overlay, open);
        self.surface.set_visible(ElementId::MenuToggle, !open);
    }

    fn mark_active_tab(&mut self) {
        for range in ForecastRange::all() {
            self.surface.set_tab_active(*range, *range == self.state.selected_range);
        }
    }

    fn render_summary(&mut self, report: &WeatherReport) {
        let view = SummaryView::from_snapshot(&report.snapshot);

        self.surface.set_text(ElementId::Temperature, &view.temperature);
        self.surface.set_text(ElementId::CityName, &view.city);
        self.surface.set_text(ElementId::CountryName, &view.country);
        self.surface.set_text(ElementId::Humidity, &view.humidity);
        self.surface.set_text(ElementId::Wind, &view.wind);
        self.surface.set_text(ElementId::Precip, &view.precip);
        self.surface.set_text(ElementId::Time, &view.time);
        self.surface.set_text(ElementId::Date, &view.date);
    }

    fn render_strip(&mut self, report: &WeatherReport) {
        self.surface.clear_forecast();
        self.surface.set_text(ElementId::ForecastCity, &report.snapshot.location.name);

        for card in build_forecast_cards(&report.days) {
            self.surface.append_forecast_card(card);
        }
    }

    /// Chart failures only get logged; the rest of the page stays as it is.
    fn refresh_chart(&mut self, days: &[ForecastDay]) {
        let range = self.state.selected_range;
        let rendered = reduce_for_chart(days, range)
            .map_err(anyhow::Error::from)
            .and_then(|data| self.chart.render(data));

        if let Err(err) = rendered {
            warn!(%range, error = %err, "chart not updated");
        }
    }

    fn show_error(&mut self, message: &str) {
        self.surface.set_visible(ElementId::SummarySection, false);
        self.surface.set_visible(ElementId::ForecastSection, false);
        self.surface.set_text(ElementId::ErrorMessage, message);
        self.surface.set_visible(ElementId::ErrorSection, true);
    }
}
