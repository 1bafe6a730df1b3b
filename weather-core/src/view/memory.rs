use std::collections::{HashMap, HashSet};

use super::{ElementId, ForecastCard, RenderSurface};
use crate::chart::ForecastRange;

/// In-memory page, used by the terminal dashboard and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    texts: HashMap<ElementId, String>,
    visibility: HashMap<ElementId, bool>,
    forecast_cards: Vec<ForecastCard>,
    scroll_x: i32,
    active_tabs: HashSet<ForecastRange>,
    card_count: usize,
}

impl MemorySurface {
    /// A page whose static cards show `cities`, in order.
    pub fn with_cards<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut surface = Self::default();
        for city in cities {
            surface.texts.insert(ElementId::CardCity(surface.card_count), city.into());
            surface.card_count += 1;
        }
        surface
    }

    /// Elements start visible, except the ones a fresh page hides.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.visibility.get(&id).copied().unwrap_or(!matches!(
            id,
            ElementId::ErrorSection | ElementId::Navbar | ElementId::Overlay
        ))
    }

    pub fn forecast_cards(&self) -> &[ForecastCard] {
        &self.forecast_cards
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_x
    }

    pub fn is_tab_active(&self, range: ForecastRange) -> bool {
        self.active_tabs.contains(&range)
    }

    pub fn active_tabs(&self) -> impl Iterator<Item = ForecastRange> + '_ {
        self.active_tabs.iter().copied()
    }

    /// Text of `id`, empty when never written.
    pub fn text_or_empty(&self, id: ElementId) -> &str {
        self.texts.get(&id).map_or("", String::as_str)
    }
}

impl RenderSurface for MemorySurface {
    fn text(&self, id: ElementId) -> Option<String> {
        self.texts.get(&id).cloned()
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        self.texts.insert(id, text.to_string());
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.visibility.insert(id, visible);
    }

    fn clear_forecast(&mut self) {
        self.forecast_cards.clear();
        self.scroll_x = 0;
    }

    fn append_forecast_card(&mut self, card: ForecastCard) {
        self.forecast_cards.push(card);
    }

    fn scroll_forecast(&mut self, dx: i32) {
        // Like a scroll container, the strip can't scroll past its left edge.
        self.scroll_x = (self.scroll_x + dx).max(0);
    }

    fn set_tab_active(&mut self, range: ForecastRange, active: bool) {
        if active {
            self.active_tabs.insert(range);
        } else {
            self.active_tabs.remove(&range);
        }
    }

    fn card_count(&self) -> usize {
        self.card_count
    }
}
