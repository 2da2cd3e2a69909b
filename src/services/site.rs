use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};

use crate::models::{NavState, PageView};

pub const HEADER_SHADOW: &str = "0 2px 20px rgba(0, 0, 0, 0.1)";
pub const HEADER_NO_SHADOW: &str = "none";
const HEADER_SHADOW_AFTER: f64 = 100.0;

/// Height of the fixed header that anchor scrolling leaves clear.
pub const HEADER_OFFSET: f64 = 80.0;

/// Fraction of an element that must be visible before it fades in.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// The bottom of the viewport is pulled in by this much when deciding
/// whether an element is visible.
pub const REVEAL_BOTTOM_INSET: f64 = 50.0;

pub const LAZY_LOADING: &str = "lazy";

const FOOTER_PLACEHOLDER_YEAR: &str = "2024";

pub fn header_shadow(scroll_y: f64) -> &'static str {
    if scroll_y > HEADER_SHADOW_AFTER {
        HEADER_SHADOW
    } else {
        HEADER_NO_SHADOW
    }
}

/// Scroll target for an in-page anchor, keeping the target below the header.
pub fn anchor_scroll_top(element_top: f64, page_offset: f64) -> f64 {
    element_top + page_offset - HEADER_OFFSET
}

pub fn footer_text(text: &str, year: i32) -> String {
    text.replace(FOOTER_PLACEHOLDER_YEAR, &year.to_string())
}

/// Value for the date input's `min` attribute.
pub fn min_booking_date(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

/// `loading` attribute for page images, when the browser understands it.
pub fn image_loading(lazy_supported: bool) -> Option<&'static str> {
    lazy_supported.then_some(LAZY_LOADING)
}

/// Share of an element's height inside the viewport, after the bottom inset.
/// `top` is relative to the top of the viewport.
pub fn visible_ratio(top: f64, height: f64, viewport_height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let root_bottom = viewport_height - REVEAL_BOTTOM_INSET;
    let overlap = (top + height).min(root_bottom) - top.max(0.0);
    (overlap / height).clamp(0.0, 1.0)
}

/// What the page reports when asking for its render state.
#[derive(Debug, Clone, Default)]
pub struct PageInput {
    pub scroll_y: f64,
    pub anchor_top: Option<f64>,
    pub footer: Option<String>,
    pub lazy_images_supported: bool,
}

pub fn page_view(input: &PageInput, today: NaiveDate, nav: NavState) -> PageView {
    PageView {
        header_shadow: header_shadow(input.scroll_y),
        min_booking_date: min_booking_date(today),
        footer_year: today.year(),
        footer_text: input
            .footer
            .as_deref()
            .map(|text| footer_text(text, today.year())),
        scroll_to: input
            .anchor_top
            .map(|top| anchor_scroll_top(top, input.scroll_y)),
        image_loading: image_loading(input.lazy_images_supported),
        nav,
    }
}

/// Mobile navigation menu. Body scrolling is locked while the menu is open.
#[derive(Default)]
pub struct NavMenu {
    state: Mutex<NavState>,
}

impl NavMenu {
    pub fn state(&self) -> NavState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn toggle(&self) -> NavState {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.open = !state.open;
        state.body_scroll_locked = state.open;
        *state
    }

    /// A nav link was followed.
    pub fn close(&self) -> NavState {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = NavState::default();
        *state
    }
}

/// Fade-in tracking for service cards and gallery items. Elements start
/// hidden and stay revealed once they have crossed the threshold.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashMap<String, bool>,
}

impl RevealTracker {
    pub fn observe(&mut self, id: impl Into<String>) {
        self.revealed.entry(id.into()).or_insert(false);
    }

    /// Feeds one intersection report. Returns true if this report revealed
    /// the element.
    pub fn on_intersection(&mut self, id: &str, ratio: f64) -> bool {
        match self.revealed.get_mut(id) {
            Some(revealed) if !*revealed && ratio >= REVEAL_THRESHOLD => {
                *revealed = true;
                true
            }
            _ => false,
        }
    }

    /// Same as [`Self::on_intersection`], working from the element's position
    /// against the inset viewport.
    pub fn on_position(&mut self, id: &str, top: f64, height: f64, viewport_height: f64) -> bool {
        self.on_intersection(id, visible_ratio(top, height, viewport_height))
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.get(id).copied().unwrap_or(false)
    }
}
