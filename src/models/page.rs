use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NavState {
    pub open: bool,
    pub body_scroll_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub header_shadow: &'static str,
    pub min_booking_date: String,
    pub footer_year: i32,
    pub footer_text: Option<String>,
    pub scroll_to: Option<f64>,
    pub image_loading: Option<&'static str>,
    pub nav: NavState,
}
