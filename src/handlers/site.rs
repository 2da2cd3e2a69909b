use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{NavState, PageView};
use crate::services::site::{self, PageInput};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PageQuery {
    pub scroll_y: Option<f64>,
    pub anchor_top: Option<f64>,
    pub footer: Option<String>,
    pub lazy_images: Option<bool>,
}

// GET /api/page
pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Json<PageView> {
    let today = chrono::Local::now().date_naive();
    let input = PageInput {
        scroll_y: query.scroll_y.unwrap_or(0.0),
        anchor_top: query.anchor_top,
        footer: query.footer,
        lazy_images_supported: query.lazy_images.unwrap_or(true),
    };
    Json(site::page_view(&input, today, state.nav.state()))
}

// POST /api/nav/toggle
pub async fn nav_toggle(State(state): State<Arc<AppState>>) -> Json<NavState> {
    Json(state.nav.toggle())
}

// POST /api/nav/close
pub async fn nav_close(State(state): State<Arc<AppState>>) -> Json<NavState> {
    Json(state.nav.close())
}

/// Either a ratio computed by the browser, or the element's position so the
/// bottom inset can be applied here.
#[derive(Deserialize)]
pub struct IntersectionReport {
    pub id: String,
    pub ratio: Option<f64>,
    pub top: Option<f64>,
    pub height: Option<f64>,
    pub viewport_height: Option<f64>,
}

#[derive(Serialize)]
pub struct RevealResponse {
    pub id: String,
    pub revealed: bool,
}

// POST /api/page/reveal
pub async fn reveal(
    State(state): State<Arc<AppState>>,
    Json(report): Json<IntersectionReport>,
) -> Result<Json<RevealResponse>, AppError> {
    let position = match (report.top, report.height, report.viewport_height, report.ratio) {
        (Some(top), Some(height), Some(viewport_height), _) => {
            if !top.is_finite() || !(height > 0.0) || !(viewport_height > 0.0) {
                return Err(AppError::BadRequest(
                    "element position must be finite with positive sizes".to_string(),
                ));
            }
            Some((top, height, viewport_height))
        }
        (None, None, None, Some(ratio)) => {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(AppError::BadRequest(format!(
                    "intersection ratio out of range: {ratio}"
                )));
            }
            None
        }
        _ => {
            return Err(AppError::BadRequest(
                "expected either ratio or top, height and viewport_height".to_string(),
            ));
        }
    };

    let revealed = {
        let mut tracker = state.reveal.lock().unwrap_or_else(|e| e.into_inner());
        tracker.observe(report.id.as_str());
        match position {
            Some((top, height, viewport_height)) => {
                tracker.on_position(&report.id, top, height, viewport_height)
            }
            None => tracker.on_intersection(&report.id, report.ratio.unwrap_or(0.0)),
        };
        tracker.is_revealed(&report.id)
    };

    Ok(Json(RevealResponse {
        id: report.id,
        revealed,
    }))
}
