pub mod booking;
pub mod health;
pub mod site;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/booking/form", get(booking::get_form))
        .route("/api/booking/submit", post(booking::submit))
        .route(
            "/api/booking/fields/phone/blur",
            post(booking::phone_blur),
        )
        .route(
            "/api/booking/fields/date/change",
            post(booking::date_change),
        )
        .route("/api/booking/events", get(booking::events_stream))
        .route("/api/page", get(site::get_page))
        .route("/api/page/reveal", post(site::reveal))
        .route("/api/nav/toggle", post(site::nav_toggle))
        .route("/api/nav/close", post(site::nav_close))
        .with_state(state)
}
