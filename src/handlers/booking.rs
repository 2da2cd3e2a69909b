use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::Json;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::errors::AppError;
use crate::models::{BookingFields, FormView};
use crate::state::AppState;

// GET /api/booking/form
pub async fn get_form(State(state): State<Arc<AppState>>) -> Json<FormView> {
    Json(state.booking.view())
}

// POST /api/booking/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<BookingFields>,
) -> Result<Json<FormView>, AppError> {
    let view = state.booking.submit(fields).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub value: String,
}

// POST /api/booking/fields/phone/blur
pub async fn phone_blur(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FieldValue>,
) -> Json<FormView> {
    Json(state.booking.on_phone_blur(&body.value))
}

// POST /api/booking/fields/date/change
pub async fn date_change(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FieldValue>,
) -> Json<FormView> {
    let today = chrono::Local::now().date_naive();
    Json(state.booking.on_date_change(&body.value, today))
}

// GET /api/booking/events
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.booking.subscribe();
    let current = state.booking.view();

    let initial = tokio_stream::once(Ok::<_, Infallible>(form_event(&current)));

    let live_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(view) => Some(Ok(form_event(&view))),
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::debug!(skipped = n, "form view subscriber lagged");
            None
        }
    });

    let keepalive_stream = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let combined = initial.chain(live_stream);
    Sse::new(StreamExt::merge(combined, keepalive_stream))
}

fn form_event(view: &FormView) -> Event {
    let data = serde_json::to_string(view).unwrap_or_default();
    Event::default().data(data).event("form_view")
}
