use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::Instrument;
use uuid::Uuid;

use crate::errors::{AppError, BookingError};
use crate::models::form::{FAILURE_MESSAGE, SUBMIT_BUSY_LABEL, SUCCESS_MESSAGE};
use crate::models::{BookingFields, BookingRequest, FormMessage, FormView};
use crate::services::client::RemoteClient;
use crate::services::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    InsertSucceeded,
    InsertFailed,
    Settled,
}

/// `Idle -> Submitting -> {Succeeded, Failed} -> Idle`. Returns `None` for
/// any event the current phase does not accept.
pub fn transition(phase: SubmissionPhase, event: SubmissionEvent) -> Option<SubmissionPhase> {
    use SubmissionEvent::*;
    use SubmissionPhase::*;

    match (phase, event) {
        (Idle, Submit) => Some(Submitting),
        (Submitting, InsertSucceeded) => Some(Succeeded),
        (Submitting, InsertFailed) => Some(Failed),
        (Succeeded | Failed, Settled) => Some(Idle),
        _ => None,
    }
}

struct FormState {
    phase: SubmissionPhase,
    view: FormView,
}

impl FormState {
    fn advance(&mut self, event: SubmissionEvent) -> Option<SubmissionPhase> {
        let next = transition(self.phase, event)?;
        self.phase = next;
        Some(next)
    }
}

/// Owns the booking form's view model and runs submissions against the
/// appointment store.
pub struct BookingController {
    client: RemoteClient,
    form: Mutex<FormState>,
    updates: broadcast::Sender<FormView>,
    hide_after: Duration,
}

impl BookingController {
    pub fn new(client: RemoteClient, hide_after: Duration) -> Self {
        let (updates, _) = broadcast::channel(64);
        Self {
            client,
            form: Mutex::new(FormState {
                phase: SubmissionPhase::Idle,
                view: FormView::default(),
            }),
            updates,
            hide_after,
        }
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    pub fn view(&self) -> FormView {
        self.form().view.clone()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.form().phase
    }

    /// Every change to the view model is published here.
    pub fn subscribe(&self) -> broadcast::Receiver<FormView> {
        self.updates.subscribe()
    }

    pub fn on_phone_blur(&self, value: &str) -> FormView {
        let mut form = self.form();
        validation::on_phone_blur(&mut form.view, value);
        self.publish(&form.view);
        form.view.clone()
    }

    pub fn on_date_change(&self, value: &str, today: NaiveDate) -> FormView {
        let mut form = self.form();
        validation::on_date_change(&mut form.view, value, today);
        self.publish(&form.view);
        form.view.clone()
    }

    /// Handles one submit action and returns the view once the attempt has
    /// settled. Rejected with [`AppError::SubmissionInProgress`] while another
    /// attempt holds the submit control.
    ///
    /// The attempt runs on its own task, so the submit control is restored
    /// even if the caller stops waiting.
    pub async fn submit(self: &Arc<Self>, fields: BookingFields) -> Result<FormView, AppError> {
        let (request, original_label) = self.begin(fields)?;

        let attempt = Uuid::new_v4();
        let span = tracing::info_span!("booking", %attempt);

        let this = Arc::clone(self);
        let label = original_label.clone();
        let task = tokio::spawn(
            async move {
                let outcome = this.send(request).await;
                this.finish(outcome, label)
            }
            .instrument(span),
        );

        match task.await {
            Ok(view) => Ok(view),
            Err(e) => {
                tracing::error!(error = %e, "booking task aborted");
                let outcome = Err(BookingError::Unexpected(format!("booking task aborted: {e}")));
                Ok(self.finish(outcome, original_label))
            }
        }
    }

    fn begin(&self, fields: BookingFields) -> Result<(BookingRequest, String), AppError> {
        let mut form = self.form();
        form.advance(SubmissionEvent::Submit)
            .ok_or(AppError::SubmissionInProgress)?;

        let original_label = form.view.submit.label.clone();
        form.view.fields = fields;
        form.view.submit.enabled = false;
        form.view.submit.label = SUBMIT_BUSY_LABEL.to_string();
        form.view.message = FormMessage::Hidden;
        self.publish(&form.view);

        Ok((form.view.fields.to_request(), original_label))
    }

    /// Obtains the store and inserts the booking on a separate task, so a
    /// panic in either step surfaces as [`BookingError::Unexpected`].
    async fn send(self: &Arc<Self>, request: BookingRequest) -> Result<usize, BookingError> {
        let this = Arc::clone(self);

        tokio::spawn(async move {
            let store = this.client.ensure_client().await?;
            store.insert(&request).await
        })
        .await
        .unwrap_or_else(|e| Err(BookingError::Unexpected(format!("booking call failed: {e}"))))
        .map(|rows| rows.len())
    }

    fn finish(
        self: &Arc<Self>,
        outcome: Result<usize, BookingError>,
        original_label: String,
    ) -> FormView {
        let mut form = self.form();

        match outcome {
            Ok(rows) => {
                tracing::info!(rows, "appointment booked");
                form.advance(SubmissionEvent::InsertSucceeded);
                form.view.message = FormMessage::Success(SUCCESS_MESSAGE.to_string());
                form.view.fields.clear();
                self.schedule_hide();
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "booking failed");
                form.advance(SubmissionEvent::InsertFailed);
                form.view.message = FormMessage::Error(FAILURE_MESSAGE.to_string());
            }
        }

        form.advance(SubmissionEvent::Settled);
        form.view.submit.enabled = true;
        form.view.submit.label = original_label;
        self.publish(&form.view);

        form.view.clone()
    }

    /// Hides the status message after the configured delay. Not cancelled by
    /// later submissions; whichever write lands last wins.
    fn schedule_hide(self: &Arc<Self>) {
        let this = Arc::clone(self);
        let delay = self.hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut form = this.form();
            form.view.message = FormMessage::Hidden;
            this.publish(&form.view);
        });
    }

    fn publish(&self, view: &FormView) {
        // no subscribers is fine
        let _ = self.updates.send(view.clone());
    }

    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
