use serde::Serialize;

use super::booking::BookingFields;

pub const SUBMIT_LABEL: &str = "BOOK APPOINTMENT";
pub const SUBMIT_BUSY_LABEL: &str = "BOOKING...";

pub const SUCCESS_MESSAGE: &str =
    "Appointment booked successfully! We will contact you shortly to confirm.";
pub const FAILURE_MESSAGE: &str =
    "Failed to book appointment. Please call us directly or try again later.";

pub const ERROR_BORDER_COLOR: &str = "#dc3545";

/// The form's single status slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum FormMessage {
    Hidden,
    Success(String),
    Error(String),
}

impl FormMessage {
    pub fn is_visible(&self) -> bool {
        !matches!(self, FormMessage::Hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

/// Inline validation state of one input: error border plus the message shown
/// right after the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldFeedback {
    pub border_color: Option<String>,
    pub error: Option<String>,
}

impl FieldFeedback {
    pub fn invalid(message: &str) -> Self {
        Self {
            border_color: Some(ERROR_BORDER_COLOR.to_string()),
            error: Some(message.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything the page needs to render the booking form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub fields: BookingFields,
    pub submit: SubmitControl,
    pub message: FormMessage,
    pub phone_feedback: FieldFeedback,
    pub date_feedback: FieldFeedback,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            fields: BookingFields::default(),
            submit: SubmitControl {
                enabled: true,
                label: SUBMIT_LABEL.to_string(),
            },
            message: FormMessage::Hidden,
            phone_feedback: FieldFeedback::default(),
            date_feedback: FieldFeedback::default(),
        }
    }
}
