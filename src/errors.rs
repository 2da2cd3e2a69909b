use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Why a booking attempt failed. Every variant is shown to the user as the
/// same generic message; the detail only goes to the log.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("booking system unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("remote rejected insert ({code}): {message}")]
    RemoteRejected { code: String, message: String },

    #[error("unexpected booking failure: {0}")]
    Unexpected(String),
}

impl BookingError {
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::ConnectionUnavailable(_) => "connection_unavailable",
            BookingError::RemoteRejected { .. } => "remote_rejected",
            BookingError::Unexpected(_) => "unexpected",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("a booking is already being submitted")]
    SubmissionInProgress,

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::SubmissionInProgress => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
