use chrono::NaiveDate;

use crate::models::{FieldFeedback, FormView};

pub const PHONE_ERROR: &str = "Please enter a valid phone number";
pub const DATE_ERROR: &str = "Please select a future date";

const MIN_PHONE_LEN: usize = 10;

/// Digits, whitespace and `+-()` only, at least 10 characters long.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() >= MIN_PHONE_LEN
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
}

/// True when `date` is today or later. Both sides are calendar days, so the
/// time of day never matters.
pub fn is_valid_date(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Parses the date input's `YYYY-MM-DD` value and checks it against `today`.
/// Anything unparseable counts as invalid.
pub fn is_valid_date_str(date: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| is_valid_date(d, today))
        .unwrap_or(false)
}

/// Phone input lost focus. Empty input is left alone.
pub fn on_phone_blur(view: &mut FormView, value: &str) {
    view.fields.phone = value.to_string();
    view.phone_feedback = if !value.is_empty() && !is_valid_phone(value) {
        FieldFeedback::invalid(PHONE_ERROR)
    } else {
        FieldFeedback::default()
    };
}

/// Date input changed. An invalid date is flagged and wiped from the field.
pub fn on_date_change(view: &mut FormView, value: &str, today: NaiveDate) {
    if !value.is_empty() && !is_valid_date_str(value, today) {
        view.date_feedback = FieldFeedback::invalid(DATE_ERROR);
        view.fields.date.clear();
    } else {
        view.date_feedback = FieldFeedback::default();
        view.fields.date = value.to_string();
    }
}
