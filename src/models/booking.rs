use serde::{Deserialize, Serialize};

/// One appointment submission as sent to the `appointments` table.
/// Built fresh per attempt and dropped once the insert returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_name: String,
    pub phone_number: String,
    pub service: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub notes: String,
}

/// Raw values of the six booking form inputs, as the page holds them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingFields {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub notes: String,
}

impl BookingFields {
    /// Free-text inputs are trimmed; select, date and time inputs are taken as-is.
    pub fn to_request(&self) -> BookingRequest {
        BookingRequest {
            customer_name: self.name.trim().to_string(),
            phone_number: self.phone.trim().to_string(),
            service: self.service.clone(),
            appointment_date: self.date.clone(),
            appointment_time: self.time.clone(),
            notes: self.notes.trim().to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
