pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::BookingError;
use crate::models::BookingRequest;

/// A live connection to the table that stores appointments.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Inserts one booking. On success returns the rows the store echoed back,
    /// which may be empty.
    async fn insert(&self, booking: &BookingRequest) -> Result<Vec<serde_json::Value>, BookingError>;
}

/// Builds an [`AppointmentStore`]. Failures surface as
/// [`BookingError::ConnectionUnavailable`].
#[async_trait]
pub trait ClientConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn AppointmentStore>, BookingError>;
}
