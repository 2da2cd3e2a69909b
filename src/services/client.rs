use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::errors::BookingError;
use crate::services::remote::{AppointmentStore, ClientConnector};

/// Holds the appointment store handle once it has been created.
///
/// The handle is built on first use and then shared for the life of the
/// process. Callers that arrive while construction is pending wait for that
/// construction instead of starting their own. A failed construction leaves
/// the cell empty, so the next call starts over.
pub struct RemoteClient {
    connector: Box<dyn ClientConnector>,
    handle: OnceCell<Arc<dyn AppointmentStore>>,
}

impl RemoteClient {
    pub fn new(connector: Box<dyn ClientConnector>) -> Self {
        Self {
            connector,
            handle: OnceCell::new(),
        }
    }

    pub async fn ensure_client(&self) -> Result<Arc<dyn AppointmentStore>, BookingError> {
        self.handle
            .get_or_try_init(|| async {
                tracing::debug!("creating booking client");
                self.connector.connect().await
            })
            .await
            .cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.handle.initialized()
    }

    /// Start-up warm-up. Nothing is pending yet, so a failure is only logged.
    pub async fn warm_up(&self) {
        if let Err(e) = self.ensure_client().await {
            tracing::warn!(error = %e, "booking client initialization delayed");
        }
    }
}
