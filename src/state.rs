use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::services::site::{NavMenu, RevealTracker};
use crate::services::submission::BookingController;

pub struct AppState {
    pub config: AppConfig,
    pub booking: Arc<BookingController>,
    pub nav: NavMenu,
    pub reveal: Mutex<RevealTracker>,
}
