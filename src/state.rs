use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::auth::SessionStore;
use crate::services::availability::AvailabilityProvider;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub availability: Box<dyn AvailabilityProvider>,
    pub sessions: SessionStore,
}
