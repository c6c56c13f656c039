use std::sync::Arc;

use dropway_domain::BookingStore;
use dropway_notify::NotificationDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub dispatcher: Arc<NotificationDispatcher>,
}
