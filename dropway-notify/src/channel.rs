use async_trait::async_trait;
use thiserror::Error;

use dropway_domain::Booking;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("provider returned {status}: {detail}")]
    Provider { status: u16, detail: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected provider response: {0}")]
    MalformedResponse(String),
    #[error("all destinations failed, last error: {0}")]
    AllDestinationsFailed(String),
}

/// An outbound notification mechanism with a fixed destination set.
///
/// Channels never reach the HTTP caller: the dispatcher settles every
/// channel result and only logs it.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Deliver a human-readable summary of the booking. Returns the
    /// provider-assigned message ids on success.
    async fn notify(&self, booking: &Booking) -> Result<Vec<String>, NotifyError>;
}
