use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{error, info, warn};

use dropway_domain::Booking;

use crate::channel::NotificationChannel;
use crate::config::{EmailConfig, WhatsAppConfig};
use crate::email::EmailChannel;
use crate::whatsapp::{WhatsAppBackend, WhatsAppChannel};

/// Fans a saved booking out to every active channel. Best effort,
/// at-most-once per channel: results are settled and logged, never
/// propagated.
pub struct NotificationDispatcher {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub async fn dispatch(&self, booking: &Booking) {
        let sends = self
            .channels
            .iter()
            .map(|channel| async move { (channel.name(), channel.notify(booking).await) });

        for (name, result) in join_all(sends).await {
            match result {
                Ok(message_ids) => {
                    info!(
                        channel = name,
                        booking_id = %booking.id,
                        ?message_ids,
                        "notification delivered"
                    );
                }
                Err(e) => {
                    error!(
                        channel = name,
                        booking_id = %booking.id,
                        error = %e,
                        "notification failed"
                    );
                }
            }
        }
    }
}

/// Compute the active channel set once at startup from which credentials
/// are present in configuration.
pub fn build_dispatcher(
    email: Option<&EmailConfig>,
    whatsapp: Option<&WhatsAppConfig>,
    timeout_seconds: u64,
) -> NotificationDispatcher {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .expect("failed to build outbound http client");

    let mut channels: Vec<Arc<dyn NotificationChannel>> = Vec::new();

    match email {
        Some(cfg) => {
            channels.push(Arc::new(EmailChannel::new(http.clone(), cfg.clone())));
        }
        None => info!("email credential not configured, email channel disabled"),
    }

    match whatsapp {
        Some(cfg) if cfg.admin_numbers.is_empty() => {
            warn!("whatsapp configured without admin numbers, channel disabled");
        }
        Some(cfg) => {
            let backend = match (&cfg.cloud, &cfg.twilio) {
                (Some(cloud), twilio) => {
                    if twilio.is_some() {
                        warn!("both whatsapp providers configured, using the cloud API");
                    }
                    Some(WhatsAppBackend::Cloud(cloud.clone()))
                }
                (None, Some(twilio)) => Some(WhatsAppBackend::Twilio(twilio.clone())),
                (None, None) => {
                    warn!("whatsapp configured without provider credentials, channel disabled");
                    None
                }
            };
            if let Some(backend) = backend {
                channels.push(Arc::new(WhatsAppChannel::new(
                    http.clone(),
                    backend,
                    cfg.admin_numbers.clone(),
                    cfg.default_country_code.clone(),
                )));
            }
        }
        None => info!("whatsapp credential not configured, whatsapp channel disabled"),
    }

    NotificationDispatcher::new(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::NotifyError;
    use crate::config::CloudApiConfig;
    use async_trait::async_trait;
    use dropway_domain::BookingRequest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn booking() -> Booking {
        BookingRequest {
            name: Some("Asha".to_string()),
            mobile: Some(9876543210),
            pick_up_location: Some("Airport".to_string()),
            drop_off_location: Some("Downtown".to_string()),
            ..Default::default()
        }
        .into_booking()
        .unwrap()
    }

    struct FailingChannel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NotificationChannel for FailingChannel {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn notify(&self, _booking: &Booking) -> Result<Vec<String>, NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(NotifyError::MalformedResponse("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn dispatch_settles_even_when_every_channel_fails() {
        let channel = Arc::new(FailingChannel {
            calls: AtomicUsize::new(0),
        });
        let dispatcher = NotificationDispatcher::new(vec![channel.clone()]);

        dispatcher.dispatch(&booking()).await;

        assert_eq!(channel.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dispatch_with_no_channels_is_a_no_op() {
        let dispatcher = build_dispatcher(None, None, 5);
        assert_eq!(dispatcher.channel_count(), 0);
        dispatcher.dispatch(&booking()).await;
    }

    #[test]
    fn email_credential_presence_activates_the_channel() {
        let email = EmailConfig {
            api_key: "key".to_string(),
            from: "bookings@dropway.example".to_string(),
            recipients: vec!["ops@dropway.example".to_string()],
            api_base: "https://api.resend.com".to_string(),
        };

        let dispatcher = build_dispatcher(Some(&email), None, 5);
        assert_eq!(dispatcher.channel_count(), 1);
    }

    #[test]
    fn whatsapp_without_provider_credentials_is_skipped() {
        let whatsapp = WhatsAppConfig {
            admin_numbers: vec!["9876500001".to_string()],
            default_country_code: "91".to_string(),
            cloud: None,
            twilio: None,
        };

        let dispatcher = build_dispatcher(None, Some(&whatsapp), 5);
        assert_eq!(dispatcher.channel_count(), 0);
    }

    #[test]
    fn both_channels_active_with_full_configuration() {
        let email = EmailConfig {
            api_key: "key".to_string(),
            from: "bookings@dropway.example".to_string(),
            recipients: vec!["ops@dropway.example".to_string()],
            api_base: "https://api.resend.com".to_string(),
        };
        let whatsapp = WhatsAppConfig {
            admin_numbers: vec!["9876500001".to_string(), "9876500002".to_string()],
            default_country_code: "91".to_string(),
            cloud: Some(CloudApiConfig {
                access_token: "token".to_string(),
                phone_number_id: "1555000".to_string(),
                api_base: "https://graph.facebook.com/v18.0".to_string(),
            }),
            twilio: None,
        };

        let dispatcher = build_dispatcher(Some(&email), Some(&whatsapp), 5);
        assert_eq!(dispatcher.channel_count(), 2);
    }
}
