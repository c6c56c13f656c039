use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use dropway_domain::Booking;

use crate::channel::{NotificationChannel, NotifyError};
use crate::config::{CloudApiConfig, TwilioConfig};
use crate::template;

/// The two alternative provider backends for the WhatsApp channel. A
/// deployment configures exactly one of them.
pub enum WhatsAppBackend {
    Cloud(CloudApiConfig),
    Twilio(TwilioConfig),
}

#[derive(Debug, Deserialize)]
struct CloudMessage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CloudSendResponse {
    messages: Vec<CloudMessage>,
}

#[derive(Debug, Deserialize)]
struct TwilioSendResponse {
    sid: String,
}

/// Sends the booking summary to the configured admin numbers. Destinations
/// are attempted independently; the channel only fails when every
/// destination failed.
pub struct WhatsAppChannel {
    http: reqwest::Client,
    backend: WhatsAppBackend,
    admin_numbers: Vec<String>,
    default_country_code: String,
}

impl WhatsAppChannel {
    pub fn new(
        http: reqwest::Client,
        backend: WhatsAppBackend,
        admin_numbers: Vec<String>,
        default_country_code: String,
    ) -> Self {
        Self {
            http,
            backend,
            admin_numbers,
            default_country_code,
        }
    }

    /// Strip spaces and `+`, then prefix the default country code when the
    /// number does not already carry it.
    fn normalize(&self, number: &str) -> String {
        let digits: String = number.chars().filter(|c| !c.is_whitespace() && *c != '+').collect();
        if digits.starts_with(&self.default_country_code) {
            digits
        } else {
            format!("{}{}", self.default_country_code, digits)
        }
    }

    async fn send_one(&self, to: &str, text: &str) -> Result<String, NotifyError> {
        match &self.backend {
            WhatsAppBackend::Cloud(cfg) => self.send_via_cloud(cfg, to, text).await,
            WhatsAppBackend::Twilio(cfg) => self.send_via_twilio(cfg, to, text).await,
        }
    }

    async fn send_via_cloud(
        &self,
        cfg: &CloudApiConfig,
        to: &str,
        text: &str,
    ) -> Result<String, NotifyError> {
        let response = self
            .http
            .post(format!("{}/{}/messages", cfg.api_base, cfg.phone_number_id))
            .bearer_auth(&cfg.access_token)
            .json(&json!({
                "messaging_product": "whatsapp",
                "to": to,
                "text": { "body": text },
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                detail,
            });
        }

        let sent: CloudSendResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::MalformedResponse(e.to_string()))?;

        sent.messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| NotifyError::MalformedResponse("empty messages array".to_string()))
    }

    async fn send_via_twilio(
        &self,
        cfg: &TwilioConfig,
        to: &str,
        text: &str,
    ) -> Result<String, NotifyError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            cfg.api_base, cfg.account_sid
        );
        let response = self
            .http
            .post(url)
            .basic_auth(&cfg.account_sid, Some(&cfg.auth_token))
            .form(&[
                ("To", format!("whatsapp:+{to}")),
                ("From", format!("whatsapp:+{}", cfg.from_number)),
                ("Body", text.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                detail,
            });
        }

        let sent: TwilioSendResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::MalformedResponse(e.to_string()))?;

        Ok(sent.sid)
    }
}

#[async_trait]
impl NotificationChannel for WhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn notify(&self, booking: &Booking) -> Result<Vec<String>, NotifyError> {
        let text = template::message_text(booking);

        let sends = self.admin_numbers.iter().map(|number| {
            let to = self.normalize(number);
            let text = &text;
            async move {
                let result = self.send_one(&to, text).await;
                (to, result)
            }
        });

        let mut message_ids = Vec::new();
        let mut last_error = None;

        for (to, result) in join_all(sends).await {
            match result {
                Ok(id) => {
                    debug!(destination = %to, message_id = %id, "whatsapp message accepted");
                    message_ids.push(id);
                }
                Err(e) => {
                    warn!(destination = %to, error = %e, "whatsapp send failed");
                    last_error = Some(e);
                }
            }
        }

        if message_ids.is_empty() {
            if let Some(e) = last_error {
                return Err(NotifyError::AllDestinationsFailed(e.to_string()));
            }
        }

        Ok(message_ids)
    }
}
