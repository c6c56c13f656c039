use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use dropway_domain::Booking;

use crate::channel::{NotificationChannel, NotifyError};
use crate::config::EmailConfig;
use crate::template;

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Sends the booking summary to the configured operations mailboxes through
/// an HTTP email API (bearer key, JSON body, `{ "id": ... }` response).
pub struct EmailChannel {
    http: reqwest::Client,
    config: EmailConfig,
}

impl EmailChannel {
    pub fn new(http: reqwest::Client, config: EmailConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, booking: &Booking) -> Result<Vec<String>, NotifyError> {
        let body = json!({
            "from": self.config.from,
            "to": self.config.recipients,
            "subject": template::email_subject(booking),
            "html": template::email_html(booking),
        });

        let response = self
            .http
            .post(format!("{}/emails", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
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

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::MalformedResponse(e.to_string()))?;

        debug!(message_id = %sent.id, "email accepted by provider");
        Ok(vec![sent.id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropway_domain::BookingRequest;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

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

    fn channel(api_base: String) -> EmailChannel {
        EmailChannel::new(
            reqwest::Client::new(),
            EmailConfig {
                api_key: "re_test_key".to_string(),
                from: "bookings@dropway.example".to_string(),
                recipients: vec!["ops@dropway.example".to_string()],
                api_base,
            },
        )
    }

    #[tokio::test]
    async fn sends_html_and_returns_message_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test_key"))
            .and(body_partial_json(
                serde_json::json!({ "from": "bookings@dropway.example" }),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "em_42" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ids = channel(server.uri()).notify(&booking()).await.unwrap();
        assert_eq!(ids, vec!["em_42".to_string()]);
    }

    #[tokio::test]
    async fn provider_rejection_becomes_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = channel(server.uri()).notify(&booking()).await.unwrap_err();
        match err {
            NotifyError::Provider { status, detail } => {
                assert_eq!(status, 401);
                assert!(detail.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
