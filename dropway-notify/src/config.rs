use serde::Deserialize;

fn default_email_api_base() -> String {
    "https://api.resend.com".to_string()
}

fn default_cloud_api_base() -> String {
    "https://graph.facebook.com/v18.0".to_string()
}

fn default_twilio_api_base() -> String {
    "https://api.twilio.com".to_string()
}

fn default_country_code() -> String {
    "91".to_string()
}

/// Presence of this table in the app config activates the email channel.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    pub from: String,
    pub recipients: Vec<String>,
    #[serde(default = "default_email_api_base")]
    pub api_base: String,
}

/// Presence of this table activates the WhatsApp channel. Exactly one of
/// `cloud` or `twilio` should be configured per deployment.
#[derive(Debug, Deserialize, Clone)]
pub struct WhatsAppConfig {
    pub admin_numbers: Vec<String>,
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
    pub cloud: Option<CloudApiConfig>,
    pub twilio: Option<TwilioConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CloudApiConfig {
    pub access_token: String,
    pub phone_number_id: String,
    #[serde(default = "default_cloud_api_base")]
    pub api_base: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    #[serde(default = "default_twilio_api_base")]
    pub api_base: String,
}
