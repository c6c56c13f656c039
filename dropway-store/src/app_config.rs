use serde::Deserialize;
use std::env;

use dropway_notify::{EmailConfig, WhatsAppConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub notify: NotifySettings,
    pub email: Option<EmailConfig>,
    pub whatsapp: Option<WhatsAppConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifySettings {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `DROPWAY__SERVER__PORT=5000` overrides `server.port`
            .add_source(config::Environment::with_prefix("DROPWAY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
