pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod email;
pub mod template;
pub mod whatsapp;

pub use channel::{NotificationChannel, NotifyError};
pub use config::{CloudApiConfig, EmailConfig, TwilioConfig, WhatsAppConfig};
pub use dispatcher::{build_dispatcher, NotificationDispatcher};
pub use email::EmailChannel;
pub use whatsapp::WhatsAppChannel;
