use std::net::SocketAddr;
use std::sync::Arc;

use dropway_api::{app, AppState};
use dropway_notify::build_dispatcher;
use dropway_store::MongoStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dropway_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = dropway_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Dropway API on port {}", config.server.port);

    let store = MongoStore::connect(&config.database.url, &config.database.name)
        .await
        .expect("Failed to connect to booking store");

    let dispatcher = build_dispatcher(
        config.email.as_ref(),
        config.whatsapp.as_ref(),
        config.notify.timeout_seconds,
    );
    tracing::info!("{} notification channel(s) active", dispatcher.channel_count());

    let app_state = AppState {
        store: Arc::new(store),
        dispatcher: Arc::new(dispatcher),
    };

    let app = app(app_state, &config.server.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
