//! Crop Advisory - Backend Server

use anyhow::Context;
use crop_advisory::{
    config::Config,
    create_app,
    external::{DisabledCompletion, GeminiClient, TextCompletion},
    services::{PgRecordSink, RecordSink},
    AppState,
};
use shared::YieldEstimator;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisory=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load().context("Failed to load configuration")?;

    tracing::info!("Starting Crop Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    let completion: Arc<dyn TextCompletion> = match GeminiClient::from_config(&config.gemini) {
        Some(client) => Arc::new(client?),
        None => {
            tracing::warn!("No Gemini API key configured; chat support will answer 503");
            Arc::new(DisabledCompletion)
        }
    };

    // Persistence is optional; the API runs without it
    let sink: Option<Arc<dyn RecordSink>> = match &config.database {
        Some(db) if config.persistence_configured() => {
            tracing::info!("Connecting to database...");
            match PgRecordSink::connect(db).await {
                Ok(sink) => {
                    tracing::info!("Database connection established");
                    Some(Arc::new(sink) as Arc<dyn RecordSink>)
                }
                Err(e) => {
                    tracing::warn!("Persistence disabled: {}", e);
                    None
                }
            }
        }
        _ => {
            tracing::info!("No database configured; persistence disabled");
            None
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    // Create application state
    let state = AppState::new(config, YieldEstimator::default(), completion, sink);

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
