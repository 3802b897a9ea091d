//! Crop Advisory service
//!
//! Yield estimates and farming advice for a field, plus a farming-only chat
//! assistant backed by a generative AI model.

use axum::{http::Method, Router};
use shared::{AdvisoryTables, YieldEstimator};
use std::{path::Path, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::TextCompletion;
use services::RecordSink;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advisory: Arc<AdvisoryTables>,
    pub estimator: YieldEstimator,
    pub completion: Arc<dyn TextCompletion>,
    pub sink: Option<Arc<dyn RecordSink>>,
}

impl AppState {
    pub fn new(
        config: Config,
        estimator: YieldEstimator,
        completion: Arc<dyn TextCompletion>,
        sink: Option<Arc<dyn RecordSink>>,
    ) -> Self {
        let advisory = Arc::new(config.advisory.clone());
        Self {
            config: Arc::new(config),
            advisory,
            estimator,
            completion,
            sink,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let static_dir = state.config.server.static_dir.clone();

    let router = Router::new()
        .nest("/api", routes::api_routes().layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => {
            let index = Path::new(&dir).join("index.html");
            router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index)))
        }
        None => router,
    }
}
