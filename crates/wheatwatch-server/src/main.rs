//! # wheatwatch-server
//!
//! REST API for wheat-health analysis: builds remote imagery query graphs,
//! assembles vegetation-index time series, and serves classifier
//! predictions.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wheatwatch_gee::{DEFAULT_BASE_URL, Extractor, GeeClient, SeriesBuilder};
use wheatwatch_model::Predictor;

mod routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor<GeeClient>>,
    pub series: Arc<SeriesBuilder<GeeClient>>,
    pub predictor: Arc<Predictor>,
}

/// Liveness probe.
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (optional, won't fail if missing).
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wheatwatch_server=info,tower_http=info".into()),
        )
        .init();

    let base_url =
        env::var("GEE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let project = env::var("GEE_PROJECT").unwrap_or_else(|_| "wheatwatch".to_string());
    let mut client = GeeClient::new(base_url, project).context("building imagery client")?;
    if let Ok(token) = env::var("GEE_ACCESS_TOKEN") {
        client = client.with_token(token);
    }

    let model_path = PathBuf::from(
        env::var("WHEAT_MODEL_PATH")
            .unwrap_or_else(|_| "models/wheat_health_rf.onnx".to_string()),
    );
    let predictor = Predictor::load(&model_path);

    let state = AppState {
        extractor: Arc::new(Extractor::new(client.clone())),
        series: Arc::new(SeriesBuilder::new(client)),
        predictor: Arc::new(predictor),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health/live", get(liveness))
        .route("/health", get(liveness))
        .route("/predict", post(routes::predict))
        .route("/api/indices", get(routes::indices))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let host = env::var("WHEATWATCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("WHEATWATCH_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .context("WHEATWATCH_PORT must be a valid port number")?;
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("invalid host:port configuration")?;

    tracing::info!(
        "wheatwatch-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
