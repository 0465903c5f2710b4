//! HTTP endpoints for health checks and Prometheus metrics.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use slurmex_metrics::{Collector, PrometheusEmitter, ScrapeError, scrape};
use slurmex_parsers::OutputProvider;
use std::sync::Arc;

/// Shared application state.
///
/// Holds no scrape data: every request recomputes from fresh command output.
pub struct AppState {
    pub provider: Arc<dyn OutputProvider>,
    pub collectors: Vec<Box<dyn Collector>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn OutputProvider>, collectors: Vec<Box<dyn Collector>>) -> Self {
        Self {
            provider,
            collectors,
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// Run one scrape and render it.
async fn render(state: &AppState) -> Result<(String, String), ScrapeError> {
    let mut emitter = PrometheusEmitter::new();
    scrape(&state.collectors, state.provider.as_ref(), &mut emitter).await?;
    Ok((emitter.content_type(), emitter.encode()?))
}

/// Prometheus metrics endpoint
async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match render(&state).await {
        Ok((content_type, body)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}
