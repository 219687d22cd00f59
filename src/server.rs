//! HTTP server exposing the metric store
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/metrics` | Prometheus exposition of the last known prices |
//! | GET | `/healthz` | JSON health report |

use crate::{
    constants::EXPOSITION_CONTENT_TYPE, exposition::render_prometheus, store::MetricStore,
    tracker::PriceTracker,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct ServerState {
    pub store: MetricStore,
    pub tracker: Arc<PriceTracker>,
}

impl ServerState {
    /// Creates state reading from the tracker's own store
    pub fn new(tracker: Arc<PriceTracker>) -> Self {
        Self {
            store: tracker.store().clone(),
            tracker,
        }
    }
}

/// Builds the router serving `/metrics` and `/healthz`
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/metrics", get(prometheus_metrics))
        .route("/healthz", get(health))
        .with_state(state)
}

/// Serves the router on an already bound listener until the server fails
pub async fn serve(listener: TcpListener, state: ServerState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Starting Prometheus metrics server");
    }
    axum::serve(listener, build_router(state)).await
}

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<ServerState>) -> impl IntoResponse {
    let quotes = state.store.snapshot().await;
    let body = render_prometheus(&quotes);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        body,
    )
}

/// GET /healthz
pub async fn health(State(state): State<ServerState>) -> impl IntoResponse {
    Json(state.tracker.health_check().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use crate::types::Quote;

    fn test_state() -> ServerState {
        let tracker = PriceTracker::new(
            vec!["AAPL".to_string()],
            Arc::new(MockProvider::new()),
            MetricStore::new(),
        );
        ServerState::new(Arc::new(tracker))
    }

    #[tokio::test]
    async fn test_prometheus_endpoint_returns_text() {
        let state = test_state();
        state.store.set(Quote::new("AAPL", 150.0, "test")).await;

        let resp = prometheus_metrics(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain; version=0.0.4"));

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("stock_prom_value{stock=\"AAPL\"} 150\n"));
    }

    #[tokio::test]
    async fn test_health_endpoint_returns_json() {
        let resp = health(State(test_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["missing_symbols"][0], "AAPL");
    }
}
