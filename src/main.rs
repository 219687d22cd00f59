//! promstock: expose stock prices as Prometheus metrics.
//!
//! # Usage
//!
//! ```text
//! STOCKS=AAPL,GOOGL API_KEY=... promstock --interval 30 --metrics-port 8080
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use promstock::{
    server::{self, ServerState},
    Args, FinnhubProvider, IntervalTicker, MetricStore, PriceTracker,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().validate()?;

    let provider = FinnhubProvider::with_base_url(config.api_key.clone(), config.api_url.clone())
        .context("failed to create quote provider")?;
    let store = MetricStore::new();
    let tracker = Arc::new(PriceTracker::new(
        config.symbols.clone(),
        Arc::new(provider),
        store,
    ));

    let listener = tokio::net::TcpListener::bind(config.metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics server on {}", config.metrics_addr))?;

    info!(
        symbols = ?config.symbols,
        interval_secs = config.interval.as_secs(),
        fetch_on_start = config.fetch_on_start,
        "Tracking stocks"
    );

    let ticker = IntervalTicker::new(config.interval, config.fetch_on_start);

    // The poll loop never finishes on its own, so only a server failure ends this.
    tokio::select! {
        res = server::serve(listener, ServerState::new(tracker.clone())) => {
            res.context("metrics server failed")?;
        }
        _ = tracker.run(ticker) => {}
    }

    Ok(())
}
