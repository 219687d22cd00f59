//! # promstock
//!
//! Polls the Finnhub quote API for a list of stock symbols and republishes
//! the latest price of each as a Prometheus gauge.
//!
//! ## Architecture
//!
//! ```text
//! IntervalTicker (every --interval seconds)
//!     ↓
//! PriceTracker::poll_once (one fetch per symbol, in order)
//!     ↓
//! QuoteProvider (Finnhub)
//!     ↓
//! MetricStore (last successful price per symbol)
//!     ↓
//! GET /metrics  →  stock_prom_value{stock="AAPL"} 150.12
//! ```
//!
//! A failed fetch is logged and leaves the previous price in place; it never
//! stops the loop. The next tick simply tries again.
//!
//! ## Usage
//!
//! ```no_run
//! use promstock::{FinnhubProvider, MetricStore, PriceTracker};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(FinnhubProvider::new("my-api-key")?);
//! let store = MetricStore::new();
//! let tracker = PriceTracker::new(vec!["AAPL".to_string()], provider, store.clone());
//!
//! tracker.poll_once().await;
//! if let Some(price) = store.price("AAPL").await {
//!     println!("AAPL: ${:.2}", price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod exposition;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod server;
pub mod store;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use config::{Args, Config};
pub use error::{ConfigError, ProviderError};
pub use metrics::{FetchMetrics, FetchStats};
pub use provider::QuoteProvider;
pub use providers::FinnhubProvider;
pub use store::MetricStore;
pub use tracker::{IntervalTicker, PriceTracker, Ticker};
pub use types::{HealthReport, HealthStatus, Quote, TickReport};
