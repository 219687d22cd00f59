//! Constants for the stock price exporter
//!
//! Defaults for everything the command line can override, plus the fixed
//! names of the exported metric.

/// Default time between two polls of the quote API (in seconds)
pub const DEFAULT_INTERVAL_SECS: i64 = 30;

/// Longest accepted poll interval (in seconds), one year
pub const MAX_INTERVAL_SECS: i64 = 365 * 24 * 60 * 60;

/// Default port for the metrics server
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default address the metrics server binds to
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0";

/// Finnhub API base URL
pub const FINNHUB_API_URL: &str = "https://finnhub.io/api/v1";

/// Finnhub API endpoint for quote queries
pub const FINNHUB_QUOTE_ENDPOINT: &str = "/quote";

/// User agent for HTTP requests
pub const USER_AGENT: &str = concat!("promstock/", env!("CARGO_PKG_VERSION"));

/// Name of the exported gauge
pub const METRIC_NAME: &str = "stock_prom_value";

/// Help text of the exported gauge
pub const METRIC_HELP: &str = "Current stock price with stock label";

/// Label carrying the symbol on each sample
pub const METRIC_LABEL: &str = "stock";

/// Content type of the Prometheus text exposition format
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Number of fetch samples kept for latency percentiles
pub const MAX_FETCH_SAMPLES: usize = 100;
