//! Types for the stock price exporter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest observed price for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol, e.g. "AAPL"
    pub symbol: String,

    /// Current price
    pub price: f64,

    /// When the quote was fetched
    pub fetched_at: DateTime<Utc>,

    /// Data source
    pub source: String,
}

impl Quote {
    /// Create a quote fetched now
    pub fn new(symbol: impl Into<String>, price: f64, source: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            fetched_at: Utc::now(),
            source: source.into(),
        }
    }

    /// Get the age of the quote in seconds
    pub fn age(&self) -> std::time::Duration {
        let duration = Utc::now().signed_duration_since(self.fetched_at);
        std::time::Duration::from_secs(duration.num_seconds().max(0) as u64)
    }
}

/// Outcome of one poll over every configured symbol
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Symbols whose price was updated, in poll order
    pub updated: Vec<String>,
    /// Symbols whose fetch failed, in poll order
    pub failed: Vec<String>,
}

impl TickReport {
    /// Number of fetches attempted in the tick
    pub fn attempted(&self) -> usize {
        self.updated.len() + self.failed.len()
    }
}

/// Overall exporter health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Every configured symbol has a price
    Healthy,
    /// Some configured symbols have no price yet
    Degraded,
    /// No price at all
    Unhealthy,
}

/// Per-symbol entry of the health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    pub symbol: String,
    pub price: f64,
    pub last_updated: DateTime<Utc>,
    pub age_secs: u64,
}

/// Document served at `/healthz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub tracked_symbols: Vec<String>,
    pub available_prices: usize,
    pub missing_symbols: Vec<String>,
    pub prices: Vec<PriceEntry>,
    pub fetch: crate::metrics::FetchStats,
    pub last_checked: DateTime<Utc>,
}
