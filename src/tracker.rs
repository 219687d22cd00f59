//! Poll loop publishing stock prices into the metric store
//!
//! On every tick the tracker fetches each configured symbol in order and
//! records successful prices. A failed symbol is logged and skipped; its
//! previous price stays in the store until a later fetch succeeds.

use crate::{
    constants::MAX_INTERVAL_SECS,
    metrics::FetchMetrics,
    provider::QuoteProvider,
    store::MetricStore,
    types::{HealthReport, HealthStatus, PriceEntry, TickReport},
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{interval_at, Interval, MissedTickBehavior};

/// Source of poll ticks
///
/// Production code uses [`IntervalTicker`]; tests substitute a ticker that
/// fires a fixed number of times without waiting.
#[async_trait]
pub trait Ticker: Send {
    /// Waits for the next tick. Returns false once the ticker is exhausted.
    async fn tick(&mut self) -> bool;
}

/// Wall-clock ticker with a fixed period
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// Creates a ticker firing every `period`
    ///
    /// The first tick fires one full period after creation, or right away
    /// when `immediate` is set. `period` must be non-zero; periods longer
    /// than [`MAX_INTERVAL_SECS`] are clamped so deadlines cannot overflow.
    pub fn new(period: Duration, immediate: bool) -> Self {
        let period = period.min(Duration::from_secs(MAX_INTERVAL_SECS as u64));
        let now = tokio::time::Instant::now();
        let start = if immediate { now } else { now + period };
        let mut interval = interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Polls a quote provider for a fixed list of symbols
pub struct PriceTracker {
    symbols: Vec<String>,
    provider: Arc<dyn QuoteProvider>,
    store: MetricStore,
    metrics: FetchMetrics,
}

impl PriceTracker {
    /// Creates a tracker writing into `store`
    pub fn new(symbols: Vec<String>, provider: Arc<dyn QuoteProvider>, store: MetricStore) -> Self {
        let metrics = FetchMetrics::new(provider.provider_name());
        Self {
            symbols,
            provider,
            store,
            metrics,
        }
    }

    /// Configured symbols, in poll order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Handle to the store the tracker writes into
    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    /// Handle to the fetch statistics
    pub fn fetch_metrics(&self) -> &FetchMetrics {
        &self.metrics
    }

    /// Returns the name of the current provider
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Runs one tick: fetches every symbol once, in configured order
    pub async fn poll_once(&self) -> TickReport {
        let mut report = TickReport::default();

        for symbol in &self.symbols {
            let start = Instant::now();
            match self.provider.fetch_quote(symbol).await {
                Ok(quote) => {
                    self.metrics.record_fetch(start.elapsed(), true).await;
                    tracing::info!(
                        symbol = %symbol,
                        price = quote.price,
                        "The current price of {} is ${:.2}",
                        symbol,
                        quote.price
                    );
                    self.store.set(quote).await;
                    report.updated.push(symbol.clone());
                }
                Err(e) => {
                    self.metrics.record_fetch(start.elapsed(), false).await;
                    tracing::error!(symbol = %symbol, error = %e, "Error fetching price");
                    report.failed.push(symbol.clone());
                }
            }
        }

        tracing::debug!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "Poll tick finished"
        );
        report
    }

    /// Polls on every tick until the ticker is exhausted
    ///
    /// With an [`IntervalTicker`] this never returns.
    pub async fn run<T: Ticker>(&self, mut ticker: T) {
        tracing::info!(
            symbols = ?self.symbols,
            provider = self.provider_name(),
            "Starting price tracker"
        );

        while ticker.tick().await {
            self.poll_once().await;
        }

        tracing::info!("Price tracker stopped");
    }

    /// Reports which configured symbols have a price and how fresh it is
    pub async fn health_check(&self) -> HealthReport {
        let quotes = self.store.snapshot().await;

        let mut missing_symbols: Vec<String> = Vec::new();
        for symbol in &self.symbols {
            if !quotes.iter().any(|q| &q.symbol == symbol) && !missing_symbols.contains(symbol) {
                missing_symbols.push(symbol.clone());
            }
        }

        let status = if quotes.is_empty() {
            HealthStatus::Unhealthy
        } else if !missing_symbols.is_empty() {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        let prices = quotes
            .iter()
            .map(|q| PriceEntry {
                symbol: q.symbol.clone(),
                price: q.price,
                last_updated: q.fetched_at,
                age_secs: q.age().as_secs(),
            })
            .collect();

        HealthReport {
            status,
            tracked_symbols: self.symbols.clone(),
            available_prices: quotes.len(),
            missing_symbols,
            prices,
            fetch: self.metrics.stats().await,
            last_checked: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;

    /// Fires a fixed number of ticks without waiting
    struct CountedTicker(usize);

    #[async_trait]
    impl Ticker for CountedTicker {
        async fn tick(&mut self) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    fn tracker(symbols: &[&str], provider: &MockProvider) -> PriceTracker {
        PriceTracker::new(
            symbols.iter().map(|s| s.to_string()).collect(),
            Arc::new(provider.clone()),
            MetricStore::new(),
        )
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_going() {
        let provider = MockProvider::new();
        provider.set_price("AAPL", 150.00);
        provider.set_status("GOOGL", 503);
        let tracker = tracker(&["AAPL", "GOOGL"], &provider);

        let report = tracker.poll_once().await;
        assert_eq!(report.updated, ["AAPL"]);
        assert_eq!(report.failed, ["GOOGL"]);
        assert_eq!(tracker.store().price("AAPL").await, Some(150.00));
        assert_eq!(tracker.store().price("GOOGL").await, None);

        // The next tick attempts both again.
        tracker.poll_once().await;
        assert_eq!(provider.calls(), ["AAPL", "GOOGL", "AAPL", "GOOGL"]);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_price() {
        let provider = MockProvider::new();
        provider.set_price("MSFT", 410.0);
        let tracker = tracker(&["MSFT"], &provider);
        tracker.poll_once().await;

        provider.set_status("MSFT", 500);
        tracker.poll_once().await;
        assert_eq!(tracker.store().price("MSFT").await, Some(410.0));

        provider.clear("MSFT");
        let report = tracker.poll_once().await;
        assert_eq!(report.failed, ["MSFT"]);
        assert_eq!(tracker.store().price("MSFT").await, Some(410.0));

        provider.set_price("MSFT", 412.5);
        tracker.poll_once().await;
        assert_eq!(tracker.store().price("MSFT").await, Some(412.5));
    }

    #[tokio::test]
    async fn test_empty_response_never_stores_zero() {
        let provider = MockProvider::new();
        provider.set_empty("NOPE");
        let tracker = tracker(&["NOPE"], &provider);

        let report = tracker.poll_once().await;
        assert_eq!(report.failed, ["NOPE"]);
        assert!(tracker.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_symbols_are_fetched_twice() {
        let provider = MockProvider::new();
        provider.set_price("AAPL", 150.0);
        let tracker = tracker(&["AAPL", "AAPL"], &provider);

        let report = tracker.poll_once().await;
        assert_eq!(report.attempted(), 2);
        assert_eq!(tracker.store().len().await, 1);
    }

    #[tokio::test]
    async fn test_run_polls_once_per_tick() {
        let provider = MockProvider::new();
        provider.set_price("AAPL", 150.0);
        provider.set_price("TSLA", 250.0);
        let tracker = tracker(&["AAPL", "TSLA"], &provider);

        tracker.run(CountedTicker(5)).await;
        assert_eq!(provider.call_count(), 10);

        let stats = tracker.fetch_metrics().stats().await;
        assert_eq!(stats.provider_name, "mock");
        assert_eq!(stats.total_fetches, 10);
        assert_eq!(stats.failed_fetches, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_waits_one_period() {
        let period = Duration::from_secs(30);
        let start = tokio::time::Instant::now();

        let mut ticker = IntervalTicker::new(period, false);
        assert!(ticker.tick().await);
        assert!(start.elapsed() >= period);
        assert!(ticker.tick().await);
        assert!(start.elapsed() >= period * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_immediate() {
        let period = Duration::from_secs(30);
        let start = tokio::time::Instant::now();

        let mut ticker = IntervalTicker::new(period, true);
        assert!(ticker.tick().await);
        assert!(start.elapsed() < period);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_clamps_huge_period() {
        let start = tokio::time::Instant::now();

        let mut ticker = IntervalTicker::new(Duration::from_secs(i64::MAX as u64), false);
        let max = Duration::from_secs(MAX_INTERVAL_SECS as u64);
        assert!(ticker.tick().await);
        assert!(start.elapsed() >= max);
        assert!(start.elapsed() < max + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = MockProvider::new();
        provider.set_price("AAPL", 150.0);
        let tracker = tracker(&["AAPL", "GOOGL"], &provider);

        assert_eq!(tracker.health_check().await.status, HealthStatus::Unhealthy);

        tracker.poll_once().await;
        let report = tracker.health_check().await;
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.available_prices, 1);
        assert_eq!(report.missing_symbols, ["GOOGL"]);
        assert_eq!(report.fetch.failed_fetches, 1);

        provider.set_price("GOOGL", 140.0);
        tracker.poll_once().await;
        assert_eq!(tracker.health_check().await.status, HealthStatus::Healthy);
    }
}
