//! In-memory store for the last known price of each symbol

use crate::types::Quote;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared gauge: symbol -> last successful quote
///
/// Cloning is cheap and every clone sees the same data. The poll loop is the
/// only writer; HTTP handlers read. Each write locks for a single symbol, so
/// a concurrent scrape may see a tick half applied but never a torn entry.
#[derive(Clone, Default)]
pub struct MetricStore {
    quotes: Arc<RwLock<BTreeMap<String, Quote>>>,
}

impl MetricStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful quote, replacing the previous one for its symbol
    pub async fn set(&self, quote: Quote) {
        let mut quotes = self.quotes.write().await;
        tracing::debug!(symbol = %quote.symbol, price = quote.price, "Updated stored price");
        quotes.insert(quote.symbol.clone(), quote);
    }

    /// Gets the last known quote for a symbol
    pub async fn get(&self, symbol: &str) -> Option<Quote> {
        self.quotes.read().await.get(symbol).cloned()
    }

    /// Gets the last known price for a symbol
    pub async fn price(&self, symbol: &str) -> Option<f64> {
        self.quotes.read().await.get(symbol).map(|q| q.price)
    }

    /// Copies every stored quote, ordered by symbol
    pub async fn snapshot(&self) -> Vec<Quote> {
        self.quotes.read().await.values().cloned().collect()
    }

    /// Number of symbols with a price
    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    /// True when no symbol has a price yet
    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }
}
