//! Provider abstraction for fetching stock quotes from external APIs

use crate::{error::ProviderError, types::Quote};
use async_trait::async_trait;

/// Trait for quote providers
///
/// The poll loop only talks to this trait, so tests can drive it with
/// [`mock::MockProvider`] instead of a live API.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the current quote for a single symbol
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol, non-empty
    ///
    /// # Returns
    /// The quote or a typed error describing why the fetch failed
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}
