//! Finnhub quote provider implementation

use crate::{
    constants::{FINNHUB_API_URL, FINNHUB_QUOTE_ENDPOINT, USER_AGENT},
    error::ProviderError,
    provider::QuoteProvider,
    types::Quote,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Finnhub API response for `/quote`
///
/// Finnhub answers unknown symbols with a zeroed document (sometimes with
/// `null` in the change fields), so every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
struct FinnhubQuote {
    #[serde(rename = "c")]
    current_price: Option<f64>,
    #[serde(rename = "h")]
    high_price: Option<f64>,
    #[serde(rename = "l")]
    low_price: Option<f64>,
    #[serde(rename = "o")]
    open_price: Option<f64>,
    #[serde(rename = "pc")]
    previous_close: Option<f64>,
    #[serde(rename = "d")]
    change: Option<f64>,
    #[serde(rename = "dp")]
    percent_change: Option<f64>,
    #[serde(rename = "t")]
    timestamp: Option<i64>,
}

impl FinnhubQuote {
    /// True when the provider had no data for the symbol
    fn is_empty(&self) -> bool {
        let zero = |v: Option<f64>| v.unwrap_or(0.0) == 0.0;
        zero(self.current_price)
            && zero(self.high_price)
            && zero(self.low_price)
            && zero(self.open_price)
            && zero(self.previous_close)
            && zero(self.change)
            && zero(self.percent_change)
            && self.timestamp.unwrap_or(0) == 0
    }
}

/// Finnhub quote provider
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubProvider {
    /// Creates a provider talking to the public Finnhub API
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, FINNHUB_API_URL)
    }

    /// Creates a provider talking to a custom base URL
    ///
    /// No request timeout is configured; the transport default applies.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds the quote endpoint URL (query parameters are added per request)
    fn quote_url(&self) -> String {
        format!("{}{}", self.base_url, FINNHUB_QUOTE_ENDPOINT)
    }

    /// Parses a quote body into a price
    fn parse_response(symbol: &str, body: &[u8]) -> Result<f64, ProviderError> {
        let data: FinnhubQuote =
            serde_json::from_slice(body).map_err(|source| ProviderError::Parse {
                symbol: symbol.to_string(),
                source,
            })?;

        if data.is_empty() {
            return Err(ProviderError::empty(symbol));
        }

        Ok(data.current_price.unwrap_or(0.0))
    }
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        tracing::debug!(symbol, url = %self.quote_url(), "Fetching quote from Finnhub");

        let response = self
            .client
            .get(self.quote_url())
            .query(&[("symbol", symbol), ("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| ProviderError::Network {
                symbol: symbol.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::Status {
                symbol: symbol.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ProviderError::Body {
                symbol: symbol.to_string(),
                source,
            })?;

        let price = Self::parse_response(symbol, &body)?;
        Ok(Quote::new(symbol, price, self.provider_name()))
    }

    fn provider_name(&self) -> &'static str {
        "finnhub"
    }
}
