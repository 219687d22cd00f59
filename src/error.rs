//! Error types for the stock price exporter

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when fetching a quote from a provider
///
/// Every variant names the symbol so a log line is self-contained.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("error fetching stock data for {symbol}: {source}")]
    Network {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with something other than 200 OK
    #[error("received non-200 status code for {symbol}: {status}")]
    Status { symbol: String, status: StatusCode },

    /// Response body could not be read
    #[error("error reading response body for {symbol}: {source}")]
    Body {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not a valid quote document
    #[error("error parsing quote JSON for {symbol}: {source}")]
    Parse {
        symbol: String,
        #[source]
        source: serde_json::Error,
    },

    /// Provider returned the all-zero quote it uses for unknown symbols
    #[error("got empty response for {symbol}")]
    EmptyResponse { symbol: String },

    /// Provider could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ProviderError {
    /// Creates an EmptyResponse error
    pub fn empty(symbol: &str) -> Self {
        Self::EmptyResponse {
            symbol: symbol.to_string(),
        }
    }

    /// Symbol the failed fetch was for, if any
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Network { symbol, .. }
            | Self::Status { symbol, .. }
            | Self::Body { symbol, .. }
            | Self::Parse { symbol, .. }
            | Self::EmptyResponse { symbol } => Some(symbol),
            Self::Client(_) => None,
        }
    }
}

/// Errors raised while validating startup configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No symbol given
    #[error("you must provide at least one stock symbol using --stocks or STOCKS")]
    MissingStocks,

    /// No API key given
    #[error("you must provide an API key using --api-key or API_KEY")]
    MissingApiKey,

    /// Interval is zero or negative
    #[error("interval must be greater than 0 (got {0})")]
    InvalidInterval(i64),

    /// Interval is longer than the timer can schedule
    #[error("interval must be at most {max} seconds (got {got})")]
    IntervalTooLarge { got: i64, max: i64 },

    /// Listen address does not parse as an IP address
    #[error("invalid listen address {0:?} given with --listen-addr or LISTEN_ADDR")]
    InvalidListenAddr(String),

    /// API base URL is empty
    #[error("you must provide a non-empty API URL using --api-url or API_URL")]
    MissingApiUrl,
}
