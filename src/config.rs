//! Command-line and environment configuration
//!
//! Every flag can also be set through the environment variable shown next
//! to it. [`Args::validate`] turns the raw values into a [`Config`] before
//! anything touches the network.

use crate::{
    constants::{
        DEFAULT_INTERVAL_SECS, DEFAULT_LISTEN_ADDR, DEFAULT_METRICS_PORT, FINNHUB_API_URL,
        MAX_INTERVAL_SECS,
    },
    error::ConfigError,
};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Raw command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(name = "promstock", about = "Expose stock prices as prometheus metrics", version)]
pub struct Args {
    /// Comma-separated list of stock symbols (e.g., AAPL,GOOGL,MSFT)
    #[arg(long, env = "STOCKS", default_value = "")]
    pub stocks: String,

    /// Finnhub API key
    #[arg(long = "api-key", env = "API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Interval in seconds between stock price updates
    #[arg(long, env = "INTERVAL", default_value_t = DEFAULT_INTERVAL_SECS, allow_negative_numbers = true)]
    pub interval: i64,

    /// Port to expose Prometheus metrics
    #[arg(long = "metrics-port", env = "METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Address the metrics server binds to
    #[arg(long = "listen-addr", env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Base URL of the quote API
    #[arg(long = "api-url", env = "API_URL", default_value = FINNHUB_API_URL)]
    pub api_url: String,

    /// Fetch prices right away instead of waiting one interval
    #[arg(long = "fetch-on-start", env = "FETCH_ON_START")]
    pub fetch_on_start: bool,
}

/// Validated, immutable configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub symbols: Vec<String>,
    pub api_key: String,
    pub interval: Duration,
    pub metrics_addr: SocketAddr,
    pub api_url: String,
    pub fetch_on_start: bool,
}

impl Args {
    /// Checks the arguments and builds the runtime configuration
    pub fn validate(self) -> Result<Config, ConfigError> {
        let symbols = parse_symbols(&self.stocks);
        if symbols.is_empty() {
            return Err(ConfigError::MissingStocks);
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.interval <= 0 {
            return Err(ConfigError::InvalidInterval(self.interval));
        }
        if self.interval > MAX_INTERVAL_SECS {
            return Err(ConfigError::IntervalTooLarge {
                got: self.interval,
                max: MAX_INTERVAL_SECS,
            });
        }
        let ip: IpAddr = self
            .listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(self.listen_addr.clone()))?;
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }

        Ok(Config {
            symbols,
            api_key: self.api_key,
            interval: Duration::from_secs(self.interval as u64),
            metrics_addr: SocketAddr::new(ip, self.metrics_port),
            api_url: self.api_url,
            fetch_on_start: self.fetch_on_start,
        })
    }
}

/// Splits a comma-separated symbol list, dropping blank entries
fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["promstock"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--stocks", "AAPL,GOOGL", "--api-key", "k"])
            .validate()
            .unwrap();
        assert_eq!(config.symbols, ["AAPL", "GOOGL"]);
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.metrics_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.api_url, "https://finnhub.io/api/v1");
        assert!(!config.fetch_on_start);
    }

    #[test]
    fn test_symbols_are_trimmed() {
        assert_eq!(parse_symbols(" AAPL , ,MSFT,"), ["AAPL", "MSFT"]);
        assert_eq!(parse_symbols("AAPL,AAPL"), ["AAPL", "AAPL"]);
        assert!(parse_symbols(" , ").is_empty());
    }

    #[test]
    fn test_missing_stocks() {
        let err = parse(&["--stocks", "", "--api-key", "k"]).validate().unwrap_err();
        assert_eq!(err, ConfigError::MissingStocks);
        assert!(err.to_string().contains("--stocks"));
    }

    #[test]
    fn test_missing_api_key() {
        let err = parse(&["--stocks", "AAPL", "--api-key", ""]).validate().unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
        assert!(err.to_string().contains("--api-key"));
    }

    #[test]
    fn test_interval_must_be_positive() {
        for interval in ["0", "-5"] {
            let err = parse(&["--stocks", "AAPL", "--api-key", "k", "--interval", interval])
                .validate()
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidInterval(_)));
        }
    }

    #[test]
    fn test_interval_upper_bound() {
        let err = parse(&[
            "--stocks",
            "AAPL",
            "--api-key",
            "k",
            "--interval",
            "9223372036854775807",
        ])
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::IntervalTooLarge {
                got: i64::MAX,
                max: MAX_INTERVAL_SECS,
            }
        );
        assert!(err.to_string().contains("at most 31536000 seconds"));

        let one_year = MAX_INTERVAL_SECS.to_string();
        let config = parse(&["--stocks", "AAPL", "--api-key", "k", "--interval", &one_year])
            .validate()
            .unwrap();
        assert_eq!(config.interval, Duration::from_secs(MAX_INTERVAL_SECS as u64));
    }

    #[test]
    fn test_custom_values() {
        let config = parse(&[
            "--stocks",
            "TSLA",
            "--api-key",
            "k",
            "--interval",
            "5",
            "--metrics-port",
            "9100",
            "--listen-addr",
            "127.0.0.1",
            "--api-url",
            "http://localhost:9000/api/v1",
            "--fetch-on-start",
        ])
        .validate()
        .unwrap();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.metrics_addr, "127.0.0.1:9100".parse().unwrap());
        assert_eq!(config.api_url, "http://localhost:9000/api/v1");
        assert!(config.fetch_on_start);
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = parse(&["--stocks", "AAPL", "--api-key", "k", "--listen-addr", "nope"])
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidListenAddr("nope".to_string()));
    }
}
