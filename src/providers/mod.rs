//! Quote provider implementations

pub mod finnhub;

pub use finnhub::FinnhubProvider;
