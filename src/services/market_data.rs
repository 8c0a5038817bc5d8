//! Market data provider interface used by the screener.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::bars::PriceBar;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no data for symbol {symbol}")]
    NoData { symbol: String },

    #[error("failed to decode market data: {0}")]
    Decode(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl MarketDataError {
    pub fn no_data(symbol: &str) -> Self {
        MarketDataError::NoData {
            symbol: symbol.to_string(),
        }
    }

    /// Worth retrying: transport failures, throttling and 5xx responses.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            MarketDataError::NoData { .. }
            | MarketDataError::Decode(_)
            | MarketDataError::InvalidUrl(_) => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider {
    /// Complete daily bars covering the trailing `lookback_days` calendar days.
    ///
    /// A symbol without usable data is `MarketDataError::NoData`, never a
    /// partially populated list.
    async fn get_daily_bars(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<PriceBar>, MarketDataError>;
}

/// Fixed bars per symbol, for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    series: HashMap<String, Vec<PriceBar>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.series.insert(symbol.to_uppercase(), bars);
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        _lookback_days: u32,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        match self.series.get(&symbol.to_uppercase()) {
            Some(bars) if !bars.is_empty() => Ok(bars.clone()),
            _ => Err(MarketDataError::no_data(symbol)),
        }
    }
}
