//! Yahoo Finance market data provider implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::debug;

use super::client::YahooRestClient;
use crate::models::bars::PriceBar;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

pub struct YahooMarketDataProvider {
    client: Arc<YahooRestClient>,
}

impl YahooMarketDataProvider {
    pub fn new(client: Arc<YahooRestClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<YahooRestClient> {
        &self.client
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        let now = Utc::now();
        let start = now - Duration::days(i64::from(lookback_days));

        let chart = self
            .client
            .fetch_daily_chart(symbol, start.timestamp(), now.timestamp())
            .await?;
        let bars = chart.into_bars();

        debug!(
            symbol = %symbol,
            count = bars.len(),
            lookback_days = lookback_days,
            "Yahoo: fetched {} daily bars for {}",
            bars.len(),
            symbol
        );

        if bars.is_empty() {
            return Err(MarketDataError::no_data(symbol));
        }
        Ok(bars)
    }
}
