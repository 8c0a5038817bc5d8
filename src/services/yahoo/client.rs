//! REST client for the Yahoo Finance chart endpoint.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::Url;
use tracing::{debug, warn};

use super::messages::{ChartResponse, ChartResult};
use crate::services::market_data::MarketDataError;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; expo-screener/0.1)";
const ERROR_BODY_LIMIT: usize = 200;

pub struct YahooRestClient {
    base_url: String,
    http: reqwest::Client,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl YahooRestClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            max_retries: 0,
            min_retry_delay: Duration::from_millis(200),
        }
    }

    pub fn with_retries(mut self, max_retries: usize, min_retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.min_retry_delay = min_retry_delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Daily chart between two unix timestamps, retried on transient failures.
    pub async fn fetch_daily_chart(
        &self,
        symbol: &str,
        period1: i64,
        period2: i64,
    ) -> Result<ChartResult, MarketDataError> {
        let fetch = || async { self.fetch_daily_chart_once(symbol, period1, period2).await };

        fetch
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(self.min_retry_delay)
                    .with_max_times(self.max_retries),
            )
            .when(MarketDataError::is_transient)
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %e,
                    retry_in_ms = delay.as_millis() as u64,
                    "Yahoo: chart request failed, retrying"
                );
            })
            .await
    }

    /// `{base}/v8/finance/chart/{symbol}` with the symbol encoded as a single
    /// path segment.
    fn chart_url(&self, symbol: &str) -> Result<Url, MarketDataError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MarketDataError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| MarketDataError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }

    async fn fetch_daily_chart_once(
        &self,
        symbol: &str,
        period1: i64,
        period2: i64,
    ) -> Result<ChartResult, MarketDataError> {
        let url = self.chart_url(symbol)?;
        debug!(symbol = %symbol, url = %url, "Yahoo: requesting daily chart");

        let response = self
            .http
            .get(url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() == 404 {
            return Err(MarketDataError::no_data(symbol));
        }
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let parsed: ChartResponse =
            serde_json::from_str(&body).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        if let Some(err) = parsed.chart.error {
            debug!(
                symbol = %symbol,
                code = %err.code,
                description = %err.description,
                "Yahoo: chart error"
            );
            return Err(MarketDataError::no_data(symbol));
        }

        parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::no_data(symbol))
    }
}
