//! Screens a list of symbols through the trigger engine.
//!
//! Each symbol is fetched and evaluated independently; a failure for one
//! symbol is reported alongside the rows and never affects the others. No
//! state is kept between runs.

pub mod chart;
pub mod symbols;
pub mod table;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ScreenerConfig;
use crate::indicators::error::IndicatorError;
use crate::metrics::Metrics;
use crate::models::bars::PriceSeries;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::services::yahoo::{YahooMarketDataProvider, YahooRestClient};
use crate::signals::engine::{TriggerEngine, TriggerEvaluation};

pub use chart::{build_chart, ChartData, EmaOverlay, OverlayPoint};
pub use symbols::{normalize_symbol, parse_symbols};
pub use table::{render_table, trigger_label};

/// Symbols fetched at the same time during one screening run.
pub const DEFAULT_SCREEN_CONCURRENCY: usize = 8;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Which rows a screening run returns. `triggered` is reported either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowFilter {
    #[default]
    All,
    TriggeredOnly,
}

impl RowFilter {
    pub fn keeps(&self, row: &ScreenRow) -> bool {
        match self {
            RowFilter::All => true,
            RowFilter::TriggeredOnly => row.triggered,
        }
    }
}

/// One symbol's last bar, EMA values and verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRow {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub triggered: bool,
    pub insufficient_data: bool,
}

impl ScreenRow {
    pub fn from_evaluation(symbol: &str, series: &PriceSeries, evaluation: &TriggerEvaluation) -> Self {
        let last = series.last();
        Self {
            symbol: symbol.to_string(),
            date: last.date,
            open: last.open,
            high: last.high,
            low: last.low,
            close: last.close,
            volume: last.volume,
            ema_fast: evaluation.result.ema_fast_last,
            ema_slow: evaluation.result.ema_slow_last,
            triggered: evaluation.result.triggered,
            insufficient_data: evaluation.insufficient_data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenFailure {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    pub filter: RowFilter,
    pub screened: usize,
    pub triggered: usize,
    pub rows: Vec<ScreenRow>,
    pub failures: Vec<ScreenFailure>,
}

pub struct Screener {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    engine: TriggerEngine,
    lookback_days: u32,
    concurrency: usize,
    metrics: Option<Arc<Metrics>>,
}

impl Screener {
    pub fn new(
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        engine: TriggerEngine,
        lookback_days: u32,
    ) -> Self {
        Self {
            provider,
            engine,
            lookback_days,
            concurrency: DEFAULT_SCREEN_CONCURRENCY,
            metrics: None,
        }
    }

    /// Screener backed by the Yahoo provider described by `config`.
    pub fn from_config(config: &ScreenerConfig) -> Result<Self, ScreenError> {
        let engine = TriggerEngine::new(config.fast_span, config.slow_span)?;
        let client = YahooRestClient::new(config.yahoo_base_url.clone(), config.http_timeout)?
            .with_retries(config.http_max_retries, Duration::from_millis(250));
        let provider = YahooMarketDataProvider::new(Arc::new(client));
        Ok(Self::new(Arc::new(provider), engine, config.lookback_days)
            .with_concurrency(config.screen_concurrency))
    }

    /// Cap on in-flight symbol fetches; zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn engine(&self) -> &TriggerEngine {
        &self.engine
    }

    async fn load_series(&self, symbol: &str) -> Result<PriceSeries, ScreenError> {
        let bars = self
            .provider
            .get_daily_bars(symbol, self.lookback_days)
            .await?;
        if bars.is_empty() {
            return Err(MarketDataError::no_data(symbol).into());
        }
        Ok(PriceSeries::from_unordered(bars)?)
    }

    /// Fetch and evaluate a single symbol.
    pub async fn screen_symbol(&self, symbol: &str) -> Result<ScreenRow, ScreenError> {
        let series = self.load_series(symbol).await?;
        let evaluation = self.engine.evaluate(&series)?;

        if evaluation.insufficient_data {
            warn!(
                symbol = %symbol,
                bars = series.len(),
                "Screener: {} has too few bars for stable EMAs",
                symbol
            );
        }
        debug!(
            symbol = %symbol,
            triggered = evaluation.result.triggered,
            failed = ?evaluation.conditions.failed(),
            "Screener: evaluated {}",
            symbol
        );

        if let Some(ref metrics) = self.metrics {
            metrics.screen_evaluations_total.inc();
            if evaluation.result.triggered {
                metrics.screen_triggers_total.inc();
            }
        }

        Ok(ScreenRow::from_evaluation(symbol, &series, &evaluation))
    }

    /// Screen all symbols, at most `concurrency` at a time; rows keep the
    /// input order.
    pub async fn screen(&self, symbols: &[String], filter: RowFilter) -> ScreenReport {
        let pending: Vec<_> = symbols
            .iter()
            .map(|symbol| self.screen_symbol(symbol))
            .collect();
        let outcomes: Vec<_> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut rows = Vec::new();
        let mut failures = Vec::new();
        let mut screened = 0;
        let mut triggered = 0;

        for (symbol, outcome) in symbols.iter().zip(outcomes) {
            match outcome {
                Ok(row) => {
                    screened += 1;
                    if row.triggered {
                        triggered += 1;
                    }
                    if filter.keeps(&row) {
                        rows.push(row);
                    }
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Screener: skipping {}", symbol);
                    if let Some(ref metrics) = self.metrics {
                        metrics.screen_failures_total.inc();
                    }
                    failures.push(ScreenFailure {
                        symbol: symbol.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            requested = symbols.len(),
            screened = screened,
            triggered = triggered,
            failed = failures.len(),
            "Screener: screened {} symbols, {} triggered",
            screened,
            triggered
        );

        ScreenReport {
            filter,
            screened,
            triggered,
            rows,
            failures,
        }
    }

    /// Chart payload for one symbol, fetched fresh.
    pub async fn chart(&self, symbol: &str) -> Result<ChartData, ScreenError> {
        let series = self.load_series(symbol).await?;
        Ok(build_chart(symbol, &series, &self.engine)?)
    }
}
