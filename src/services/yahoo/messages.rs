//! Yahoo Finance chart API response types.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use crate::models::bars::PriceBar;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// Column-oriented OHLCV; Yahoo uses `null` for sessions without a print.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Convert the columns into complete bars, oldest first.
    ///
    /// Rows with any missing field or an invalid price are dropped. If the
    /// exchange reports two rows for the same local date, the later one wins.
    pub fn into_bars(self) -> Vec<PriceBar> {
        let offset = self.meta.gmtoffset.unwrap_or(0);
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        let mut rows: Vec<(i64, PriceBar)> = Vec::with_capacity(self.timestamp.len());
        for (i, &ts) in self.timestamp.iter().enumerate() {
            let fields = (
                column(&quote.open, i),
                column(&quote.high, i),
                column(&quote.low, i),
                column(&quote.close, i),
                column(&quote.volume, i),
            );
            let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = fields else {
                continue;
            };
            let Some(date) = local_date(ts, offset) else {
                continue;
            };

            let bar = PriceBar::new(date, open, high, low, close, volume);
            if let Err(e) = bar.validate() {
                warn!(symbol = %self.meta.symbol, error = %e, "Yahoo: dropping invalid bar");
                continue;
            }
            rows.push((ts, bar));
        }

        rows.sort_by_key(|(ts, _)| *ts);

        let mut bars: Vec<PriceBar> = Vec::with_capacity(rows.len());
        for (_, bar) in rows {
            match bars.last_mut() {
                Some(previous) if previous.date == bar.date => *previous = bar,
                _ => bars.push(bar),
            }
        }
        bars
    }
}

fn column(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}
