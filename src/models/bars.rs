//! Daily price bars and the ordered series the trigger engine reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;

/// One trading day for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// A bar that closed above its open.
    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    /// Check that prices are positive and finite, the range is not inverted
    /// and volume is non-negative.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(IndicatorError::InvalidBar {
                    date: self.date,
                    reason: format!("{} must be a positive finite price, got {}", field, value),
                });
            }
        }

        if self.high < self.low {
            return Err(IndicatorError::InvalidBar {
                date: self.date,
                reason: format!("high {} is below low {}", self.high, self.low),
            });
        }

        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(IndicatorError::InvalidBar {
                date: self.date,
                reason: format!("volume must be non-negative, got {}", self.volume),
            });
        }

        Ok(())
    }
}

/// Bars for a single symbol, strictly increasing by date.
///
/// The constructors are the only way in, so every `PriceSeries` is non-empty,
/// sorted ascending and free of duplicate dates. Offsets count back from the
/// most recent bar: offset 1 is the last bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from bars that must already be in ascending date order.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, IndicatorError> {
        if bars.is_empty() {
            return Err(IndicatorError::EmptyInput);
        }

        for bar in &bars {
            bar.validate()?;
        }

        for pair in bars.windows(2) {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current == previous {
                return Err(IndicatorError::DuplicateDate(current));
            }
            if current < previous {
                return Err(IndicatorError::NonMonotonicDates { previous, current });
            }
        }

        Ok(Self { bars })
    }

    /// Sort bars ascending by date, then build the series.
    ///
    /// Duplicate dates are still rejected after sorting.
    pub fn from_unordered(mut bars: Vec<PriceBar>) -> Result<Self, IndicatorError> {
        bars.sort_by_key(|bar| bar.date);
        Self::new(bars)
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar.
    pub fn last(&self) -> &PriceBar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    /// Bar `offset` positions back from the end, one-indexed.
    pub fn at_offset(&self, offset: usize) -> Option<&PriceBar> {
        if offset == 0 || offset > self.bars.len() {
            return None;
        }
        self.bars.get(self.bars.len() - offset)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn into_bars(self) -> Vec<PriceBar> {
        self.bars
    }
}
