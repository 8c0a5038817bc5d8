//! Trigger engine: EMA calculation, marker scan and verdict for one series.

use serde::Serialize;
use tracing::{debug, warn};

use crate::indicators::error::IndicatorError;
use crate::indicators::trend::calculate_ema;
use crate::models::bars::{PriceBar, PriceSeries};
use crate::models::indicators::EmaSeries;
use crate::models::trigger::{PatternMarkers, TriggerConditions, TriggerResult};
use crate::signals::evaluator::TriggerEvaluator;
use crate::signals::scanner::scan_markers;

pub const DEFAULT_FAST_SPAN: usize = 10;
pub const DEFAULT_SLOW_SPAN: usize = 20;

/// Everything the engine derived while evaluating one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerEvaluation {
    pub result: TriggerResult,
    pub markers: PatternMarkers,
    pub conditions: TriggerConditions,
    pub ema_fast: EmaSeries,
    pub ema_slow: EmaSeries,
    /// Fewer bars than the slow span; EMA values are arithmetically correct
    /// but not yet stable.
    pub insufficient_data: bool,
}

/// Stateless evaluator; one instance can be shared across symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEngine {
    fast_span: usize,
    slow_span: usize,
}

impl TriggerEngine {
    pub fn new(fast_span: usize, slow_span: usize) -> Result<Self, IndicatorError> {
        if fast_span == 0 {
            return Err(IndicatorError::InvalidSpan(fast_span));
        }
        if slow_span == 0 {
            return Err(IndicatorError::InvalidSpan(slow_span));
        }
        Ok(Self {
            fast_span,
            slow_span,
        })
    }

    pub fn fast_span(&self) -> usize {
        self.fast_span
    }

    pub fn slow_span(&self) -> usize {
        self.slow_span
    }

    /// Minimum number of bars for stable EMA values.
    pub fn min_reliable_bars(&self) -> usize {
        self.fast_span.max(self.slow_span)
    }

    /// Evaluate bars in any date order.
    ///
    /// Bars are sorted ascending first, so ascending and descending input give
    /// the same result. Duplicate dates or malformed bars fail.
    pub fn check_trigger(&self, bars: &[PriceBar]) -> Result<TriggerResult, IndicatorError> {
        let series = PriceSeries::from_unordered(bars.to_vec())?;
        Ok(self.evaluate(&series)?.result)
    }

    /// Evaluate an already validated series and keep the intermediate state.
    pub fn evaluate(&self, series: &PriceSeries) -> Result<TriggerEvaluation, IndicatorError> {
        let insufficient_data = series.len() < self.min_reliable_bars();
        if insufficient_data {
            warn!(
                bars = series.len(),
                required = self.min_reliable_bars(),
                "TriggerEngine: only {} bars, EMA values are unreliable",
                series.len()
            );
        }

        let ema_fast = calculate_ema(series, self.fast_span)?;
        let ema_slow = calculate_ema(series, self.slow_span)?;

        let markers = scan_markers(series, &ema_fast);
        let conditions =
            TriggerEvaluator::evaluate_conditions(series, &ema_fast, &ema_slow, &markers);
        let result = TriggerEvaluator::to_result(&conditions, &ema_fast, &ema_slow)
            .ok_or(IndicatorError::EmptyInput)?;

        debug!(
            last_date = %series.last().date,
            day_y = ?markers.day_y,
            day_z = ?markers.day_z,
            triggered = result.triggered,
            failed = ?conditions.failed(),
            "TriggerEngine: evaluated {} bars",
            series.len()
        );

        Ok(TriggerEvaluation {
            result,
            markers,
            conditions,
            ema_fast,
            ema_slow,
            insufficient_data,
        })
    }
}

impl Default for TriggerEngine {
    fn default() -> Self {
        Self {
            fast_span: DEFAULT_FAST_SPAN,
            slow_span: DEFAULT_SLOW_SPAN,
        }
    }
}
