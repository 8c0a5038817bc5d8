//! Folds the scanner's sub-conditions into the final verdict.

use crate::models::bars::PriceSeries;
use crate::models::indicators::EmaSeries;
use crate::models::trigger::{PatternMarkers, TriggerConditions, TriggerResult};
use crate::signals::scanner;

pub struct TriggerEvaluator;

impl TriggerEvaluator {
    /// Evaluate all five sub-conditions for the given markers.
    pub fn evaluate_conditions(
        series: &PriceSeries,
        ema_fast: &EmaSeries,
        ema_slow: &EmaSeries,
        markers: &PatternMarkers,
    ) -> TriggerConditions {
        TriggerConditions {
            trend_up: scanner::trend_up(ema_fast, ema_slow),
            recent_pullback: scanner::recent_pullback(markers),
            breach_within_window: scanner::breach_within_window(markers),
            no_green_between: scanner::no_green_between(series, markers.day_y, markers.day_z),
            sustained_trend: scanner::sustained_trend(ema_fast, ema_slow, markers.day_z),
        }
    }

    /// Package the verdict with the latest EMA values.
    ///
    /// Returns `None` only if either EMA series is empty.
    pub fn to_result(
        conditions: &TriggerConditions,
        ema_fast: &EmaSeries,
        ema_slow: &EmaSeries,
    ) -> Option<TriggerResult> {
        Some(TriggerResult {
            triggered: conditions.all(),
            ema_fast_last: ema_fast.last()?,
            ema_slow_last: ema_slow.last()?,
        })
    }
}
