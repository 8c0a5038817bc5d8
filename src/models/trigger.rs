//! Trigger engine outputs.

use serde::{Deserialize, Serialize};

/// The engine's verdict for one series, with the latest value of each EMA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerResult {
    pub triggered: bool,
    pub ema_fast_last: f64,
    pub ema_slow_last: f64,
}

/// Marker offsets found by the backward scan. `None` means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMarkers {
    /// Pullback start: last green bar visited before the breach was found.
    pub day_y: Option<usize>,
    /// First bar past `day_y` whose low pierces the fast EMA.
    pub day_z: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConditions {
    pub trend_up: bool,
    pub recent_pullback: bool,
    pub breach_within_window: bool,
    pub no_green_between: bool,
    pub sustained_trend: bool,
}

impl TriggerConditions {
    pub fn all(&self) -> bool {
        self.trend_up
            && self.recent_pullback
            && self.breach_within_window
            && self.no_green_between
            && self.sustained_trend
    }

    /// Names of the sub-conditions that did not hold.
    pub fn failed(&self) -> Vec<&'static str> {
        [
            ("trend_up", self.trend_up),
            ("recent_pullback", self.recent_pullback),
            ("breach_within_window", self.breach_within_window),
            ("no_green_between", self.no_green_between),
            ("sustained_trend", self.sustained_trend),
        ]
        .into_iter()
        .filter(|(_, passed)| !passed)
        .map(|(name, _)| name)
        .collect()
    }
}
