//! Shared data models spanning the engine layers.

pub mod bars;
pub mod indicators;
pub mod trigger;

pub use bars::{PriceBar, PriceSeries};
pub use indicators::EmaSeries;
pub use trigger::{PatternMarkers, TriggerConditions, TriggerResult};
