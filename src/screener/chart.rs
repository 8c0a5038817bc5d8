//! Candlestick chart payload with EMA overlays.
//!
//! Rendering is left to the client; this only assembles the series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::indicators::error::IndicatorError;
use crate::indicators::trend::calculate_ema;
use crate::models::bars::{PriceBar, PriceSeries};
use crate::models::indicators::EmaSeries;
use crate::signals::engine::TriggerEngine;

pub const FAST_EMA_COLOR: &str = "darkgreen";
pub const SLOW_EMA_COLOR: &str = "orange";

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub symbol: String,
    pub title: String,
    pub candles: Vec<PriceBar>,
    pub overlays: Vec<EmaOverlay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmaOverlay {
    pub label: String,
    pub color: String,
    pub span: usize,
    pub points: Vec<OverlayPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl EmaOverlay {
    fn new(series: &PriceSeries, ema: &EmaSeries, color: &str) -> Self {
        let points = series
            .bars()
            .iter()
            .zip(&ema.values)
            .map(|(bar, &value)| OverlayPoint {
                date: bar.date,
                value,
            })
            .collect();

        Self {
            label: format!("{}-Day EMA", ema.span),
            color: color.to_string(),
            span: ema.span,
            points,
        }
    }
}

pub fn build_chart(
    symbol: &str,
    series: &PriceSeries,
    engine: &TriggerEngine,
) -> Result<ChartData, IndicatorError> {
    let fast = calculate_ema(series, engine.fast_span())?;
    let slow = calculate_ema(series, engine.slow_span())?;

    Ok(ChartData {
        symbol: symbol.to_string(),
        title: format!("{} Stock Price (Candlestick)", symbol),
        candles: series.bars().to_vec(),
        overlays: vec![
            EmaOverlay::new(series, &fast, FAST_EMA_COLOR),
            EmaOverlay::new(series, &slow, SLOW_EMA_COLOR),
        ],
    })
}
