//! EMA (Exponential Moving Average) indicator

use crate::indicators::error::IndicatorError;
use crate::models::bars::PriceSeries;
use crate::models::indicators::EmaSeries;

/// Smoothing factor for a given span: `2 / (span + 1)`.
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Compute the full EMA series for `values`.
///
/// Seeded with the first observation and updated recursively, so the output
/// has the same length as the input and no warm-up padding:
///
/// ```text
/// ema[0] = x[0]
/// ema[t] = α·x[t] + (1 − α)·ema[t−1]
/// ```
pub fn ema_series(values: &[f64], span: usize) -> Result<Vec<f64>, IndicatorError> {
    if span == 0 {
        return Err(IndicatorError::InvalidSpan(span));
    }
    let (&first, rest) = values.split_first().ok_or(IndicatorError::EmptyInput)?;

    let alpha = smoothing_factor(span);
    let mut result = Vec::with_capacity(values.len());
    let mut current = first;
    result.push(current);

    for &value in rest {
        current = alpha * value + (1.0 - alpha) * current;
        result.push(current);
    }

    Ok(result)
}

/// Calculate the EMA of closing prices for a series.
pub fn calculate_ema(series: &PriceSeries, span: usize) -> Result<EmaSeries, IndicatorError> {
    let values = ema_series(&series.closes(), span)?;
    Ok(EmaSeries::new(span, values))
}

/// Calculate several EMAs at once.
pub fn calculate_emas(
    series: &PriceSeries,
    spans: &[usize],
) -> Result<Vec<EmaSeries>, IndicatorError> {
    spans
        .iter()
        .map(|&span| calculate_ema(series, span))
        .collect()
}
