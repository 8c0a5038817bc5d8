//! Backward scan over the most recent bars for the pullback/breach markers,
//! and the five sub-conditions derived from them.
//!
//! Offsets count back from the most recent bar: offset 1 is the last bar,
//! offset 10 is ten bars before it.

use crate::models::bars::{PriceBar, PriceSeries};
use crate::models::indicators::EmaSeries;
use crate::models::trigger::PatternMarkers;

/// Number of trailing bars the scan visits.
pub const SCAN_WINDOW: usize = 10;

/// Largest offset at which the pullback may start.
pub const MAX_PULLBACK_OFFSET: usize = 2;

/// Walk offsets `1..=SCAN_WINDOW` from the most recent bar backward.
///
/// Every green bar overwrites `day_y`, so it ends up on the last green bar
/// visited before the breach. A non-green bar whose low is below the fast EMA
/// and that lies past `day_y` sets `day_z`, after which nothing changes.
/// Offsets beyond the start of a short series are not visited.
pub fn scan_markers(series: &PriceSeries, ema_fast: &EmaSeries) -> PatternMarkers {
    let mut markers = PatternMarkers::default();

    for offset in 1..=SCAN_WINDOW.min(series.len()) {
        if markers.day_z.is_some() {
            break;
        }
        let Some(bar) = series.at_offset(offset) else {
            break;
        };

        if bar.is_green() {
            markers.day_y = Some(offset);
        } else if let (Some(day_y), Some(ema)) = (markers.day_y, ema_fast.at_offset(offset)) {
            if bar.low < ema && offset > day_y {
                markers.day_z = Some(offset);
            }
        }
    }

    markers
}

/// Fast EMA above slow EMA at the most recent bar.
pub fn trend_up(ema_fast: &EmaSeries, ema_slow: &EmaSeries) -> bool {
    matches!((ema_fast.last(), ema_slow.last()), (Some(fast), Some(slow)) if fast > slow)
}

/// The pullback started on the last bar or the one before it.
pub fn recent_pullback(markers: &PatternMarkers) -> bool {
    markers
        .day_y
        .is_some_and(|day_y| day_y <= MAX_PULLBACK_OFFSET)
}

/// The breach lies inside the scan window and past the pullback start.
pub fn breach_within_window(markers: &PatternMarkers) -> bool {
    match (markers.day_y, markers.day_z) {
        (Some(day_y), Some(day_z)) => day_z <= SCAN_WINDOW && day_z > day_y,
        // An unset day_y sits before every offset.
        (None, Some(day_z)) => day_z <= SCAN_WINDOW,
        (_, None) => false,
    }
}

/// No green bar strictly between `day_y` and `day_z`.
///
/// Checked against the bars themselves rather than derived from the scan, so
/// it holds for any marker pair. Trivially true when either marker is unset or
/// the markers are adjacent.
pub fn no_green_between(
    series: &PriceSeries,
    day_y: Option<usize>,
    day_z: Option<usize>,
) -> bool {
    match (day_y, day_z) {
        (Some(day_y), Some(day_z)) if day_z > day_y + 1 => !((day_y + 1)..day_z)
            .any(|offset| series.at_offset(offset).is_some_and(PriceBar::is_green)),
        _ => true,
    }
}

/// Fast EMA strictly above slow EMA at every offset from 1 through
/// `day_z + 1`, clamped to the length of the series.
///
/// With `day_z` unset the range is empty and this holds vacuously.
pub fn sustained_trend(ema_fast: &EmaSeries, ema_slow: &EmaSeries, day_z: Option<usize>) -> bool {
    let Some(day_z) = day_z else {
        return true;
    };
    let last = (day_z + 1).min(ema_fast.len()).min(ema_slow.len());

    (1..=last).all(|offset| {
        matches!(
            (ema_fast.at_offset(offset), ema_slow.at_offset(offset)),
            (Some(fast), Some(slow)) if fast > slow
        )
    })
}
