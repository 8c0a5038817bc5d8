//! Unit tests for the marker scan and each sub-condition

use expo_screener::indicators::trend::calculate_ema;
use expo_screener::models::indicators::EmaSeries;
use expo_screener::models::trigger::PatternMarkers;
use expo_screener::signals::scanner::{
    breach_within_window, no_green_between, recent_pullback, scan_markers, sustained_trend,
    trend_up,
};

use crate::fixtures::{falling_closes, pattern_series, rising_closes, Kind};

fn markers(day_y: Option<usize>, day_z: Option<usize>) -> PatternMarkers {
    PatternMarkers { day_y, day_z }
}

#[test]
fn test_scan_finds_pullback_and_breach() {
    let series = pattern_series(
        &rising_closes(25),
        &[(1, Kind::Green), (2, Kind::Green), (5, Kind::RedBreach)],
    );
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), markers(Some(2), Some(5)));
}

#[test]
fn test_day_y_advances_to_last_green_before_breach() {
    // Greens at 1 and 3: the marker ends on 3, not the first green seen.
    let series = pattern_series(
        &rising_closes(25),
        &[(1, Kind::Green), (3, Kind::Green), (5, Kind::RedBreach)],
    );
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), markers(Some(3), Some(5)));
}

#[test]
fn test_scan_stops_at_first_breach() {
    let series = pattern_series(
        &rising_closes(25),
        &[
            (1, Kind::Green),
            (4, Kind::RedBreach),
            (6, Kind::Green),
            (8, Kind::RedBreach),
        ],
    );
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), markers(Some(1), Some(4)));
}

#[test]
fn test_green_bar_below_ema_becomes_day_y_not_day_z() {
    let series = pattern_series(
        &rising_closes(25),
        &[(1, Kind::Green), (3, Kind::GreenBreach), (4, Kind::RedBreach)],
    );
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), markers(Some(3), Some(4)));
}

#[test]
fn test_breach_before_any_green_is_ignored() {
    let series = pattern_series(
        &rising_closes(25),
        &[(2, Kind::RedBreach), (4, Kind::Green)],
    );
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), markers(Some(4), None));
}

#[test]
fn test_no_green_bars_leaves_markers_unset() {
    let series = pattern_series(&rising_closes(25), &[(5, Kind::RedBreach)]);
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), PatternMarkers::default());
}

#[test]
fn test_scan_ignores_bars_older_than_window() {
    let series = pattern_series(
        &rising_closes(25),
        &[(11, Kind::Green), (12, Kind::RedBreach)],
    );
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), PatternMarkers::default());
}

#[test]
fn test_scan_on_short_series() {
    let series = pattern_series(&rising_closes(4), &[(1, Kind::Green), (3, Kind::RedBreach)]);
    let fast = calculate_ema(&series, 10).unwrap();
    assert_eq!(scan_markers(&series, &fast), markers(Some(1), Some(3)));
}

#[test]
fn test_trend_up() {
    let rising = pattern_series(&rising_closes(25), &[]);
    assert!(trend_up(
        &calculate_ema(&rising, 10).unwrap(),
        &calculate_ema(&rising, 20).unwrap()
    ));

    let falling = pattern_series(&falling_closes(25), &[]);
    assert!(!trend_up(
        &calculate_ema(&falling, 10).unwrap(),
        &calculate_ema(&falling, 20).unwrap()
    ));
}

#[test]
fn test_recent_pullback_bounds() {
    assert!(recent_pullback(&markers(Some(1), None)));
    assert!(recent_pullback(&markers(Some(2), Some(5))));
    assert!(!recent_pullback(&markers(Some(3), Some(5))));
    assert!(!recent_pullback(&markers(Some(9), Some(10))));
    assert!(!recent_pullback(&markers(None, None)));
}

#[test]
fn test_breach_within_window() {
    assert!(breach_within_window(&markers(Some(2), Some(5))));
    assert!(breach_within_window(&markers(Some(2), Some(10))));
    assert!(!breach_within_window(&markers(Some(2), Some(11))));
    assert!(!breach_within_window(&markers(Some(5), Some(5))));
    assert!(!breach_within_window(&markers(Some(6), Some(5))));
    assert!(!breach_within_window(&markers(Some(2), None)));
    assert!(!breach_within_window(&markers(None, None)));
}

#[test]
fn test_no_green_between_detects_green_inside_gap() {
    let series = pattern_series(
        &rising_closes(25),
        &[(2, Kind::Green), (4, Kind::Green), (6, Kind::RedBreach)],
    );
    assert!(!no_green_between(&series, Some(2), Some(6)));
    // The green bars on the markers themselves do not count.
    assert!(no_green_between(&series, Some(4), Some(6)));
}

#[test]
fn test_no_green_between_trivial_cases() {
    let series = pattern_series(&rising_closes(25), &[(1, Kind::Green), (2, Kind::Green)]);
    // Adjacent markers leave nothing in between.
    assert!(no_green_between(&series, Some(1), Some(2)));
    assert!(no_green_between(&series, None, Some(5)));
    assert!(no_green_between(&series, Some(1), None));
    assert!(no_green_between(&series, None, None));
    // Reversed markers leave an empty range.
    assert!(no_green_between(&series, Some(5), Some(1)));
}

#[test]
fn test_sustained_trend_window_includes_one_bar_past_breach() {
    // Fast below slow at offset 11 only.
    let closes = crate::fixtures::late_crossover_closes();
    let series = pattern_series(&closes, &[]);
    let fast = calculate_ema(&series, 10).unwrap();
    let slow = calculate_ema(&series, 20).unwrap();

    assert!(fast.at_offset(11).unwrap() < slow.at_offset(11).unwrap());
    assert!(fast.at_offset(10).unwrap() > slow.at_offset(10).unwrap());

    assert!(sustained_trend(&fast, &slow, Some(9)));
    assert!(!sustained_trend(&fast, &slow, Some(10)));
}

#[test]
fn test_sustained_trend_is_vacuous_without_breach() {
    let falling = pattern_series(&falling_closes(25), &[]);
    let fast = calculate_ema(&falling, 10).unwrap();
    let slow = calculate_ema(&falling, 20).unwrap();

    assert!(!trend_up(&fast, &slow));
    assert!(sustained_trend(&fast, &slow, None));
    assert!(!sustained_trend(&fast, &slow, Some(1)));
}

#[test]
fn test_sustained_trend_clamps_to_series_length() {
    let fast = EmaSeries::new(10, vec![1.0, 3.0, 4.0]);
    let slow = EmaSeries::new(20, vec![0.5, 2.0, 3.0]);
    assert!(sustained_trend(&fast, &slow, Some(8)));
}
