//! Unit tests for TriggerEngine

use expo_screener::indicators::IndicatorError;
use expo_screener::models::bars::PriceSeries;
use expo_screener::signals::engine::{TriggerEngine, DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN};
use proptest::prelude::*;

use crate::fixtures::{bar, day, pattern_bars, rising_closes, triggered_bars, Kind};

#[test]
fn test_default_spans() {
    let engine = TriggerEngine::default();
    assert_eq!(engine.fast_span(), DEFAULT_FAST_SPAN);
    assert_eq!(engine.slow_span(), DEFAULT_SLOW_SPAN);
    assert_eq!(engine.min_reliable_bars(), 20);
}

#[test]
fn test_zero_span_rejected() {
    assert_eq!(TriggerEngine::new(0, 20), Err(IndicatorError::InvalidSpan(0)));
    assert_eq!(TriggerEngine::new(10, 0), Err(IndicatorError::InvalidSpan(0)));
    assert!(TriggerEngine::new(5, 8).is_ok());
}

#[test]
fn test_check_trigger_accepts_any_date_order() {
    let engine = TriggerEngine::default();
    let ascending = triggered_bars();
    let mut descending = ascending.clone();
    descending.reverse();

    let forward = engine.check_trigger(&ascending).unwrap();
    let backward = engine.check_trigger(&descending).unwrap();

    assert!(forward.triggered);
    assert_eq!(forward, backward);
}

#[test]
fn test_check_trigger_is_idempotent() {
    let engine = TriggerEngine::default();
    let bars = triggered_bars();
    let first = engine.check_trigger(&bars).unwrap();
    let second = engine.check_trigger(&bars).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_check_trigger_matches_evaluate() {
    let engine = TriggerEngine::default();
    let bars = triggered_bars();
    let series = PriceSeries::new(bars.clone()).unwrap();
    assert_eq!(
        engine.check_trigger(&bars).unwrap(),
        engine.evaluate(&series).unwrap().result
    );
}

#[test]
fn test_check_trigger_rejects_bad_input() {
    let engine = TriggerEngine::default();
    assert_eq!(engine.check_trigger(&[]), Err(IndicatorError::EmptyInput));

    let mut bars = triggered_bars();
    bars.push(bar(day(3), 130.0, Kind::Red));
    assert_eq!(
        engine.check_trigger(&bars),
        Err(IndicatorError::DuplicateDate(day(3)))
    );
}

#[test]
fn test_single_bar_never_triggers() {
    let result = TriggerEngine::default()
        .check_trigger(&[bar(day(0), 100.0, Kind::Green)])
        .unwrap();
    assert!(!result.triggered);
    assert_eq!(result.ema_fast_last, 100.0);
    assert_eq!(result.ema_slow_last, 100.0);
}

#[test]
fn test_short_series_is_flagged_but_evaluated() {
    let bars = pattern_bars(&rising_closes(6), &[(1, Kind::Green), (3, Kind::RedBreach)]);
    let evaluation = TriggerEngine::default()
        .evaluate(&PriceSeries::new(bars).unwrap())
        .unwrap();
    assert!(evaluation.insufficient_data);
    assert!(evaluation.result.triggered);
    assert_eq!(evaluation.ema_fast.len(), 6);
    assert_eq!(evaluation.ema_slow.len(), 6);
}

#[test]
fn test_custom_spans_are_used() {
    let series = PriceSeries::new(triggered_bars()).unwrap();
    let evaluation = TriggerEngine::new(5, 8).unwrap().evaluate(&series).unwrap();
    assert_eq!(evaluation.ema_fast.span, 5);
    assert_eq!(evaluation.ema_slow.span, 8);
    assert!(!evaluation.insufficient_data);
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Green),
        Just(Kind::Red),
        Just(Kind::RedBreach),
        Just(Kind::GreenBreach),
    ]
}

proptest! {
    #[test]
    fn no_green_bars_never_trigger(
        closes in prop::collection::vec(50.0f64..150.0, 1..40),
        breach in prop::collection::vec(any::<bool>(), 40),
    ) {
        let bars: Vec<_> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let kind = if breach[i] { Kind::RedBreach } else { Kind::Red };
                bar(day(i), close, kind)
            })
            .collect();
        let evaluation = TriggerEngine::default()
            .evaluate(&PriceSeries::new(bars).unwrap())
            .unwrap();
        prop_assert!(!evaluation.result.triggered);
        prop_assert_eq!(evaluation.markers.day_y, None);
        prop_assert_eq!(evaluation.markers.day_z, None);
    }

    #[test]
    fn trigger_implies_every_condition(
        closes in prop::collection::vec(50.0f64..150.0, 1..40),
        kinds in prop::collection::vec(kind_strategy(), 40),
    ) {
        let bars: Vec<_> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| bar(day(i), close, kinds[i]))
            .collect();
        let evaluation = TriggerEngine::default()
            .evaluate(&PriceSeries::new(bars).unwrap())
            .unwrap();
        prop_assert_eq!(evaluation.result.triggered, evaluation.conditions.all());
        if evaluation.result.triggered {
            let day_y = evaluation.markers.day_y.unwrap();
            let day_z = evaluation.markers.day_z.unwrap();
            prop_assert!(day_y <= 2);
            prop_assert!(day_y < day_z && day_z <= 10);
        }
        if evaluation.markers.day_z.is_none() {
            prop_assert!(evaluation.conditions.sustained_trend);
        }
    }

    #[test]
    fn input_order_does_not_matter(
        closes in prop::collection::vec(50.0f64..150.0, 1..40),
        kinds in prop::collection::vec(kind_strategy(), 40),
    ) {
        let ascending: Vec<_> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| bar(day(i), close, kinds[i]))
            .collect();
        let mut descending = ascending.clone();
        descending.reverse();

        let engine = TriggerEngine::default();
        prop_assert_eq!(
            engine.check_trigger(&ascending).unwrap(),
            engine.check_trigger(&descending).unwrap()
        );
    }
}
