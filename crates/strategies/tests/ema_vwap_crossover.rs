use std::cell::Cell;

use core_types::{Kline, Symbol, TargetAllocation};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strategies::ema_vwap_crossover::EmaVwapCrossover;
use strategies::indicators::IndicatorSource;
use strategies::types::EmaVwapCrossoverSettings;
use strategies::Strategy;

/// Returns canned series and counts how often it is asked.
struct FakeIndicators {
    ema: Option<Vec<f64>>,
    vwap: Option<Vec<f64>>,
    calls: Cell<usize>,
}

impl FakeIndicators {
    fn new(ema: Option<Vec<f64>>, vwap: Option<Vec<f64>>) -> Self {
        Self {
            ema,
            vwap,
            calls: Cell::new(0),
        }
    }
}

impl IndicatorSource for FakeIndicators {
    fn ema(&self, _symbol: &Symbol, _klines: &[Kline], length: usize) -> Option<Vec<f64>> {
        assert_eq!(length, 9);
        self.calls.set(self.calls.get() + 1);
        self.ema.clone()
    }

    fn vwap(&self, _symbol: &Symbol, _klines: &[Kline], _length: usize) -> Option<Vec<f64>> {
        self.calls.set(self.calls.get() + 1);
        self.vwap.clone()
    }
}

fn bar(i: usize, close: Decimal) -> Kline {
    Kline {
        open_time: i as i64 * 86_400_000,
        open: close,
        high: close,
        low: close,
        close,
        volume: dec!(1000),
        close_time: (i as i64 + 1) * 86_400_000 - 1,
    }
}

fn history(closes: &[Decimal]) -> Vec<Kline> {
    closes.iter().enumerate().map(|(i, c)| bar(i, *c)).collect()
}

fn flat_history(len: usize) -> Vec<Kline> {
    history(&vec![dec!(100); len])
}

fn aapl() -> Symbol {
    Symbol::from("AAPL")
}

fn strategy_with(source: FakeIndicators) -> EmaVwapCrossover<FakeIndicators> {
    EmaVwapCrossover::with_source(EmaVwapCrossoverSettings::default(), source).unwrap()
}

fn full() -> TargetAllocation {
    TargetAllocation::full(&aapl())
}

fn flat() -> TargetAllocation {
    TargetAllocation::flat(&aapl())
}

#[test]
fn short_history_is_flat_without_computing_indicators() {
    let strategy = strategy_with(FakeIndicators::new(
        Some(vec![99.0, 101.0]),
        Some(vec![100.0, 100.0]),
    ));

    for len in 0..9 {
        assert_eq!(strategy.assess(&flat_history(len)), flat());
    }
    assert_eq!(strategy.source().calls.get(), 0);
}

#[test]
fn unavailable_indicator_is_flat() {
    let klines = flat_history(10);

    let no_ema = strategy_with(FakeIndicators::new(None, Some(vec![100.0, 100.0])));
    assert_eq!(no_ema.assess(&klines), flat());

    let no_vwap = strategy_with(FakeIndicators::new(Some(vec![99.0, 101.0]), None));
    assert_eq!(no_vwap.assess(&klines), flat());
}

#[test]
fn single_point_series_is_flat() {
    let strategy = strategy_with(FakeIndicators::new(Some(vec![101.0]), Some(vec![100.0])));
    assert_eq!(strategy.assess(&flat_history(10)), flat());
}

#[test]
fn bullish_cross_goes_fully_long() {
    let strategy = strategy_with(FakeIndicators::new(
        Some(vec![98.0, 99.0, 101.0]),
        Some(vec![100.0, 100.0]),
    ));
    let allocation = strategy.assess(&flat_history(10));
    assert_eq!(allocation, full());
    assert_eq!(allocation.len(), 1);
}

#[test]
fn bearish_cross_is_flat() {
    let strategy = strategy_with(FakeIndicators::new(
        Some(vec![101.0, 99.0]),
        Some(vec![100.0, 100.0]),
    ));
    assert_eq!(strategy.assess(&flat_history(10)), flat());
}

#[test]
fn no_strict_cross_is_flat() {
    let cases = [
        (vec![101.0, 102.0], vec![100.0, 100.0]),
        (vec![98.0, 97.0], vec![100.0, 100.0]),
        (vec![100.0, 101.0], vec![100.0, 100.0]),
        (vec![99.0, 100.0], vec![100.0, 100.0]),
    ];
    for (ema, vwap) in cases {
        let strategy = strategy_with(FakeIndicators::new(Some(ema), Some(vwap)));
        assert_eq!(strategy.assess(&flat_history(10)), flat());
    }
}

#[test]
fn repeated_calls_are_identical_and_leave_input_untouched() {
    let strategy = strategy_with(FakeIndicators::new(
        Some(vec![99.0, 101.0]),
        Some(vec![100.0, 100.0]),
    ));
    let klines = flat_history(10);
    let snapshot = klines.clone();

    let first = strategy.assess(&klines);
    let second = strategy.assess(&klines);

    assert_eq!(first, second);
    assert_eq!(klines, snapshot);
}

#[test]
fn ta_indicators_detect_bullish_cross() {
    // EMA(9) on the dip: 98.0 vs VWAP 98.89; on the spike: 102.4 vs 101.11.
    let mut closes = vec![dec!(100); 30];
    closes.extend([dec!(90), dec!(120)]);
    let strategy = EmaVwapCrossover::new(EmaVwapCrossoverSettings::default()).unwrap();
    assert_eq!(strategy.assess(&history(&closes)), full());
}

#[test]
fn ta_indicators_detect_bearish_cross() {
    let mut closes = vec![dec!(100); 30];
    closes.extend([dec!(110), dec!(80)]);
    let strategy = EmaVwapCrossover::new(EmaVwapCrossoverSettings::default()).unwrap();
    assert_eq!(strategy.assess(&history(&closes)), flat());
}

#[test]
fn ta_indicators_on_flat_prices_take_no_action() {
    let strategy = EmaVwapCrossover::new(EmaVwapCrossoverSettings::default()).unwrap();
    assert_eq!(strategy.assess(&flat_history(20)), flat());
}

#[test]
fn short_vwap_window_waits_for_ema_warm_up() {
    let settings = EmaVwapCrossoverSettings {
        vwap_length: 5,
        ..Default::default()
    };
    let strategy = EmaVwapCrossover::new(settings).unwrap();

    // Enough bars for a 5-bar VWAP but not for the 9-bar EMA, ending on a dip and a spike.
    for len in 5..9 {
        let mut closes = vec![dec!(100); len - 2];
        closes.extend([dec!(90), dec!(120)]);
        assert_eq!(strategy.assess(&history(&closes)), flat(), "history of {len} bars");
    }
}

#[test]
fn allocation_is_keyed_by_configured_ticker() {
    let settings = EmaVwapCrossoverSettings {
        ticker: Symbol::from("MSFT"),
        ..Default::default()
    };
    let strategy = EmaVwapCrossover::with_source(
        settings,
        FakeIndicators::new(Some(vec![99.0, 101.0]), Some(vec![100.0, 100.0])),
    )
    .unwrap();

    let allocation = strategy.assess(&flat_history(10));
    assert_eq!(allocation.weight(&Symbol::from("MSFT")), Some(1.0));
    assert_eq!(allocation.weight(&aapl()), None);
}
