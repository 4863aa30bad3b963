// In crates/strategies/src/indicators.rs

use core_types::{Kline, Symbol};
use num_traits::cast::ToPrimitive;
use ta::indicators::ExponentialMovingAverage as Ema;
use ta::Next;

/// A source of indicator series computed over a bar history.
///
/// Returned series are aligned with the tail of `klines`: the last value
/// always belongs to the most recent bar. `None` means the series cannot be
/// computed from the given input.
pub trait IndicatorSource {
    fn ema(&self, symbol: &Symbol, klines: &[Kline], length: usize) -> Option<Vec<f64>>;

    fn vwap(&self, symbol: &Symbol, klines: &[Kline], length: usize) -> Option<Vec<f64>>;
}

/// Indicators backed by the `ta` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaIndicators;

impl IndicatorSource for TaIndicators {
    /// One EMA value per bar, computed on the close.
    fn ema(&self, _symbol: &Symbol, klines: &[Kline], length: usize) -> Option<Vec<f64>> {
        if length == 0 || klines.len() < length {
            return None;
        }
        let mut ema = Ema::new(length).ok()?;
        klines
            .iter()
            .map(|k| k.close.to_f64().map(|close| ema.next(close)))
            .collect()
    }

    /// Rolling VWAP over `length` bars using the typical price.
    /// One value per complete window.
    fn vwap(&self, _symbol: &Symbol, klines: &[Kline], length: usize) -> Option<Vec<f64>> {
        if length == 0 || klines.len() < length {
            return None;
        }
        let weighted: Vec<(f64, f64)> = klines
            .iter()
            .map(|k| {
                let typical = (k.high.to_f64()? + k.low.to_f64()? + k.close.to_f64()?) / 3.0;
                let volume = k.volume.to_f64()?;
                Some((typical * volume, volume))
            })
            .collect::<Option<_>>()?;

        weighted
            .windows(length)
            .map(|window| {
                let (price_volume, volume) = window
                    .iter()
                    .fold((0.0, 0.0), |(pv, v), (wpv, wv)| (pv + wpv, v + wv));
                (volume > 0.0).then(|| price_volume / volume)
            })
            .collect()
    }
}
