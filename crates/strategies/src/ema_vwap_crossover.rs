// In crates/strategies/src/ema_vwap_crossover.rs

use crate::crossover::{detect_crossover, Crossover};
use crate::indicators::{IndicatorSource, TaIndicators};
use crate::types::EmaVwapCrossoverSettings;
use crate::{Result, Strategy};
use core_types::{DataSubscription, Interval, Kline, Symbol, TargetAllocation};

/// Goes fully long when the 9-period EMA crosses above the VWAP and flat otherwise.
///
/// Any doubt about the signal (too little history, an indicator that cannot be
/// computed) resolves to a zero allocation.
#[derive(Debug)]
pub struct EmaVwapCrossover<I = TaIndicators> {
    settings: EmaVwapCrossoverSettings,
    assets: Vec<Symbol>,
    data: Vec<DataSubscription>,
    source: I,
}

impl EmaVwapCrossover<TaIndicators> {
    /// Creates a new `EmaVwapCrossover` backed by the `ta` indicators.
    pub fn new(settings: EmaVwapCrossoverSettings) -> Result<Self> {
        Self::with_source(settings, TaIndicators)
    }
}

impl<I: IndicatorSource> EmaVwapCrossover<I> {
    pub fn with_source(settings: EmaVwapCrossoverSettings, source: I) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            assets: vec![settings.ticker.clone()],
            data: vec![DataSubscription::Asset(settings.ticker.clone())],
            settings,
            source,
        })
    }

    pub fn settings(&self) -> &EmaVwapCrossoverSettings {
        &self.settings
    }

    pub fn source(&self) -> &I {
        &self.source
    }
}

impl<I: IndicatorSource> Strategy for EmaVwapCrossover<I> {
    fn name(&self) -> &'static str {
        "EmaVwapCrossover"
    }

    fn interval(&self) -> Interval {
        self.settings.interval
    }

    fn assets(&self) -> &[Symbol] {
        &self.assets
    }

    fn data(&self) -> &[DataSubscription] {
        &self.data
    }

    fn assess(&self, klines: &[Kline]) -> TargetAllocation {
        let ticker = &self.settings.ticker;
        let vwap_length = self.settings.vwap_length as usize;

        // 1. Ensure we have enough data to calculate indicators.
        if klines.len() < vwap_length {
            tracing::info!(
                symbol = %ticker,
                bars = klines.len(),
                required = vwap_length,
                "Not enough data for VWAP calculation."
            );
            return TargetAllocation::flat(ticker);
        }

        // 2. Compute both lines.
        let ema = self.source.ema(ticker, klines, self.settings.ema_length() as usize);
        let vwap = self.source.vwap(ticker, klines, vwap_length);

        // 3. Both lines need at least two points to compare.
        let crossover = match (ema, vwap) {
            (Some(ema), Some(vwap)) => detect_crossover(&ema, &vwap),
            _ => None,
        };
        let Some(crossover) = crossover else {
            tracing::info!(symbol = %ticker, "Unable to calculate EMA or VWAP.");
            return TargetAllocation::flat(ticker);
        };

        // 4. Map the crossover to a target allocation.
        match crossover {
            Crossover::Bullish => {
                tracing::info!(symbol = %ticker, "Buying, as 9-period EMA crossed over VWAP.");
                TargetAllocation::full(ticker)
            }
            Crossover::Bearish => {
                tracing::info!(symbol = %ticker, "Selling, as 9-period EMA crossed under VWAP.");
                TargetAllocation::flat(ticker)
            }
            Crossover::None => {
                tracing::info!(symbol = %ticker, "No action, as there's no EMA and VWAP cross.");
                TargetAllocation::flat(ticker)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_harness_properties() {
        let strategy = EmaVwapCrossover::new(EmaVwapCrossoverSettings::default()).unwrap();
        let aapl = Symbol::from("AAPL");
        assert_eq!(strategy.interval(), Interval::OneDay);
        assert_eq!(strategy.assets(), &[aapl.clone()]);
        assert_eq!(strategy.data(), &[DataSubscription::Asset(aapl)]);
        assert_eq!(strategy.settings().ema_length(), 9);
    }

    #[test]
    fn rejects_zero_vwap_length() {
        let settings = EmaVwapCrossoverSettings {
            vwap_length: 0,
            ..Default::default()
        };
        assert!(EmaVwapCrossover::new(settings).is_err());
    }

    #[test]
    fn empty_history_is_flat() {
        let strategy = EmaVwapCrossover::new(EmaVwapCrossoverSettings::default()).unwrap();
        let allocation = strategy.assess(&[]);
        assert_eq!(allocation, TargetAllocation::flat(&Symbol::from("AAPL")));
    }
}
