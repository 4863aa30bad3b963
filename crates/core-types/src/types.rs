// In crates/core-types/src/types.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A tradable instrument identifier (e.g., "AAPL").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// A single OHLCV bar. Series of klines are ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    /// Bar open time in milliseconds since the Unix epoch.
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    /// Bar close time in milliseconds since the Unix epoch.
    pub close_time: i64,
}

/// The bar period a strategy trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1min")]
    OneMinute,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "4hour")]
    FourHours,
    #[default]
    #[serde(rename = "1day")]
    OneDay,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1min",
            Interval::FiveMinutes => "5min",
            Interval::FifteenMinutes => "15min",
            Interval::ThirtyMinutes => "30min",
            Interval::OneHour => "1hour",
            Interval::FourHours => "4hour",
            Interval::OneDay => "1day",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1min" => Ok(Interval::OneMinute),
            "5min" => Ok(Interval::FiveMinutes),
            "15min" => Ok(Interval::FifteenMinutes),
            "30min" => Ok(Interval::ThirtyMinutes),
            "1hour" => Ok(Interval::OneHour),
            "4hour" => Ok(Interval::FourHours),
            "1day" => Ok(Interval::OneDay),
            other => Err(Error::InvalidInterval(other.to_string())),
        }
    }
}

/// A data feed a strategy needs the harness to supply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSubscription {
    /// OHLCV bars for a single symbol.
    Asset(Symbol),
}

/// The desired portfolio weight per symbol, each within `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetAllocation(BTreeMap<Symbol, f64>);

impl TargetAllocation {
    /// An allocation holding a single zero-weight entry for `symbol`.
    pub fn flat(symbol: &Symbol) -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(symbol.clone(), 0.0);
        Self(weights)
    }

    /// An allocation holding a single full-weight entry for `symbol`.
    pub fn full(symbol: &Symbol) -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(symbol.clone(), 1.0);
        Self(weights)
    }

    /// Sets the weight for `symbol`, replacing any previous value.
    pub fn set(&mut self, symbol: &Symbol, weight: f64) -> Result<()> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(Error::InvalidWeight {
                symbol: symbol.0.clone(),
                weight,
            });
        }
        self.0.insert(symbol.clone(), weight);
        Ok(())
    }

    pub fn weight(&self, symbol: &Symbol) -> Option<f64> {
        self.0.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &f64)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn interval_parses_known_identifiers() {
        assert_eq!("1day".parse::<Interval>().unwrap(), Interval::OneDay);
        assert_eq!("4hour".parse::<Interval>().unwrap(), Interval::FourHours);
        assert_eq!(Interval::FiveMinutes.to_string(), "5min");
    }

    #[test]
    fn interval_rejects_unknown_identifier() {
        let err = "1fortnight".parse::<Interval>().unwrap_err();
        assert_eq!(err, Error::InvalidInterval("1fortnight".into()));
    }

    #[test]
    fn flat_allocation_has_single_zero_entry() {
        let aapl = Symbol::from("AAPL");
        let allocation = TargetAllocation::flat(&aapl);
        assert_eq!(allocation.len(), 1);
        assert_eq!(allocation.weight(&aapl), Some(0.0));
    }

    #[test]
    fn set_rejects_out_of_range_weights() {
        let aapl = Symbol::from("AAPL");
        let mut allocation = TargetAllocation::flat(&aapl);
        assert!(allocation.set(&aapl, 1.5).is_err());
        assert!(allocation.set(&aapl, -0.1).is_err());
        assert!(allocation.set(&aapl, f64::NAN).is_err());
        assert_eq!(allocation.weight(&aapl), Some(0.0));

        allocation.set(&aapl, 1.0).unwrap();
        assert_eq!(allocation.weight(&aapl), Some(1.0));
    }

    #[test]
    fn allocation_serializes_as_symbol_map() {
        let aapl = Symbol::from("AAPL");
        let mut allocation = TargetAllocation::flat(&aapl);
        allocation.set(&aapl, 1.0).unwrap();
        assert_eq!(serde_json::to_string(&allocation).unwrap(), r#"{"AAPL":1.0}"#);
    }

    #[test]
    fn kline_deserializes_from_json() {
        let json = r#"{"open_time":0,"open":"1.0","high":"2.5","low":"0.5","close":"2.0","volume":"100","close_time":86399999}"#;
        let kline: Kline = serde_json::from_str(json).unwrap();
        assert_eq!(kline.high, dec!(2.5));
        assert_eq!(kline.volume, dec!(100));
    }
}
