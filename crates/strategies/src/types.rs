// In crates/strategies/src/types.rs

use core_types::{Interval, Symbol};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Period of the fast EMA line. Not configurable.
pub const EMA_LENGTH: u32 = 9;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmaVwapCrossoverSettings {
    /// The single symbol this strategy trades.
    pub ticker: Symbol,
    #[serde(default)]
    pub interval: Interval,
    /// VWAP window, which is also the minimum number of bars before any signal.
    #[serde(default = "default_vwap_length", deserialize_with = "length_from_number_or_str")]
    pub vwap_length: u32,
}

impl EmaVwapCrossoverSettings {
    pub fn ema_length(&self) -> u32 {
        EMA_LENGTH
    }

    pub fn validate(&self) -> Result<()> {
        if self.vwap_length == 0 {
            return Err(Error::InvalidSettings("vwap_length must be greater than 0".into()));
        }
        if self.ticker.as_str().is_empty() {
            return Err(Error::InvalidSettings("ticker must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for EmaVwapCrossoverSettings {
    fn default() -> Self {
        Self {
            ticker: Symbol::from("AAPL"),
            interval: Interval::OneDay,
            vwap_length: default_vwap_length(),
        }
    }
}

fn default_vwap_length() -> u32 {
    9
}

// Environment overrides arrive as strings.
fn length_from_number_or_str<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLength {
        Number(u32),
        Text(String),
    }

    match RawLength::deserialize(deserializer)? {
        RawLength::Number(length) => Ok(length),
        RawLength::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
