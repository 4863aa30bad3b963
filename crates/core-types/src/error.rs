// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Unknown bar interval: {0}")]
    InvalidInterval(String),

    #[error("Allocation weight for {symbol} must be within [0, 1], got {weight}")]
    InvalidWeight { symbol: String, weight: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
