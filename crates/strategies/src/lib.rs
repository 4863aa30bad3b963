// In crates/strategies/src/lib.rs

use core_types::{DataSubscription, Interval, Kline, Symbol, TargetAllocation};
pub mod crossover;
pub mod ema_vwap_crossover;
pub mod error;
pub mod factory;
pub mod indicators;
pub mod types;

pub use error::{Error, Result};

/// The universal interface for a trading strategy.
///
/// A strategy analyzes a bar history and produces a `TargetAllocation`. The
/// harness reads `interval`, `assets` and `data` once to decide which bars to
/// supply, then calls `assess` once per time step. Strategies hold no state
/// between `assess` calls; everything they need arrives in `klines`.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The bar period this strategy trades on.
    fn interval(&self) -> Interval;

    /// The symbols this strategy allocates to.
    fn assets(&self) -> &[Symbol];

    /// The data feeds the harness must supply.
    fn data(&self) -> &[DataSubscription];

    fn assess(&self, klines: &[Kline]) -> TargetAllocation;
}
