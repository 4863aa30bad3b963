use anyhow::Result;
use crate::{ema_vwap_crossover::EmaVwapCrossover, Strategy};
use crate::types::EmaVwapCrossoverSettings;
use core_types::StrategyConfig;

/// Builds the strategy named in `strat_config` from its `params` table.
pub fn create_strategy(strat_config: &StrategyConfig) -> Result<Box<dyn Strategy + Send + Sync>> {
    let strategy_instance: Box<dyn Strategy + Send + Sync> = match strat_config.name.as_str() {
        "ema_vwap_crossover" => {
            let settings: EmaVwapCrossoverSettings = strat_config.params.clone().try_into()?;
            Box::new(EmaVwapCrossover::new(settings)?)
        }
        unknown => anyhow::bail!("Attempted to create unknown strategy: {}", unknown),
    };

    Ok(strategy_instance)
}
