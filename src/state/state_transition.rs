use tracing::debug;

use super::error::FeeMarketError;
use super::market_state::MarketState;
use crate::common::StepRecord;
use crate::execution::{BlockBuilder, Demand};
use crate::gas::{FeeMarketConfig, GasCalculator};

/// One step of the market: build a block against the previous state, then
/// run both price rules on that same block.
#[derive(Debug, Clone)]
pub struct StateTransition {
    config: FeeMarketConfig,
    builder: BlockBuilder,
}

impl StateTransition {
    pub fn new(config: FeeMarketConfig) -> Result<Self, FeeMarketError> {
        config.validate()?;

        Ok(Self {
            builder: BlockBuilder::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &FeeMarketConfig {
        &self.config
    }

    pub fn genesis(&self) -> MarketState {
        MarketState::genesis(&self.config)
    }

    // Pure in (state, demand): the previous state is left untouched
    pub fn apply(
        &self,
        state: &MarketState,
        demand: &Demand,
        step: u64,
    ) -> Result<(MarketState, StepRecord), FeeMarketError> {
        let built = self.builder.build(
            state.next_block_number(),
            state.latest_header.hash(),
            demand,
            state.price,
            state.excess_data_gas,
        )?;

        let block = built.block;

        // both rules read the same block and the same pre-step state
        let price_update = GasCalculator::next_price(&self.config, state.price, block.gas_used());
        let excess_data_gas = GasCalculator::next_excess_data_gas(
            &self.config,
            state.excess_data_gas,
            block.data_gas_used(),
        );

        let data_price = self.builder.pricer().data_price(excess_data_gas)?;

        debug!(
            step,
            block = %block.header.hash_hex(),
            price = price_update.price,
            excess_data_gas,
            data_price = %data_price,
            "Step committed"
        );

        let next = MarketState {
            price: price_update.price,
            excess_data_gas,
            latest_header: block.header.clone(),
        };

        let record = StepRecord {
            step,
            price: price_update.price,
            excess_data_gas,
            data_price,
            block,
            stats: built.stats,
            price_floor_hit: price_update.floor_hit,
        };

        Ok((next, record))
    }
}
