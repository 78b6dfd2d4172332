use serde::{Deserialize, Serialize};

use crate::core::BlockHeader;
use crate::gas::FeeMarketConfig;

/// Everything carried from one block to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    /// Execution gas price, always >= the configured floor.
    pub price: f64,
    /// Data gas demand above target accumulated so far.
    pub excess_data_gas: u64,
    /// Header of the last built block. The block itself, transactions
    /// included, is handed out in that step's `StepRecord`.
    pub latest_header: BlockHeader,
}

impl MarketState {
    // Initial state: configured price, no excess, genesis header
    pub fn genesis(config: &FeeMarketConfig) -> Self {
        Self {
            price: config.initial_price,
            excess_data_gas: 0,
            latest_header: BlockHeader::genesis(),
        }
    }

    // number of the next block to build
    pub fn next_block_number(&self) -> u64 {
        self.latest_header.number + 1
    }
}
