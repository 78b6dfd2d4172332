use serde::{Deserialize, Serialize};

use crate::common::constants::*;
use crate::state::FeeMarketError;

/// Constants of both fee markets.
///
/// Execution gas follows the EIP-1559 linear rule: each block the price moves
/// by at most `1 / price_change_denominator`. Data gas follows the EIP-4844
/// exponential rule driven by `excess_data_gas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeMarketConfig {
    pub gas_limit_per_block: u64,
    pub gas_target_per_block: u64,
    pub price_change_denominator: u64,

    pub max_data_gas_per_block: u64,
    pub target_data_gas_per_block: u64,
    pub data_gas_per_blob: u64,
    pub min_data_gas_price: u64,
    pub data_gas_price_update_fraction: u64,

    /// Execution gas price of the first block.
    pub initial_price: f64,
    /// Floor the execution gas price is clamped to.
    pub min_price: f64,
    /// Bound on the data gas price series; exceeding it is an error.
    pub max_exponential_iterations: u32,
}

impl Default for FeeMarketConfig {
    fn default() -> Self {
        Self {
            gas_limit_per_block: GAS_LIMIT_PER_BLOCK,
            gas_target_per_block: GAS_TARGET_PER_BLOCK,
            price_change_denominator: PRICE_CHANGE_DENOMINATOR,
            max_data_gas_per_block: MAX_DATA_GAS_PER_BLOCK,
            target_data_gas_per_block: TARGET_DATA_GAS_PER_BLOCK,
            data_gas_per_blob: DATA_GAS_PER_BLOB,
            min_data_gas_price: MIN_DATA_GAS_PRICE,
            data_gas_price_update_fraction: DATA_GAS_PRICE_UPDATE_FRACTION,
            initial_price: INITIAL_PRICE,
            min_price: MIN_PRICE,
            max_exponential_iterations: MAX_EXPONENTIAL_ITERATIONS,
        }
    }
}

impl FeeMarketConfig {
    // fail fast, before any step runs
    pub fn validate(&self) -> Result<(), FeeMarketError> {
        let positive = [
            ("gas_limit_per_block", self.gas_limit_per_block),
            ("gas_target_per_block", self.gas_target_per_block),
            ("price_change_denominator", self.price_change_denominator),
            ("max_data_gas_per_block", self.max_data_gas_per_block),
            ("target_data_gas_per_block", self.target_data_gas_per_block),
            ("data_gas_per_blob", self.data_gas_per_blob),
            ("min_data_gas_price", self.min_data_gas_price),
            (
                "data_gas_price_update_fraction",
                self.data_gas_price_update_fraction,
            ),
        ];

        for (name, value) in positive {
            if value == 0 {
                return Err(FeeMarketError::invalid_config(format!(
                    "{name} must be > 0"
                )));
            }
        }

        if self.gas_target_per_block > self.gas_limit_per_block {
            return Err(FeeMarketError::invalid_config(format!(
                "gas_target_per_block ({}) > gas_limit_per_block ({})",
                self.gas_target_per_block, self.gas_limit_per_block
            )));
        }

        if self.target_data_gas_per_block > self.max_data_gas_per_block {
            return Err(FeeMarketError::invalid_config(format!(
                "target_data_gas_per_block ({}) > max_data_gas_per_block ({})",
                self.target_data_gas_per_block, self.max_data_gas_per_block
            )));
        }

        if !self.min_price.is_finite() || self.min_price <= 0.0 {
            return Err(FeeMarketError::invalid_config(format!(
                "min_price ({}) must be a positive number",
                self.min_price
            )));
        }

        if !self.initial_price.is_finite() || self.initial_price < self.min_price {
            return Err(FeeMarketError::invalid_config(format!(
                "initial_price ({}) must be finite and >= min_price ({})",
                self.initial_price, self.min_price
            )));
        }

        if self.max_exponential_iterations == 0 {
            return Err(FeeMarketError::invalid_config(
                "max_exponential_iterations must be > 0",
            ));
        }

        Ok(())
    }

    // largest possible per-block move of the execution gas price, as a fraction
    pub fn max_price_change(&self) -> f64 {
        1.0 / self.price_change_denominator as f64
    }

    pub fn max_blobs_per_block(&self) -> u64 {
        self.max_data_gas_per_block / self.data_gas_per_blob
    }
}
