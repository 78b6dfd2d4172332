//! Data gas price oracle.
//!
//! `min_data_gas_price * e^(excess / update_fraction)`, approximated with the
//! integer Taylor series of EIP-4844 (`fake_exponential`). Every intermediate
//! value is a 256-bit unsigned integer so results are bit-for-bit reproducible.

use alloy::primitives::U256;

use super::gas_config::FeeMarketConfig;
use crate::state::FeeMarketError;

/// Approximates `factor * e^(numerator / denominator)`.
///
/// Terms are accumulated until integer division drives the next one to zero.
/// More than `max_iterations` terms, or a term that does not fit in 256 bits,
/// is reported as an error instead of looping or wrapping.
pub fn fake_exponential(
    factor: u64,
    numerator: u64,
    denominator: u64,
    max_iterations: u32,
) -> Result<U256, FeeMarketError> {
    if denominator == 0 {
        return Err(FeeMarketError::invalid_config(
            "data_gas_price_update_fraction must be > 0",
        ));
    }

    let overflow = || FeeMarketError::ExponentialOverflow { excess: numerator };

    let numerator_u = U256::from(numerator);
    let denominator_u = U256::from(denominator);

    let mut i: u32 = 1;
    let mut output = U256::ZERO;
    let mut numerator_accum = U256::from(factor) * denominator_u;

    while !numerator_accum.is_zero() {
        if i > max_iterations {
            return Err(FeeMarketError::ExponentialDiverged {
                excess: numerator,
                iterations: max_iterations,
            });
        }

        output = output.checked_add(numerator_accum).ok_or_else(overflow)?;

        let divisor = denominator_u
            .checked_mul(U256::from(i))
            .ok_or_else(overflow)?;
        numerator_accum = numerator_accum
            .checked_mul(numerator_u)
            .ok_or_else(overflow)?
            / divisor;

        i += 1;
    }

    Ok(output / denominator_u)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataGasPricer {
    min_data_gas_price: u64,
    update_fraction: u64,
    max_iterations: u32,
}

impl DataGasPricer {
    pub fn new(config: &FeeMarketConfig) -> Self {
        Self {
            min_data_gas_price: config.min_data_gas_price,
            update_fraction: config.data_gas_price_update_fraction,
            max_iterations: config.max_exponential_iterations,
        }
    }

    // price per unit of data gas at the given accumulated excess
    pub fn data_price(&self, excess_data_gas: u64) -> Result<u128, FeeMarketError> {
        let price = fake_exponential(
            self.min_data_gas_price,
            excess_data_gas,
            self.update_fraction,
            self.max_iterations,
        )?;

        u128::try_from(price).map_err(|_| FeeMarketError::ExponentialOverflow {
            excess: excess_data_gas,
        })
    }
}
