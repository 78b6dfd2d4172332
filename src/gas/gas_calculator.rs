use tracing::warn;

use super::gas_config::FeeMarketConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceUpdate {
    pub price: f64,
    /// The raw update fell below `min_price` and was clamped.
    pub floor_hit: bool,
}

pub struct GasCalculator;

impl GasCalculator {
    /// Linear proportional update of the execution gas price:
    ///
    /// ```text
    /// new_price = price * (1 + (gas_used - target) / (target * denominator))
    /// ```
    ///
    /// A full block raises the price by `1 / denominator`, an empty one lowers
    /// it by the same fraction. The result never drops below `min_price`.
    pub fn next_price(config: &FeeMarketConfig, price: f64, gas_used: u64) -> PriceUpdate {
        let target = config.gas_target_per_block as f64;
        let delta = gas_used as f64 - target;
        let next = price * (1.0 + delta / (target * config.price_change_denominator as f64));

        // NaN compares false, so it lands on the floor as well
        if next >= config.min_price {
            return PriceUpdate {
                price: next,
                floor_hit: false,
            };
        }

        warn!(
            price,
            next,
            floor = config.min_price,
            "Execution gas price clamped to floor, initial price or denominator is degenerate"
        );

        PriceUpdate {
            price: config.min_price,
            floor_hit: true,
        }
    }

    /// Accumulated data gas demand above target, floored at zero. Empty blocks
    /// drain the excess but never build up credit.
    pub fn next_excess_data_gas(config: &FeeMarketConfig, excess: u64, data_gas_used: u64) -> u64 {
        excess
            .saturating_add(data_gas_used)
            .saturating_sub(config.target_data_gas_per_block)
    }
}
