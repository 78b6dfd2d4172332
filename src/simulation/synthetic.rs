use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use serde::{Deserialize, Serialize};

use super::demand::DemandSource;
use super::error::DemandError;
use crate::common::StepRecord;
use crate::execution::Demand;
use crate::core::Transaction;

/// Shape of the random demand. Fee caps are drawn from fixed ranges, so the
/// share of demand that clears the market falls as prices rise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticDemandConfig {
    pub min_txs_per_step: usize,
    pub max_txs_per_step: usize,
    /// Probability that a transaction carries blobs.
    pub blob_tx_share: f64,
    pub max_blobs_per_tx: i64,
    pub min_gas_used: i64,
    pub max_gas_used: i64,
    pub min_max_fee_per_gas: f64,
    pub max_max_fee_per_gas: f64,
    pub max_priority_fee_per_gas: f64,
    pub min_max_fee_per_data_gas: i128,
    pub max_max_fee_per_data_gas: i128,
}

impl Default for SyntheticDemandConfig {
    fn default() -> Self {
        Self {
            min_txs_per_step: 50,
            max_txs_per_step: 200,
            blob_tx_share: 0.05,
            max_blobs_per_tx: 2,
            min_gas_used: 21_000,
            max_gas_used: 500_000,
            min_max_fee_per_gas: 100_000_000.0,    // 0.1 gwei
            max_max_fee_per_gas: 50_000_000_000.0, // 50 gwei
            max_priority_fee_per_gas: 2_000_000_000.0,
            min_max_fee_per_data_gas: 1,
            max_max_fee_per_data_gas: 1_000_000,
        }
    }
}

impl SyntheticDemandConfig {
    pub fn validate(&self) -> Result<(), DemandError> {
        let invalid = |reason: String| Err(DemandError::InvalidConfig(reason));

        if self.min_txs_per_step > self.max_txs_per_step {
            return invalid(format!(
                "min_txs_per_step ({}) > max_txs_per_step ({})",
                self.min_txs_per_step, self.max_txs_per_step
            ));
        }
        if !(0.0..=1.0).contains(&self.blob_tx_share) {
            return invalid(format!("blob_tx_share ({}) must be in 0..=1", self.blob_tx_share));
        }
        if self.max_blobs_per_tx < 1 {
            return invalid("max_blobs_per_tx must be >= 1".to_string());
        }
        if self.min_gas_used < 0 || self.min_gas_used > self.max_gas_used {
            return invalid(format!(
                "gas range {}..={} is empty or negative",
                self.min_gas_used, self.max_gas_used
            ));
        }

        let fees = [
            ("max fee per gas", self.min_max_fee_per_gas, self.max_max_fee_per_gas),
            ("priority fee", 0.0, self.max_priority_fee_per_gas),
        ];
        for (name, low, high) in fees {
            if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
                return invalid(format!("{name} range {low}..={high} is invalid"));
            }
        }

        if self.min_max_fee_per_data_gas < 0
            || self.min_max_fee_per_data_gas > self.max_max_fee_per_data_gas
        {
            return invalid(format!(
                "data fee range {}..={} is empty or negative",
                self.min_max_fee_per_data_gas, self.max_max_fee_per_data_gas
            ));
        }

        Ok(())
    }
}

// Random demand; the same seed replays the same run
pub struct SyntheticDemand {
    config: SyntheticDemandConfig,
    rng: ChaCha20Rng,
    nonce: u64,
}

impl SyntheticDemand {
    pub fn new(config: SyntheticDemandConfig, seed: u64) -> Result<Self, DemandError> {
        config.validate()?;

        Ok(Self {
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
            nonce: 0,
        })
    }

    fn next_transaction(&mut self) -> Transaction {
        let c = &self.config;

        let gas_used = self.rng.random_range(c.min_gas_used..=c.max_gas_used);
        let max_fee_per_gas = self
            .rng
            .random_range(c.min_max_fee_per_gas..=c.max_max_fee_per_gas);
        let max_priority_fee_per_gas = self.rng.random_range(0.0..=c.max_priority_fee_per_gas);

        let nonce = self.nonce;
        self.nonce += 1;

        if !self.rng.random_bool(c.blob_tx_share) {
            return Transaction::standard(nonce, max_fee_per_gas, max_priority_fee_per_gas, gas_used);
        }

        let blob_count = self.rng.random_range(1..=c.max_blobs_per_tx);
        let max_fee_per_data_gas = self
            .rng
            .random_range(c.min_max_fee_per_data_gas..=c.max_max_fee_per_data_gas);

        Transaction::blob(
            nonce,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_used,
            max_fee_per_data_gas,
            blob_count,
        )
    }
}

impl DemandSource for SyntheticDemand {
    fn demand(&mut self, _step: u64, _history: &[StepRecord]) -> Result<Demand, DemandError> {
        let count = self
            .rng
            .random_range(self.config.min_txs_per_step..=self.config.max_txs_per_step);

        let demand = (0..count)
            .map(|_| self.next_transaction())
            .collect();

        Ok(demand)
    }
}
