use alloy::primitives::B256;
use tracing::debug;

use super::mempool::Demand;
use crate::common::BuildStats;
use crate::core::{Block, BlockHeader, Transaction};
use crate::gas::{DataGasPricer, FeeMarketConfig};
use crate::state::FeeMarketError;

#[derive(Debug, Clone)]
pub struct BuiltBlock {
    pub block: Block,
    pub stats: BuildStats,
}

/// Greedy, premium-ordered packing under the execution gas and data gas caps.
///
/// Both caps are checked with `<=` before a transaction is added, so a block
/// can overshoot a limit by the one transaction that crosses it. Crossing the
/// gas limit ends the scan; crossing the data gas limit only skips the blob
/// transactions that follow, standard transactions are still packed.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    gas_limit: u64,
    max_data_gas: u64,
    data_gas_per_blob: u64,
    pricer: DataGasPricer,
}

impl BlockBuilder {
    pub fn new(config: &FeeMarketConfig) -> Self {
        Self {
            gas_limit: config.gas_limit_per_block,
            max_data_gas: config.max_data_gas_per_block,
            data_gas_per_blob: config.data_gas_per_blob,
            pricer: DataGasPricer::new(config),
        }
    }

    pub fn pricer(&self) -> &DataGasPricer {
        &self.pricer
    }

    pub fn build(
        &self,
        number: u64,
        parent_hash: B256,
        demand: &Demand,
        price: f64,
        excess_data_gas: u64,
    ) -> Result<BuiltBlock, FeeMarketError> {
        let data_price = self.pricer.data_price(excess_data_gas)?;

        let mut stats = BuildStats {
            considered: demand.len(),
            ..Default::default()
        };

        let mut candidates = self.select_valid(demand, price, data_price, &mut stats);

        // stable: equal premiums keep the demand's hash order
        candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut gas_used: u64 = 0;
        let mut data_gas_used: u64 = 0;
        let mut transactions = Vec::new();

        for (idx, (_, tx)) in candidates.iter().enumerate() {
            if gas_used > self.gas_limit {
                stats.cut_off = candidates.len() - idx;
                break;
            }

            if tx.is_blob() {
                if data_gas_used > self.max_data_gas {
                    stats.skipped_data_full += 1;
                    continue;
                }
                data_gas_used = data_gas_used.saturating_add(tx.data_gas(self.data_gas_per_blob));
                stats.included_blob += 1;
            }

            gas_used = gas_used.saturating_add(tx.gas());
            transactions.push((*tx).clone());
        }

        stats.included = transactions.len();

        let header = BlockHeader::new(
            number,
            parent_hash,
            Block::calculate_transactions_root(&transactions),
            gas_used,
            data_gas_used,
            price,
            data_price,
        );

        debug!(
            number,
            included = stats.included,
            blobs = stats.included_blob,
            gas_used,
            data_gas_used,
            invalid = stats.invalid,
            malformed = stats.malformed,
            "Block built"
        );

        Ok(BuiltBlock {
            block: Block::new(header, transactions),
            stats,
        })
    }

    // well formed and affordable transactions, paired with their premium
    fn select_valid<'a>(
        &self,
        demand: &'a Demand,
        price: f64,
        data_price: u128,
        stats: &mut BuildStats,
    ) -> Vec<(f64, &'a Transaction)> {
        let mut candidates = Vec::with_capacity(demand.len());

        for tx in demand.iter() {
            if let Err(e) = tx.check_well_formed() {
                debug!("Excluding malformed transaction 0x{}: {}", tx.short_hash(), e);
                stats.malformed += 1;
                continue;
            }

            if !tx.is_valid(price, data_price) {
                stats.invalid += 1;
                continue;
            }

            candidates.push((tx.premium(price), tx));
        }

        candidates
    }
}
