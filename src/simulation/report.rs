use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::StepRecord;
use crate::gas::FeeMarketConfig;
use crate::state::MarketState;

// Full output of one run, one record per step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: FeeMarketConfig,
    pub records: Vec<StepRecord>,
    pub final_state: MarketState,
}

impl SimulationReport {
    pub fn new(config: FeeMarketConfig, records: Vec<StepRecord>, final_state: MarketState) -> Self {
        Self {
            config,
            records,
            final_state,
        }
    }

    pub fn mean_price(&self) -> f64 {
        if self.records.is_empty() {
            return self.final_state.price;
        }
        self.records.iter().map(|r| r.price).sum::<f64>() / self.records.len() as f64
    }

    pub fn max_data_price(&self) -> u128 {
        self.records
            .iter()
            .map(|r| r.data_price)
            .max()
            .unwrap_or(self.config.min_data_gas_price as u128)
    }

    pub fn total_blob_txs_included(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.block.blob_transaction_count())
            .sum()
    }

    pub fn total_malformed(&self) -> usize {
        self.records.iter().map(|r| r.stats.malformed).sum()
    }

    pub fn floor_hits(&self) -> usize {
        self.records.iter().filter(|r| r.price_floor_hit).count()
    }

    // share of the gas limit used, averaged over all blocks
    pub fn mean_utilization(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let limit = self.config.gas_limit_per_block as f64;
        self.records
            .iter()
            .map(|r| r.block.gas_used() as f64 / limit)
            .sum::<f64>()
            / self.records.len() as f64
    }

    pub fn summary(&self, run: usize, seed: u64, started_at: DateTime<Utc>) -> RunSummary {
        let final_data_price = self.records.last().map_or(
            self.config.min_data_gas_price as u128,
            |r| r.data_price,
        );

        RunSummary {
            run,
            seed,
            steps: self.records.len() as u64,
            started_at,
            elapsed_ms: (Utc::now() - started_at).num_milliseconds(),
            final_price: self.final_state.price,
            final_excess_data_gas: self.final_state.excess_data_gas,
            final_data_price,
            mean_price: self.mean_price(),
            max_data_price: self.max_data_price(),
            mean_utilization: self.mean_utilization(),
            blob_txs_included: self.total_blob_txs_included(),
            malformed_excluded: self.total_malformed(),
            floor_hits: self.floor_hits(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run: usize,
    pub seed: u64,
    pub steps: u64,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
    pub final_price: f64,
    pub final_excess_data_gas: u64,
    pub final_data_price: u128,
    pub mean_price: f64,
    pub max_data_price: u128,
    pub mean_utilization: f64,
    pub blob_txs_included: usize,
    pub malformed_excluded: usize,
    pub floor_hits: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "run {} (seed {}): {} steps in {} ms, final price {:.3}, mean price {:.3}, \
             final excess data gas {}, data price {} (max {}), utilization {:.1}%, \
             {} blob txs, {} malformed, {} floor hits",
            self.run,
            self.seed,
            self.steps,
            self.elapsed_ms,
            self.final_price,
            self.mean_price,
            self.final_excess_data_gas,
            self.final_data_price,
            self.max_data_price,
            self.mean_utilization * 100.0,
            self.blob_txs_included,
            self.malformed_excluded,
            self.floor_hits
        )
    }
}

// One JSON object per step, for tabulation or plotting elsewhere
pub fn write_json_lines(path: impl AsRef<Path>, records: &[StepRecord]) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("Failed to serialize step {}", record.step))?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}
