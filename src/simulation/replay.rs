use std::collections::{BTreeMap, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::demand::DemandSource;
use super::error::DemandError;
use crate::common::StepRecord;
use crate::core::{Transaction, TxKind};
use crate::execution::Demand;

/// One historical transaction per line, tagged with the block it landed in.
/// Blob transactions carry both `max_fee_per_data_gas` and `blob_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub block: u64,
    pub max_fee_per_gas: f64,
    pub max_priority_fee_per_gas: f64,
    pub gas_used: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_data_gas: Option<i128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_count: Option<i64>,
}

impl ReplayRecord {
    fn into_transaction(self, line: usize) -> Result<Transaction, DemandError> {
        let kind = match (self.max_fee_per_data_gas, self.blob_count) {
            (None, None) => TxKind::Standard,
            (Some(max_fee_per_data_gas), Some(blob_count)) => TxKind::Blob {
                max_fee_per_data_gas,
                blob_count,
            },
            _ => {
                return Err(DemandError::Record {
                    line,
                    reason: "blob fields must be given together".to_string(),
                });
            }
        };

        // the line number keeps repeated records distinct
        Ok(Transaction::with_kind(
            line as u64,
            self.max_fee_per_gas,
            self.max_priority_fee_per_gas,
            self.gas_used,
            kind,
        ))
    }
}

/// Replays historical blocks in order, one per step. Once the history runs
/// out every further step gets empty demand.
///
/// Only the order of block numbers is kept, not their spacing: blocks 100
/// and 105 replay on consecutive steps, so step `n` is the `n`-th block
/// present in the file rather than block `first + n`.
///
/// Lines that fail to parse, or that carry only one of the two blob fields,
/// are skipped with a warning and counted in [`ReplayDemand::skipped`].
/// Records with negative values are kept; the block builder excludes them.
#[derive(Debug, Clone, Default)]
pub struct ReplayDemand {
    blocks: VecDeque<(u64, Demand)>,
    skipped: usize,
}

impl ReplayDemand {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DemandError> {
        let file = File::open(path.as_ref())?;
        let replay = Self::from_reader(BufReader::new(file))?;

        info!(
            skipped = replay.skipped,
            "Loaded {} historical blocks from {}",
            replay.remaining(),
            path.as_ref().display()
        );
        Ok(replay)
    }

    // only read errors are fatal; bad records are skipped
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DemandError> {
        let mut grouped: BTreeMap<u64, Demand> = BTreeMap::new();
        let mut skipped = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let added = parse_line(&line, line_no).and_then(|(block, tx)| {
                grouped
                    .entry(block)
                    .or_default()
                    .add_transaction(tx)
                    .map(|_| ())
                    .map_err(|e| DemandError::Record {
                        line: line_no,
                        reason: e.to_string(),
                    })
            });

            if let Err(e) = added {
                warn!(line = line_no, "Skipping historical record: {}", e);
                skipped += 1;
            }
        }

        Ok(Self {
            blocks: grouped.into_iter().collect(),
            skipped,
        })
    }

    // historical blocks not yet replayed
    pub fn remaining(&self) -> usize {
        self.blocks.len()
    }

    // lines dropped while loading
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<(u64, Transaction), DemandError> {
    let record: ReplayRecord = serde_json::from_str(line)
        .map_err(|source| DemandError::Parse { line: line_no, source })?;
    let block = record.block;
    Ok((block, record.into_transaction(line_no)?))
}

impl DemandSource for ReplayDemand {
    fn demand(&mut self, step: u64, _history: &[StepRecord]) -> Result<Demand, DemandError> {
        match self.blocks.pop_front() {
            Some((block, demand)) => {
                debug!(step, block, pending = demand.len(), "Replaying historical block");
                Ok(demand)
            }
            None => Ok(Demand::new()),
        }
    }
}
