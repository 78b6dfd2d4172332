use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

use crate::core::Block;

// Opaque transaction identity
pub type TxHash = B256;

// What happened to the demand of one step while building its block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Transactions offered by the demand source.
    pub considered: usize,
    /// Rejected before pricing: negative or non-finite fields.
    pub malformed: usize,
    /// Well formed, but priced out by the gas or data gas price.
    pub invalid: usize,
    /// Blob transactions passed over because the data gas limit was already exceeded.
    pub skipped_data_full: usize,
    /// Valid transactions never scanned because the gas limit was already exceeded.
    pub cut_off: usize,
    /// Transactions that made it into the block.
    pub included: usize,
    /// Blob transactions among `included`.
    pub included_blob: usize,
}

/// Committed output of one simulation step.
///
/// `price` and `excess_data_gas` are the values *after* this step's updates,
/// `data_price` is derived from that committed excess, and `block` was built
/// against the values of the previous step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u64,
    pub price: f64,
    pub excess_data_gas: u64,
    pub data_price: u128,
    pub block: Block,
    pub stats: BuildStats,
    pub price_floor_hit: bool,
}
