use alloy::primitives::{B256, keccak256};
use serde::{Deserialize, Serialize};

// Block summary: the aggregates the price rules read, plus the prices it was built at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    // block identity
    pub number: u64,
    pub parent_hash: B256,

    // content
    pub transactions_root: B256,
    pub gas_used: u64,
    pub data_gas_used: u64,

    // prices in force while the block was built
    pub base_fee_per_gas: f64,
    pub data_gas_price: u128,
}

impl BlockHeader {
    pub fn new(
        number: u64,
        parent_hash: B256,
        transactions_root: B256,
        gas_used: u64,
        data_gas_used: u64,
        base_fee_per_gas: f64,
        data_gas_price: u128,
    ) -> Self {
        Self {
            number,
            parent_hash,
            transactions_root,
            gas_used,
            data_gas_used,
            base_fee_per_gas,
            data_gas_price,
        }
    }

    // create genesis block header
    pub fn genesis() -> Self {
        Self::new(0, B256::ZERO, B256::ZERO, 0, 0, 0.0, 0)
    }

    // Calculate deterministic hash of the header
    pub fn hash(&self) -> B256 {
        let mut data = Vec::new();

        data.extend_from_slice(&self.number.to_be_bytes());
        data.extend_from_slice(self.parent_hash.as_slice());
        data.extend_from_slice(self.transactions_root.as_slice());
        data.extend_from_slice(&self.gas_used.to_be_bytes());
        data.extend_from_slice(&self.data_gas_used.to_be_bytes());
        data.extend_from_slice(&self.base_fee_per_gas.to_be_bytes());
        data.extend_from_slice(&self.data_gas_price.to_be_bytes());

        keccak256(&data)
    }

    // Get hash as hex string for display
    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash().as_slice()))
    }
}
