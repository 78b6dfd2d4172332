use super::blockheader::BlockHeader;
use super::transaction::Transaction;
use alloy::primitives::{B256, keccak256};
use serde::{Deserialize, Serialize};

// Transactions in inclusion order, i.e. by descending premium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    pub fn hash(&self) -> B256 {
        self.header.hash()
    }

    pub fn gas_used(&self) -> u64 {
        self.header.gas_used
    }

    pub fn data_gas_used(&self) -> u64 {
        self.header.data_gas_used
    }

    pub fn blob_transaction_count(&self) -> usize {
        self.transactions.iter().filter(|tx| tx.is_blob()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    // hash over transaction hashes, order sensitive since inclusion order matters
    pub fn calculate_transactions_root(transactions: &[Transaction]) -> B256 {
        if transactions.is_empty() {
            return B256::ZERO;
        }

        let mut data = Vec::with_capacity(transactions.len() * 32);
        for tx in transactions {
            data.extend_from_slice(tx.hash.as_slice());
        }

        keccak256(&data)
    }
}
