use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use anyhow::{Result, anyhow};

use crate::common::TxHash;
use crate::core::Transaction;

// Pending transactions of a single step, keyed by hash.
// Iteration follows hash order, which fixes the tie-break between equal premiums.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Demand {
    transactions: BTreeMap<TxHash, Transaction>,
}

impl Demand {
    pub fn new() -> Self {
        Self::default()
    }

    // Add a transaction; a second transaction with the same hash is refused
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<TxHash> {
        let tx_hash = transaction.hash;

        match self.transactions.entry(tx_hash) {
            Entry::Occupied(_) => Err(anyhow!(
                "Transaction 0x{} already pending",
                hex::encode(&tx_hash[..8])
            )),
            Entry::Vacant(slot) => {
                slot.insert(transaction);
                Ok(tx_hash)
            }
        }
    }

    pub fn get(&self, hash: &TxHash) -> Option<&Transaction> {
        self.transactions.get(hash)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

// Later duplicates are dropped
impl FromIterator<Transaction> for Demand {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut demand = Demand::new();
        for tx in iter {
            demand.transactions.entry(tx.hash).or_insert(tx);
        }
        demand
    }
}
