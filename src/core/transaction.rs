use alloy::primitives::keccak256;
use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use crate::common::TxHash;

// The second resource dimension only exists on blob transactions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Standard,
    Blob {
        max_fee_per_data_gas: i128,
        blob_count: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,

    // GAS FIELDS
    pub max_fee_per_gas: f64,
    pub max_priority_fee_per_gas: f64,
    pub gas_used: i64,

    pub kind: TxKind,
}

impl Transaction {
    // plain execution gas transaction
    pub fn standard(
        nonce: u64,
        max_fee_per_gas: f64,
        max_priority_fee_per_gas: f64,
        gas_used: i64,
    ) -> Self {
        Self::with_kind(
            nonce,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_used,
            TxKind::Standard,
        )
    }

    // transaction carrying `blob_count` blobs of data gas
    pub fn blob(
        nonce: u64,
        max_fee_per_gas: f64,
        max_priority_fee_per_gas: f64,
        gas_used: i64,
        max_fee_per_data_gas: i128,
        blob_count: i64,
    ) -> Self {
        Self::with_kind(
            nonce,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_used,
            TxKind::Blob {
                max_fee_per_data_gas,
                blob_count,
            },
        )
    }

    pub fn with_kind(
        nonce: u64,
        max_fee_per_gas: f64,
        max_priority_fee_per_gas: f64,
        gas_used: i64,
        kind: TxKind,
    ) -> Self {
        let hash = Self::calculate_hash(
            nonce,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_used,
            &kind,
        );

        Self {
            hash,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_used,
            kind,
        }
    }

    // identity hash; the nonce keeps otherwise identical transactions apart
    pub fn calculate_hash(
        nonce: u64,
        max_fee_per_gas: f64,
        max_priority_fee_per_gas: f64,
        gas_used: i64,
        kind: &TxKind,
    ) -> TxHash {
        let mut data = Vec::new();

        data.extend_from_slice(&nonce.to_be_bytes());
        data.extend_from_slice(&max_fee_per_gas.to_be_bytes());
        data.extend_from_slice(&max_priority_fee_per_gas.to_be_bytes());
        data.extend_from_slice(&gas_used.to_be_bytes());

        if let TxKind::Blob {
            max_fee_per_data_gas,
            blob_count,
        } = kind
        {
            data.extend_from_slice(&max_fee_per_data_gas.to_be_bytes());
            data.extend_from_slice(&blob_count.to_be_bytes());
        }

        keccak256(data)
    }

    pub fn is_blob(&self) -> bool {
        matches!(self.kind, TxKind::Blob { .. })
    }

    /// Whether the sender's caps cover the current prices.
    ///
    /// Standard transactions ignore `data_price`. A blob transaction must clear
    /// both markets; there is no partial inclusion.
    pub fn is_valid(&self, price: f64, data_price: u128) -> bool {
        if self.max_fee_per_gas < price {
            return false;
        }

        match self.kind {
            TxKind::Standard => true,
            TxKind::Blob {
                max_fee_per_data_gas,
                ..
            } => u128::try_from(max_fee_per_data_gas).is_ok_and(|cap| cap >= data_price),
        }
    }

    /// Total tip paid to the block producer at `price`.
    ///
    /// The per-gas tip is `max_fee_per_gas - price` capped at
    /// `max_priority_fee_per_gas`. Only execution gas takes part in the
    /// priority auction, so blob transactions use the same formula.
    pub fn premium(&self, price: f64) -> f64 {
        let tip = (self.max_fee_per_gas - price).min(self.max_priority_fee_per_gas);
        self.gas_used as f64 * tip
    }

    // data gas consumed if included; zero for standard transactions
    pub fn data_gas(&self, data_gas_per_blob: u64) -> u64 {
        match self.kind {
            TxKind::Standard => 0,
            TxKind::Blob { blob_count, .. } => {
                u64::try_from(blob_count).map_or(0, |count| count.saturating_mul(data_gas_per_blob))
            }
        }
    }

    // execution gas consumed if included
    pub fn gas(&self) -> u64 {
        u64::try_from(self.gas_used).unwrap_or(0)
    }

    // reject records that a demand source should never have produced
    pub fn check_well_formed(&self) -> Result<(), TransactionError> {
        check_fee("max_fee_per_gas", self.max_fee_per_gas)?;
        check_fee("max_priority_fee_per_gas", self.max_priority_fee_per_gas)?;

        if self.gas_used < 0 {
            return Err(TransactionError::NegativeGasUsed(self.gas_used));
        }

        if let TxKind::Blob {
            max_fee_per_data_gas,
            blob_count,
        } = self.kind
        {
            if max_fee_per_data_gas < 0 {
                return Err(TransactionError::NegativeDataFee(max_fee_per_data_gas));
            }
            if blob_count < 0 {
                return Err(TransactionError::NegativeBlobCount(blob_count));
            }
        }

        Ok(())
    }

    // short hash for logs
    pub fn short_hash(&self) -> String {
        hex::encode(&self.hash[..8])
    }
}

fn check_fee(field: &'static str, value: f64) -> Result<(), TransactionError> {
    if !value.is_finite() {
        return Err(TransactionError::NonFiniteFee { field });
    }
    if value < 0.0 {
        return Err(TransactionError::NegativeFee { field, value });
    }
    Ok(())
}
