use thiserror::Error;

// Malformed demand: rejected at validation, never fatal to a run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransactionError {
    #[error("Negative gas used: {0}")]
    NegativeGasUsed(i64),
    #[error("Negative {field}: {value}")]
    NegativeFee { field: &'static str, value: f64 },
    #[error("Non-finite {field}")]
    NonFiniteFee { field: &'static str },
    #[error("Negative max fee per data gas: {0}")]
    NegativeDataFee(i128),
    #[error("Negative blob count: {0}")]
    NegativeBlobCount(i64),
}
