use thiserror::Error;

use crate::state::FeeMarketError;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Line {line}: {reason}")]
    Record { line: usize, reason: String },
    #[error("Invalid demand configuration: {0}")]
    InvalidConfig(String),
    #[error("Demand source failed: {0}")]
    Source(String),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    // setup, before any step
    #[error(transparent)]
    Setup(#[from] FeeMarketError),
    #[error("Step {step}: {source}")]
    Step {
        step: u64,
        #[source]
        source: FeeMarketError,
    },
    #[error("Step {step}: {source}")]
    Demand {
        step: u64,
        #[source]
        source: DemandError,
    },
}
