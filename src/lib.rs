pub mod common;
pub mod core;
pub mod execution;
pub mod gas;
pub mod simulation;
pub mod state;

// Re-export commonly used types for convenience
pub use common::{BuildStats, StepRecord, TxHash};
pub use crate::core::{Block, BlockHeader, Transaction, TransactionError, TxKind};
pub use execution::{BlockBuilder, BuiltBlock, Demand};
pub use gas::{DataGasPricer, FeeMarketConfig, GasCalculator, PriceUpdate};
pub use simulation::{
    DemandError, DemandSource, NoDemand, ReplayDemand, Simulation, SimulationConfig,
    SimulationError, SimulationReport, SyntheticDemand, SyntheticDemandConfig,
};
pub use state::{FeeMarketError, MarketState, StateTransition};

// Export anyhow::Result for convenience
pub use anyhow::Result;
