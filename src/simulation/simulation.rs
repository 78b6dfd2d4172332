use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::demand::DemandSource;
use super::error::SimulationError;
use super::report::SimulationReport;
use super::synthetic::SyntheticDemandConfig;
use crate::common::{DEFAULT_SEED, DEFAULT_STEPS, StepRecord};
use crate::gas::FeeMarketConfig;
use crate::state::{MarketState, StateTransition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub market: FeeMarketConfig,
    pub demand: SyntheticDemandConfig,
    pub steps: u64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            market: FeeMarketConfig::default(),
            demand: SyntheticDemandConfig::default(),
            steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    // load from JSON; missing fields fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.market.validate().context("Invalid market configuration")?;
        self.demand.validate().context("Invalid demand configuration")?;
        Ok(())
    }
}

/// Block-by-block driver: demand, build, price updates, record.
///
/// Steps run strictly in order. Each one reads the state committed by the
/// previous step and the demand source sees every record committed so far.
pub struct Simulation<D> {
    transition: StateTransition,
    state: MarketState,
    demand: D,
    history: Vec<StepRecord>,
}

impl<D: DemandSource> Simulation<D> {
    pub fn new(config: FeeMarketConfig, demand: D) -> Result<Self, SimulationError> {
        let transition = StateTransition::new(config)?;
        let state = transition.genesis();

        Ok(Self {
            transition,
            state,
            demand,
            history: Vec::new(),
        })
    }

    pub fn state(&self) -> &MarketState {
        &self.state
    }

    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    pub fn config(&self) -> &FeeMarketConfig {
        self.transition.config()
    }

    // advance one block and return its committed record
    pub fn step(&mut self) -> Result<&StepRecord, SimulationError> {
        let step = self.history.len() as u64;

        let demand = self
            .demand
            .demand(step, &self.history)
            .map_err(|source| SimulationError::Demand { step, source })?;

        let (next, record) = self
            .transition
            .apply(&self.state, &demand, step)
            .map_err(|source| SimulationError::Step { step, source })?;

        self.state = next;
        self.history.push(record);

        Ok(&self.history[self.history.len() - 1])
    }

    // exactly `steps` steps, no early exit
    pub fn run(mut self, steps: u64) -> Result<SimulationReport, SimulationError> {
        info!(
            steps,
            initial_price = self.state.price,
            "Starting fee market simulation"
        );

        for _ in 0..steps {
            self.step()?;
        }

        let report = SimulationReport::new(self.config().clone(), self.history, self.state);

        info!(
            steps,
            final_price = report.final_state.price,
            final_excess_data_gas = report.final_state.excess_data_gas,
            "Simulation finished"
        );

        Ok(report)
    }
}
