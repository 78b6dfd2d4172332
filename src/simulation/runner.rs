use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use super::report::{RunSummary, SimulationReport};
use super::simulation::{Simulation, SimulationConfig};
use super::synthetic::SyntheticDemand;

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub summary: RunSummary,
    pub report: SimulationReport,
}

// one synthetic run, start to finish
pub fn run_synthetic(run: usize, config: SimulationConfig) -> Result<RunOutput> {
    let started_at = Utc::now();

    let demand = SyntheticDemand::new(config.demand.clone(), config.seed)
        .with_context(|| format!("Run {run}: invalid demand configuration"))?;

    let report = Simulation::new(config.market.clone(), demand)
        .and_then(|simulation| simulation.run(config.steps))
        .with_context(|| format!("Run {run} (seed {}) failed", config.seed))?;

    let summary = report.summary(run, config.seed, started_at);
    Ok(RunOutput { summary, report })
}

/// Runs independent simulations in parallel, one blocking task per run.
///
/// Runs share nothing: each task owns its config, market state and demand
/// source. Results come back in input order.
pub async fn run_batch(configs: Vec<SimulationConfig>) -> Result<Vec<RunOutput>> {
    info!("Launching {} independent runs", configs.len());

    let handles: Vec<_> = configs
        .into_iter()
        .enumerate()
        .map(|(run, config)| tokio::task::spawn_blocking(move || run_synthetic(run, config)))
        .collect();

    let mut outputs = Vec::with_capacity(handles.len());
    for handle in handles {
        let output = handle.await.context("Simulation task panicked")??;
        info!("{}", output.summary);
        outputs.push(output);
    }

    Ok(outputs)
}

// `runs` copies of `base` with consecutive seeds
pub fn seed_sweep(base: &SimulationConfig, runs: usize) -> Vec<SimulationConfig> {
    (0..runs as u64)
        .map(|offset| SimulationConfig {
            seed: base.seed.wrapping_add(offset),
            ..base.clone()
        })
        .collect()
}
