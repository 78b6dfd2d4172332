use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blob_fee_sim::simulation::{
    ReplayDemand, Simulation, SimulationConfig, report, run_batch, seed_sweep,
};
use chrono::Utc;
use clap::Parser;
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(name = "blob-fee-sim")]
#[command(about = "Simulate execution gas and blob data gas fee markets block by block")]
struct Cli {
    /// JSON simulation config; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of blocks to simulate
    #[arg(short, long)]
    steps: Option<u64>,

    /// Seed of the first run
    #[arg(long)]
    seed: Option<u64>,

    /// Independent runs with consecutive seeds, executed in parallel
    #[arg(short, long, default_value = "1")]
    runs: usize,

    /// Replay historical demand from a JSON-lines file instead of random demand
    #[arg(long, conflicts_with = "runs")]
    replay: Option<PathBuf>,

    /// Write step records as JSON lines (one file per run)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn print_banner() {
    println!(
        "
╔═══════════════════════════════════════════════════════════╗
║                                                           ║
║               ⛽ BLOB FEE MARKET SIMULATOR ⛽              ║
║                                                           ║
║        Execution gas (1559) + data gas (4844) pricing     ║
║                                                           ║
╚═══════════════════════════════════════════════════════════╝
"
    );
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

// steps.jsonl -> steps-3.jsonl when there are several runs
fn output_path_for(base: &Path, run: usize, runs: usize) -> PathBuf {
    if runs <= 1 {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "steps".to_string());
    let file_name = match base.extension() {
        Some(ext) => format!("{stem}-{run}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{run}"),
    };
    base.with_file_name(file_name)
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(steps) = cli.steps {
        config.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    config.validate()?;
    Ok(config)
}

fn run_replay(config: &SimulationConfig, path: &Path, output: Option<&Path>) -> Result<()> {
    let started_at = Utc::now();
    let demand = ReplayDemand::from_path(path)
        .with_context(|| format!("Failed to load replay {}", path.display()))?;

    let report = Simulation::new(config.market.clone(), demand)?.run(config.steps)?;
    println!("{}", report.summary(0, config.seed, started_at));

    if let Some(output) = output {
        report::write_json_lines(output, &report.records)?;
        info!("Step records written to {}", output.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    info!(
        steps = config.steps,
        seed = config.seed,
        runs = cli.runs,
        max_blobs = config.market.max_blobs_per_block(),
        "✅ Configuration loaded"
    );

    if let Some(replay) = &cli.replay {
        return run_replay(&config, replay, cli.output.as_deref());
    }

    let outputs = run_batch(seed_sweep(&config, cli.runs.max(1))).await?;

    for output in &outputs {
        println!("{}", output.summary);
    }

    if let Some(base) = &cli.output {
        for output in &outputs {
            let path = output_path_for(base, output.summary.run, outputs.len());
            report::write_json_lines(&path, &output.report.records)?;
            info!("Step records written to {}", path.display());
        }
    }

    Ok(())
}
