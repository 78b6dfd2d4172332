use anyhow::Result;
use blob_fee_sim::{
    Demand, DemandError, FeeMarketConfig, MarketState, ReplayDemand, Simulation, StateTransition,
    StepRecord, SyntheticDemand, SyntheticDemandConfig, Transaction,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn gwei(amount: f64) -> f64 {
    amount * 1_000_000_000.0
}

fn transition() -> StateTransition {
    StateTransition::new(FeeMarketConfig::default()).expect("default config is valid")
}

// Scenario A: a block at the gas limit raises the price by 1/8
#[test]
fn test_full_block_raises_price_by_twelve_and_a_half_percent() -> Result<()> {
    let transition = transition();
    let state = transition.genesis();

    let demand: Demand = (0..2)
        .map(|nonce| Transaction::standard(nonce, gwei(10.0), gwei(1.0), 15_000_000))
        .collect();

    let (next, record) = transition.apply(&state, &demand, 0)?;

    assert_eq!(record.block.gas_used(), 30_000_000);
    assert_eq!(next.price, state.price * 1.125);
    Ok(())
}

// Scenario B: an empty block drains exactly one target of excess
#[test]
fn test_empty_block_drains_excess_to_zero() -> Result<()> {
    let transition = transition();
    let state = MarketState {
        excess_data_gas: 1 << 18,
        ..transition.genesis()
    };

    let (next, record) = transition.apply(&state, &Demand::new(), 0)?;

    assert_eq!(next.excess_data_gas, 0);
    assert_eq!(record.data_price, 1);
    Ok(())
}

// Scenario C: higher premium first regardless of arrival order
#[test]
fn test_higher_fee_transaction_is_ordered_first() -> Result<()> {
    let config = FeeMarketConfig {
        initial_price: 80.0,
        ..Default::default()
    };
    let transition = StateTransition::new(config)?;

    let rich = Transaction::standard(0, 120.0, 100.0, 50_000);
    let poor = Transaction::standard(1, 90.0, 100.0, 50_000);

    let mut rich_first = Demand::new();
    rich_first.add_transaction(rich.clone())?;
    rich_first.add_transaction(poor.clone())?;

    let mut poor_first = Demand::new();
    poor_first.add_transaction(poor.clone())?;
    poor_first.add_transaction(rich.clone())?;

    // the pending set is keyed by hash, so arrival order is not even stored
    assert_eq!(rich_first, poor_first);

    for demand in [&rich_first, &poor_first] {
        let (_, record) = transition.apply(&transition.genesis(), demand, 0)?;
        assert_eq!(record.block.transactions, vec![rich.clone(), poor.clone()]);
    }
    Ok(())
}

// Scenario D: priced out on data gas means excluded, whatever the premium
#[test]
fn test_blob_priced_out_on_data_gas_is_excluded() -> Result<()> {
    let transition = transition();
    let state = MarketState {
        excess_data_gas: 20 * transition.config().data_gas_price_update_fraction,
        ..transition.genesis()
    };

    let (_, idle) = transition.apply(&state, &Demand::new(), 0)?;
    let data_price = idle.block.header.data_gas_price;
    assert!(data_price > 1);

    let whale = Transaction::blob(
        0,
        gwei(1_000.0),
        gwei(500.0),
        100_000,
        data_price as i128 - 1,
        1,
    );
    let modest = Transaction::standard(1, gwei(2.0), gwei(0.1), 21_000);
    let demand: Demand = [whale, modest.clone()].into_iter().collect();

    let (_, record) = transition.apply(&state, &demand, 0)?;

    assert_eq!(record.block.transactions, vec![modest]);
    assert_eq!(record.stats.invalid, 1);
    assert_eq!(record.block.data_gas_used(), 0);
    Ok(())
}

#[test]
fn test_malformed_demand_never_aborts_the_run() -> Result<()> {
    let source = |step: u64, _history: &[StepRecord]| -> Result<Demand, DemandError> {
        Ok([
            Transaction::standard(step * 2, gwei(5.0), gwei(1.0), -21_000),
            Transaction::standard(step * 2 + 1, gwei(5.0), gwei(1.0), 21_000),
        ]
        .into_iter()
        .collect())
    };

    let report = Simulation::new(FeeMarketConfig::default(), source)?.run(10)?;

    assert_eq!(report.records.len(), 10);
    assert_eq!(report.total_malformed(), 10);
    assert!(report.records.iter().all(|r| r.stats.included == 1));
    Ok(())
}

#[test]
fn test_synthetic_run_is_reproducible_and_bounded() -> Result<()> {
    let run = |seed| -> Result<Vec<(f64, u64)>> {
        let demand = SyntheticDemand::new(SyntheticDemandConfig::default(), seed)?;
        let report = Simulation::new(FeeMarketConfig::default(), demand)?.run(150)?;
        Ok(report
            .records
            .iter()
            .map(|r| (r.price, r.excess_data_gas))
            .collect())
    };

    let first = run(42)?;
    assert_eq!(first, run(42)?);
    assert_ne!(first, run(43)?);

    let config = FeeMarketConfig::default();
    let limit = config.gas_limit_per_block + 500_000;
    let demand = SyntheticDemand::new(SyntheticDemandConfig::default(), 42)?;
    let report = Simulation::new(config, demand)?.run(150)?;
    for record in &report.records {
        assert!(record.block.gas_used() <= limit);
        assert!(record.price > 0.0);
    }
    Ok(())
}

#[test]
fn test_replay_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        r#"{{"block": 17000000, "max_fee_per_gas": 2000000000.0, "max_priority_fee_per_gas": 100000000.0, "gas_used": 21000}}"#
    )?;
    writeln!(file, r#"{{"block": 17000000, "max_fee_per_gas": oops"#)?;
    writeln!(
        file,
        r#"{{"block": 17000000, "max_fee_per_gas": 3000000000.0, "max_priority_fee_per_gas": 200000000.0, "gas_used": 100000, "max_fee_per_data_gas": 5, "blob_count": 2}}"#
    )?;
    writeln!(
        file,
        r#"{{"block": 17000001, "max_fee_per_gas": 500000000.0, "max_priority_fee_per_gas": 1.0, "gas_used": 21000}}"#
    )?;
    file.flush()?;

    let demand = ReplayDemand::from_path(file.path())?;
    assert_eq!(demand.skipped(), 1);
    assert_eq!(demand.remaining(), 2);

    let report = Simulation::new(FeeMarketConfig::default(), demand)?.run(4)?;

    assert_eq!(report.records[0].block.transactions.len(), 2);
    assert_eq!(report.records[0].block.data_gas_used(), 2 << 17);
    // 0.5 gwei cannot clear the 0.875 gwei price of the second block
    assert!(report.records[1].block.is_empty());
    assert_eq!(report.records[1].stats.invalid, 1);
    assert!(report.records[2].block.is_empty());
    assert_eq!(report.records[3].stats.considered, 0);
    Ok(())
}
