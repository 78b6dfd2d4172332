use alloy::primitives::B256;
use blob_fee_sim::{BlockBuilder, Demand, FeeMarketConfig, GasCalculator, Transaction};
use proptest::prelude::*;

const PRICE: f64 = 1_000.0;

// (max_fee_per_gas, priority, gas_used, Some((max_fee_per_data_gas, blob_count)))
type TxParams = (f64, f64, i64, Option<(i128, i64)>);

fn tx_params() -> impl Strategy<Value = TxParams> {
    (
        500.0f64..3_000.0,
        0.0f64..500.0,
        0i64..8_000_000,
        prop::option::of((0i128..4, 0i64..4)),
    )
}

fn demand_from(params: &[TxParams]) -> Demand {
    params
        .iter()
        .enumerate()
        .map(|(nonce, (max_fee, priority, gas, blob))| match blob {
            Some((data_fee, blobs)) => {
                Transaction::blob(nonce as u64, *max_fee, *priority, *gas, *data_fee, *blobs)
            }
            None => Transaction::standard(nonce as u64, *max_fee, *priority, *gas),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_included_transactions_are_valid(params in prop::collection::vec(tx_params(), 0..60)) {
        let config = FeeMarketConfig::default();
        let builder = BlockBuilder::new(&config);
        let demand = demand_from(&params);

        let built = builder.build(1, B256::ZERO, &demand, PRICE, 0).unwrap();
        let data_price = built.block.header.data_gas_price;

        for tx in &built.block.transactions {
            prop_assert!(tx.is_valid(PRICE, data_price));
        }
        prop_assert_eq!(
            built.stats.included + built.stats.invalid + built.stats.malformed
                + built.stats.skipped_data_full + built.stats.cut_off,
            demand.len()
        );
    }

    #[test]
    fn prop_overshoot_is_bounded_by_one_transaction(params in prop::collection::vec(tx_params(), 0..60)) {
        let config = FeeMarketConfig::default();
        let builder = BlockBuilder::new(&config);
        let demand = demand_from(&params);

        let block = builder.build(1, B256::ZERO, &demand, PRICE, 0).unwrap().block;

        let largest_gas = block.transactions.iter().map(|tx| tx.gas()).max().unwrap_or(0);
        let largest_data = block
            .transactions
            .iter()
            .map(|tx| tx.data_gas(config.data_gas_per_blob))
            .max()
            .unwrap_or(0);

        prop_assert!(block.gas_used() <= config.gas_limit_per_block + largest_gas);
        prop_assert!(block.data_gas_used() <= config.max_data_gas_per_block + largest_data);
    }

    #[test]
    fn prop_premiums_are_non_increasing(params in prop::collection::vec(tx_params(), 0..60)) {
        let builder = BlockBuilder::new(&FeeMarketConfig::default());
        let demand = demand_from(&params);

        let block = builder.build(1, B256::ZERO, &demand, PRICE, 0).unwrap().block;

        for pair in block.transactions.windows(2) {
            prop_assert!(pair[0].premium(PRICE) >= pair[1].premium(PRICE));
        }
    }

    #[test]
    fn prop_excess_never_underflows(excess in 0u64..(1 << 22), used in 0u64..(1 << 20)) {
        let config = FeeMarketConfig::default();
        let next = GasCalculator::next_excess_data_gas(&config, excess, used);

        if excess + used >= config.target_data_gas_per_block {
            prop_assert_eq!(next, excess + used - config.target_data_gas_per_block);
        } else {
            prop_assert_eq!(next, 0);
        }
    }

    #[test]
    fn prop_price_stays_within_one_step(price in 1.0f64..1e12, used in 0u64..30_000_000) {
        let config = FeeMarketConfig::default();
        let update = GasCalculator::next_price(&config, price, used);
        let step = price * config.max_price_change();

        prop_assert!(update.price >= price - step - 1e-6 * price);
        prop_assert!(update.price <= price + step + 1e-6 * price);
    }
}

#[test]
fn test_empty_demand_builds_empty_block() {
    let builder = BlockBuilder::new(&FeeMarketConfig::default());
    let built = builder.build(5, B256::ZERO, &Demand::new(), PRICE, 1 << 20).unwrap();

    assert!(built.block.is_empty());
    assert_eq!(built.block.header.number, 5);
    assert_eq!(built.block.header.base_fee_per_gas, PRICE);
    assert_eq!(built.stats.considered, 0);
}
