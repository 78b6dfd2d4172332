use blob_fee_sim::{Transaction, TransactionError, TxKind};

#[test]
fn test_identical_fields_different_nonce() {
    let a = Transaction::standard(1, 100.0, 2.0, 21_000);
    let b = Transaction::standard(2, 100.0, 2.0, 21_000);
    let c = Transaction::standard(1, 100.0, 2.0, 21_000);

    assert_ne!(a.hash, b.hash);
    assert_eq!(a.hash, c.hash);
}

#[test]
fn test_blob_fields_change_the_hash() {
    let a = Transaction::blob(7, 100.0, 2.0, 21_000, 10, 1);
    let b = Transaction::blob(7, 100.0, 2.0, 21_000, 10, 2);
    let plain = Transaction::standard(7, 100.0, 2.0, 21_000);

    assert_ne!(a.hash, b.hash);
    assert_ne!(a.hash, plain.hash);
}

#[test]
fn test_premium_is_capped_by_priority_fee() {
    // room above the price is 40, priority cap is 100
    let tx = Transaction::standard(0, 120.0, 100.0, 50_000);
    assert_eq!(tx.premium(80.0), 40.0 * 50_000.0);

    // room above the price is 40, priority cap is 5
    let tx = Transaction::standard(0, 120.0, 5.0, 50_000);
    assert_eq!(tx.premium(80.0), 5.0 * 50_000.0);
}

#[test]
fn test_blob_must_clear_both_prices() {
    let tx = Transaction::blob(0, 100.0, 1.0, 21_000, 50, 2);

    assert!(tx.is_valid(100.0, 50));
    assert!(!tx.is_valid(100.5, 50));
    assert!(!tx.is_valid(100.0, 51));
}

#[test]
fn test_standard_ignores_data_price() {
    let tx = Transaction::standard(0, 100.0, 1.0, 21_000);
    assert!(tx.is_valid(100.0, u128::MAX));
}

#[test]
fn test_malformed_transactions_are_reported() {
    let negative_gas = Transaction::standard(0, 100.0, 1.0, -1);
    assert!(matches!(
        negative_gas.check_well_formed(),
        Err(TransactionError::NegativeGasUsed(-1))
    ));

    let nan_fee = Transaction::standard(0, f64::NAN, 1.0, 21_000);
    assert!(matches!(
        nan_fee.check_well_formed(),
        Err(TransactionError::NonFiniteFee { .. })
    ));

    let negative_blobs = Transaction::blob(0, 100.0, 1.0, 21_000, 10, -3);
    assert!(matches!(
        negative_blobs.check_well_formed(),
        Err(TransactionError::NegativeBlobCount(-3))
    ));
    assert_eq!(negative_blobs.data_gas(1 << 17), 0);
}

#[test]
fn test_serde_keeps_kind() {
    let tx = Transaction::blob(3, 100.0, 1.0, 21_000, i128::from(u64::MAX) + 1, 2);
    let json = serde_json::to_string(&tx).unwrap();
    let back: Transaction = serde_json::from_str(&json).unwrap();

    assert_eq!(back, tx);
    assert!(matches!(back.kind, TxKind::Blob { blob_count: 2, .. }));
}
