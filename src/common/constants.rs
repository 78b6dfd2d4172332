// Execution gas, EIP-1559 style
pub const GAS_LIMIT_PER_BLOCK: u64 = 30_000_000;
pub const GAS_TARGET_PER_BLOCK: u64 = 15_000_000;
pub const PRICE_CHANGE_DENOMINATOR: u64 = 8; // max 12.5% change per block

// Data gas, EIP-4844 launch-era values
pub const DATA_GAS_PER_BLOB: u64 = 1 << 17;
pub const MAX_DATA_GAS_PER_BLOCK: u64 = 1 << 19; // 4 blobs
pub const TARGET_DATA_GAS_PER_BLOCK: u64 = 1 << 18; // 2 blobs
pub const MIN_DATA_GAS_PRICE: u64 = 1;
pub const DATA_GAS_PRICE_UPDATE_FRACTION: u64 = 2_225_652;

pub const INITIAL_PRICE: f64 = 1_000_000_000.0; // 1 gwei
pub const MIN_PRICE: f64 = 1.0;

// Bound on the Taylor series in the data gas oracle
pub const MAX_EXPONENTIAL_ITERATIONS: u32 = 1024;

pub const DEFAULT_STEPS: u64 = 200;
pub const DEFAULT_SEED: u64 = 1;
