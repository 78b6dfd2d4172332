pub mod data_gas_price;
pub mod gas_calculator;
pub mod gas_config;

pub use data_gas_price::*;
pub use gas_calculator::*;
pub use gas_config::*;
