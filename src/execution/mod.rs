pub mod block_builder;
pub mod mempool;

pub use block_builder::*;
pub use mempool::*;
