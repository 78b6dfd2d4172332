pub mod block;
pub mod blockheader;
pub mod error;
pub mod transaction;

pub use block::Block;
pub use blockheader::BlockHeader;
pub use error::TransactionError;
pub use transaction::{Transaction, TxKind};
