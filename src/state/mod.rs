pub mod error;
pub mod market_state;
pub mod state_transition;

pub use error::*;
pub use market_state::*;
pub use state_transition::*;
