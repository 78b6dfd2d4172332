pub mod demand;
pub mod error;
pub mod replay;
pub mod report;
pub mod runner;
pub mod simulation;
pub mod synthetic;

pub use demand::*;
pub use error::*;
pub use replay::*;
pub use report::*;
pub use runner::*;
pub use simulation::*;
pub use synthetic::*;
