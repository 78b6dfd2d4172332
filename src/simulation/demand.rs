use super::error::DemandError;
use crate::common::StepRecord;
use crate::execution::Demand;

/// Supplies the pending transactions of each step.
///
/// `history` holds every committed step so far, oldest first; its last entry
/// carries the prices the next block will be built against. Returning an
/// empty [`Demand`] is valid.
pub trait DemandSource {
    fn demand(&mut self, step: u64, history: &[StepRecord]) -> Result<Demand, DemandError>;
}

impl<F> DemandSource for F
where
    F: FnMut(u64, &[StepRecord]) -> Result<Demand, DemandError>,
{
    fn demand(&mut self, step: u64, history: &[StepRecord]) -> Result<Demand, DemandError> {
        self(step, history)
    }
}

// No demand at all, e.g. to watch both prices decay
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDemand;

impl DemandSource for NoDemand {
    fn demand(&mut self, _step: u64, _history: &[StepRecord]) -> Result<Demand, DemandError> {
        Ok(Demand::new())
    }
}
