use thiserror::Error;

/// Errors that stop a simulation: bad setup or a degenerate computation.
///
/// Malformed transactions are not represented here; they are excluded from
/// the block and counted in [`crate::common::BuildStats`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeMarketError {
    #[error("Invalid fee market configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Data gas price did not converge for excess {excess} after {iterations} iterations")]
    ExponentialDiverged { excess: u64, iterations: u32 },

    #[error("Data gas price overflow for excess {excess}")]
    ExponentialOverflow { excess: u64 },
}

impl FeeMarketError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
