//! Error types for the valuation engine

use thiserror::Error;

/// Errors raised by the valuation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Caller broke an input contract (empty list, out-of-range value, NaN)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Fee schedule failed validation
    #[error("Invalid fee schedule: {0}")]
    InvalidFeeSchedule(String),
}

impl ValuationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for valuation operations
pub type Result<T> = std::result::Result<T, ValuationError>;
