//! Error types for cooling switch configuration.

use thiserror::Error;
use ttm_spec::SpecError;

/// Result type for cooling switch operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors raised while building a cooling switch controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A switch was configured for a transformer without fans.
    #[error("ONAF switch only works when the cooling type is ONAF.")]
    CoolingMismatch,

    /// The natural-cooling parameter set could not be derived.
    #[error("Invalid natural-cooling parameters: {0}")]
    NaturalParameters(#[from] SpecError),
}
