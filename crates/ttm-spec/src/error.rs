//! Error types for building transformer specifications.

use thiserror::Error;
use ttm_core::TtmError;

use crate::kind::{CoolerType, TransformerKind};

/// Result type for specification operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while merging or validating a parameter set.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecError {
    /// A merged value violates its range.
    #[error("Invalid parameter: {what} (value={value})")]
    InvalidParameter { what: &'static str, value: f64 },

    /// Neither the user nor the default table provides the value.
    #[error("Missing parameter: {name} is not set and no default is available")]
    MissingParameter { name: &'static str },

    #[error("{kind} transformers do not support {cooling} cooling")]
    UnsupportedCooling {
        kind: TransformerKind,
        cooling: CoolerType,
    },

    /// Override record does not match the winding arrangement.
    #[error("Override mismatch: {what}")]
    OverrideMismatch { what: &'static str },

    #[error(transparent)]
    Numeric(#[from] TtmError),
}
