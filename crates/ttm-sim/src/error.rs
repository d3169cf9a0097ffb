//! Error types for simulation operations.

use thiserror::Error;
use ttm_controls::ControlError;
use ttm_core::TtmError;
use ttm_spec::{SpecError, TransformerKind};

/// Errors encountered while building or running a thermal simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Length mismatch: {what} has {found} points, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Length mismatch: fan schedule has {found} entries, profile has {expected} points")]
    ScheduleLength { expected: usize, found: usize },

    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] TtmError),

    #[error(
        "Hot-spot temperature profile is three-winding; use the three-winding flattening instead."
    )]
    ThreeWindingOutput,

    #[error(
        "Hot-spot temperature profile is single-winding; use the single-winding flattening instead."
    )]
    SingleWindingOutput,

    #[error(
        "The upper bound cannot be smaller than the lower bound of the hot-spot factor limits."
    )]
    CalibrationBounds,

    #[error(
        "Incorrect Transformer Type: Hot-spot calibration is only implemented for transformers of type PowerTransformer or ThreeWindingTransformer"
    )]
    UnsupportedCalibration { kind: TransformerKind },

    #[error("Specification error: {0}")]
    Spec(#[from] SpecError),

    #[error("Cooling switch error: {0}")]
    Control(#[from] ControlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
