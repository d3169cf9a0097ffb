//! Time-stepped thermal simulation of transformers.
//!
//! Provides:
//! - Validated input profiles (timestamps, ambient, load, optional measured top-oil)
//! - The recursive top-oil / hot-spot engine with optional cooling switch
//! - Output profiles and their tabular flattening
//! - Hot-spot factor calibration
//! - Paper insulation aging

pub mod aging;
pub mod calibration;
pub mod engine;
pub mod error;
pub mod initial;
pub mod output;
pub mod profile;

pub use aging::{PaperInsulationType, days_aged, relative_aging_rate};
pub use calibration::{CalibrationHandle, CalibrationOptions, calibrate_hot_spot_factor};
pub use engine::{ModelOptions, ThermalModel};
pub use error::{SimError, SimResult};
pub use initial::InitialCondition;
pub use output::{HotSpotProfile, OutputProfile, SingleWindingRow, ThreeWindingRow};
pub use profile::{LoadProfile, TemperatureProfile};
