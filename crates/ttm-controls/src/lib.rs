//! Cooling switch control for ONAF transformers.
//!
//! A transformer with fans can run in two modes: forced cooling (fans on,
//! the transformer's own parameter set) and natural cooling (fans off, the
//! same set with natural-cooling overrides applied). The controller decides
//! at every step which of the two parameter sets is active.
//!
//! # Modes
//!
//! - **Schedule**: an explicit fan on/off flag per profile point
//! - **Threshold**: hysteresis on the top-oil temperature, with the fans
//!   switching on at the activation temperature and off at the deactivation
//!   temperature

pub mod controller;
pub mod error;
pub mod switch;

pub use controller::{CoolingState, CoolingSwitchController};
pub use error::{ControlError, ControlResult};
pub use switch::{CoolingSwitchSettings, FanThresholds, SwitchMode};
