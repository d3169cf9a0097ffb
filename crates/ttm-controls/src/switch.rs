//! Cooling switch configuration.

use serde::{Deserialize, Serialize};
use ttm_core::Real;
use ttm_spec::SpecOverrides;

use crate::error::{ControlError, ControlResult};

/// Hysteresis band on the top-oil temperature [°C].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FanThresholds {
    /// Fans switch on when the top-oil temperature rises to this value.
    pub activation_temp: Real,
    /// Fans switch off when the top-oil temperature falls to this value.
    pub deactivation_temp: Real,
}

impl FanThresholds {
    /// Create a threshold pair.
    ///
    /// # Errors
    ///
    /// Returns error unless `activation_temp > deactivation_temp`.
    pub fn new(activation_temp: Real, deactivation_temp: Real) -> ControlResult<Self> {
        let thresholds = Self {
            activation_temp,
            deactivation_temp,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if !self.activation_temp.is_finite() || !self.deactivation_temp.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "switch temperatures must be finite",
            });
        }
        if self.activation_temp <= self.deactivation_temp {
            return Err(ControlError::InvalidArg {
                what: "Activation temperature must be higher than deactivation temperature.",
            });
        }
        Ok(())
    }
}

/// How the fan state is decided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SwitchMode {
    /// Fan state per profile point, `true` meaning fans on.
    Schedule { fans_on: Vec<bool> },
    /// Hysteresis on the top-oil temperature.
    Threshold(FanThresholds),
}

/// Everything needed to build a [`crate::CoolingSwitchController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolingSwitchSettings {
    pub mode: SwitchMode,
    /// Overrides turning the forced-cooling set into the natural-cooling set.
    pub natural: SpecOverrides,
}

impl CoolingSwitchSettings {
    pub fn schedule(fans_on: Vec<bool>, natural: SpecOverrides) -> Self {
        Self {
            mode: SwitchMode::Schedule { fans_on },
            natural,
        }
    }

    pub fn threshold(thresholds: FanThresholds, natural: SpecOverrides) -> Self {
        Self {
            mode: SwitchMode::Threshold(thresholds),
            natural,
        }
    }
}
