//! Two-state cooling switch controller.
//!
//! The controller owns both parameter sets. Switching hands out the other set
//! for subsequent steps; nothing already computed is revisited.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ttm_core::Real;
use ttm_spec::{CoolerType, ThermalCharacteristics, Transformer};

use crate::error::{ControlError, ControlResult};
use crate::switch::{CoolingSwitchSettings, SwitchMode};

/// Active cooling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoolingState {
    /// Fans on: the transformer's own (ONAF) parameter set.
    Forced,
    /// Fans off: the ONAF set with the natural-cooling overrides.
    Natural,
}

#[derive(Debug, Clone)]
pub struct CoolingSwitchController {
    mode: SwitchMode,
    forced: Transformer,
    natural: Transformer,
    state: CoolingState,
}

impl CoolingSwitchController {
    /// Create a controller for an ONAF transformer.
    ///
    /// The schedule length is not checked here; the profile may not be known yet.
    ///
    /// # Errors
    ///
    /// - [`ControlError::CoolingMismatch`] if `forced` is not ONAF
    /// - [`ControlError::InvalidArg`] for an invalid threshold pair or an empty schedule
    /// - [`ControlError::NaturalParameters`] if the overrides do not fit the transformer
    pub fn new(settings: &CoolingSwitchSettings, forced: &Transformer) -> ControlResult<Self> {
        if forced.cooling() != CoolerType::Onaf {
            return Err(ControlError::CoolingMismatch);
        }
        match &settings.mode {
            SwitchMode::Threshold(thresholds) => thresholds.validate()?,
            SwitchMode::Schedule { fans_on } if fans_on.is_empty() => {
                return Err(ControlError::InvalidArg {
                    what: "fan schedule must not be empty",
                });
            }
            SwitchMode::Schedule { .. } => {}
        }
        let natural = forced.with_overrides(&settings.natural)?;
        Ok(Self {
            mode: settings.mode.clone(),
            forced: forced.clone(),
            natural,
            state: CoolingState::Forced,
        })
    }

    /// Length of the fan schedule, if the controller runs on one.
    pub fn schedule_len(&self) -> Option<usize> {
        match &self.mode {
            SwitchMode::Schedule { fans_on } => Some(fans_on.len()),
            SwitchMode::Threshold(_) => None,
        }
    }

    pub fn state(&self) -> CoolingState {
        self.state
    }

    /// Parameter set of the current state.
    pub fn active(&self) -> &Transformer {
        match self.state {
            CoolingState::Forced => &self.forced,
            CoolingState::Natural => &self.natural,
        }
    }

    pub fn forced(&self) -> &Transformer {
        &self.forced
    }

    pub fn natural(&self) -> &Transformer {
        &self.natural
    }

    /// Choose the starting state and return its parameter set.
    ///
    /// A schedule starts in the state of its first entry. Thresholds start
    /// natural unless `initial_top_oil` already reaches the activation temperature.
    pub fn start(&mut self, initial_top_oil: Real) -> &Transformer {
        self.state = match &self.mode {
            SwitchMode::Schedule { fans_on } => match fans_on.first() {
                Some(false) => CoolingState::Natural,
                _ => CoolingState::Forced,
            },
            SwitchMode::Threshold(thresholds) => {
                if initial_top_oil >= thresholds.activation_temp {
                    CoolingState::Forced
                } else {
                    CoolingState::Natural
                }
            }
        };
        debug!(state = ?self.state, initial_top_oil, "cooling switch start");
        self.active()
    }

    /// Apply the transition rule at step `index`.
    ///
    /// Schedule mode compares entries `index` and `index + 1`; threshold mode
    /// looks for a crossing between `previous_top_oil` and `top_oil`.
    /// Returns the newly active parameter set when the state changes.
    pub fn update(
        &mut self,
        index: usize,
        top_oil: Real,
        previous_top_oil: Real,
    ) -> Option<&Transformer> {
        let next = match &self.mode {
            SwitchMode::Schedule { fans_on } => {
                match (fans_on.get(index), fans_on.get(index + 1)) {
                    (Some(&was_on), Some(&is_on)) if was_on != is_on => Some(if is_on {
                        CoolingState::Forced
                    } else {
                        CoolingState::Natural
                    }),
                    _ => None,
                }
            }
            SwitchMode::Threshold(t) => {
                if previous_top_oil < t.activation_temp && t.activation_temp <= top_oil {
                    Some(CoolingState::Forced)
                } else if previous_top_oil > t.deactivation_temp && t.deactivation_temp >= top_oil
                {
                    Some(CoolingState::Natural)
                } else {
                    None
                }
            }
        }?;

        if next == self.state {
            return None;
        }
        debug!(index, from = ?self.state, to = ?next, top_oil, "cooling switch");
        self.state = next;
        Some(self.active())
    }
}
