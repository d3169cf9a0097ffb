//! Hot-spot factor calibration.
//!
//! The factor is searched downward from the upper bound in fixed steps. Each
//! candidate runs a constant rated-load profile at constant ambient for one
//! week; the first candidate whose peak hot-spot stays at or below the limit
//! is kept. Three-winding transformers take the smallest per-side result.
//! Distribution transformers are not calibrated.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ttm_core::{Real, ensure_finite};
use ttm_spec::{ThermalCharacteristics, Transformer, TransformerKind};

use crate::engine::{ModelOptions, ThermalModel};
use crate::error::{SimError, SimResult};
use crate::profile::TemperatureProfile;

/// Points in the calibration profile (one week at 15 minute steps).
pub const CALIBRATION_POINTS: usize = 672;
const CALIBRATION_STEP_MINUTES: i64 = 15;
const SEARCH_STEP: Real = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationOptions {
    /// Hot-spot limit [°C].
    pub hot_spot_limit: Real,
    /// Constant ambient temperature [°C].
    pub ambient_temp: Real,
    pub hot_spot_factor_min: Real,
    pub hot_spot_factor_max: Real,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            hot_spot_limit: 98.0,
            ambient_temp: 20.0,
            hot_spot_factor_min: 1.1,
            hot_spot_factor_max: 1.3,
        }
    }
}

impl CalibrationOptions {
    pub fn validate(&self) -> SimResult<()> {
        ensure_finite(self.hot_spot_limit, "hot_spot_limit")?;
        ensure_finite(self.ambient_temp, "ambient_temp")?;
        ensure_finite(self.hot_spot_factor_min, "hot_spot_factor_min")?;
        ensure_finite(self.hot_spot_factor_max, "hot_spot_factor_max")?;
        if self.hot_spot_factor_min > self.hot_spot_factor_max {
            return Err(SimError::CalibrationBounds);
        }
        Ok(())
    }
}

/// Private working copy of a transformer with the ambient surcharge zeroed.
///
/// The caller's transformer is never touched; the surcharge is put back on
/// the calibrated result.
#[derive(Debug, Clone)]
pub struct CalibrationHandle {
    transformer: Transformer,
    amb_temp_surcharge: Real,
}

impl CalibrationHandle {
    pub fn new(transformer: &Transformer) -> SimResult<Self> {
        let kind = transformer.kind();
        if kind == TransformerKind::Distribution {
            return Err(SimError::UnsupportedCalibration { kind });
        }
        let amb_temp_surcharge = transformer.base().amb_temp_surcharge;
        Ok(Self {
            transformer: transformer.with_amb_temp_surcharge(0.0)?,
            amb_temp_surcharge,
        })
    }

    /// Peak hot-spot per winding for one candidate factor under rated load.
    pub fn peak_hot_spot(&self, hot_spot_fac: Real, ambient_temp: Real) -> SimResult<Vec<Real>> {
        let candidate = self.transformer.with_hot_spot_fac(hot_spot_fac)?;
        let rated: Vec<Real> = candidate.windings().iter().map(|w| w.nom_load).collect();
        let profile = TemperatureProfile::constant(
            calibration_start()?,
            Duration::minutes(CALIBRATION_STEP_MINUTES),
            CALIBRATION_POINTS,
            ambient_temp,
            &rated,
        )?;
        let output = ThermalModel::new(profile, &candidate, ModelOptions::default())?.run()?;
        Ok(output.hot_spot().peaks())
    }

    pub fn calibrate(&self, options: &CalibrationOptions) -> SimResult<Transformer> {
        options.validate()?;

        let windings = self.transformer.winding_count();
        let mut accepted: Vec<Option<Real>> = vec![None; windings];
        let mut candidate = options.hot_spot_factor_max;
        let mut tested = candidate;

        while accepted.iter().any(Option::is_none)
            && candidate >= options.hot_spot_factor_min - SEARCH_STEP
        {
            tested = candidate;
            let peaks = self.peak_hot_spot(tested, options.ambient_temp)?;
            debug!(hot_spot_fac = tested, ?peaks, "calibration candidate");
            for (slot, &peak) in accepted.iter_mut().zip(&peaks) {
                if slot.is_none() && peak <= options.hot_spot_limit {
                    *slot = Some(tested);
                }
            }
            candidate = tested - SEARCH_STEP;
        }

        let factor = accepted
            .into_iter()
            .map(|slot| slot.unwrap_or(tested))
            .fold(Real::INFINITY, Real::min)
            .clamp(options.hot_spot_factor_min, options.hot_spot_factor_max);

        info!(
            hot_spot_fac = factor,
            hot_spot_limit = options.hot_spot_limit,
            "calibrated hot-spot factor"
        );

        Ok(self
            .transformer
            .with_hot_spot_fac(factor)?
            .with_amb_temp_surcharge(self.amb_temp_surcharge)?)
    }
}

/// Calibrate the hot-spot factor of `transformer`, returning a new transformer.
///
/// # Errors
///
/// Fails before any simulation runs with
/// - [`SimError::CalibrationBounds`] when the lower bound exceeds the upper bound
/// - [`SimError::UnsupportedCalibration`] for a distribution transformer
pub fn calibrate_hot_spot_factor(
    transformer: &Transformer,
    options: &CalibrationOptions,
) -> SimResult<Transformer> {
    options.validate()?;
    CalibrationHandle::new(transformer)?.calibrate(options)
}

fn calibration_start() -> SimResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or(SimError::InvalidArg {
            what: "calibration start date",
        })
}
