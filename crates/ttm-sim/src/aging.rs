//! Paper insulation aging per IEC 60076-7.
//!
//! The relative aging rate `V` is 1 at the reference hot-spot temperature
//! (98 °C for normal paper). Integrating `V` over time gives the equivalent
//! number of days aged at the reference temperature.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ttm_core::{Real, step_minutes};

use crate::error::{SimError, SimResult};

const MINUTES_PER_DAY: Real = 24.0 * 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperInsulationType {
    #[default]
    Normal,
    ThermallyUpgraded,
}

/// Relative aging rate at a hot-spot temperature [°C].
pub fn relative_aging_rate(hot_spot: Real, insulation: PaperInsulationType) -> Real {
    match insulation {
        PaperInsulationType::Normal => 2.0_f64.powf((hot_spot - 98.0) / 6.0),
        PaperInsulationType::ThermallyUpgraded => {
            (15_000.0 / 383.0 - 15_000.0 / (hot_spot + 273.0)).exp()
        }
    }
}

/// Equivalent days aged over a hot-spot trajectory.
///
/// Each interval contributes the aging rate at its closing point times its
/// length. Fewer than two points age zero days.
pub fn days_aged(
    timestamps: &[NaiveDateTime],
    hot_spot: &[Real],
    insulation: PaperInsulationType,
) -> SimResult<Real> {
    if timestamps.len() != hot_spot.len() {
        return Err(SimError::LengthMismatch {
            what: "hot_spot_temperature",
            expected: timestamps.len(),
            found: hot_spot.len(),
        });
    }
    let steps = step_minutes(timestamps)?;
    Ok(steps
        .iter()
        .zip(hot_spot.iter().skip(1))
        .map(|(dt, &theta)| relative_aging_rate(theta, insulation) * dt / MINUTES_PER_DAY)
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn one_day() -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..=96).map(|i| t0 + Duration::minutes(15 * i)).collect()
    }

    #[test]
    fn reference_temperature_ages_one_day() {
        let stamps = one_day();
        let aged = days_aged(&stamps, &vec![98.0; stamps.len()], PaperInsulationType::Normal)
            .unwrap();
        assert!((aged - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hundred_degrees() {
        let stamps = one_day();
        let hot = vec![100.0; stamps.len()];
        let normal = days_aged(&stamps, &hot, PaperInsulationType::Normal).unwrap();
        assert!((normal - 1.26).abs() / 1.26 < 1e-2);
        let upgraded = days_aged(&stamps, &hot, PaperInsulationType::ThermallyUpgraded).unwrap();
        assert!((upgraded - 0.35).abs() / 0.35 < 1e-2);
    }

    #[test]
    fn single_point_ages_nothing() {
        let stamps = &one_day()[..1];
        assert_eq!(
            days_aged(stamps, &[120.0], PaperInsulationType::Normal).unwrap(),
            0.0
        );
    }

    #[test]
    fn length_mismatch() {
        let stamps = one_day();
        assert!(days_aged(&stamps, &[98.0], PaperInsulationType::Normal).is_err());
    }

    #[test]
    fn aging_rate_doubles_every_six_kelvin() {
        let a = relative_aging_rate(104.0, PaperInsulationType::Normal);
        assert!((a - 2.0).abs() < 1e-12);
        let b = relative_aging_rate(98.0, PaperInsulationType::Normal);
        assert_eq!(b, 1.0);
    }
}
