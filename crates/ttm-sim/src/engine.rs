//! The recursive thermal model.
//!
//! Per step from `t-1` to `t` (Δt minutes):
//! 1. let the cooling switch swap the active parameter set, based on top-oil at `t-1`
//! 2. top-oil lags toward `internal_temperature(ambient(t)) + end_rise(load(t))`
//!    with time constant `k11 · τ_oil`
//! 3. per winding, two lag terms follow the static hot-spot rise `s`:
//!    `Δθ_w → k21·s` with time constant `k22 · τ_w`, and
//!    `Δθ_o → (k21 − 1)·s` with time constant `τ_oil / k22`
//! 4. hot-spot = top-oil + Δθ_w − Δθ_o
//!
//! Each lag is written `target + (prev − target)·e^(−Δt/τ)`: a step much
//! longer than τ lands on the target exactly, and a zero-length step returns
//! the previous state untouched.

use tracing::{debug, info};
use ttm_controls::{CoolingSwitchController, CoolingSwitchSettings};
use ttm_core::{Real, ensure_finite, ensure_non_negative, step_minutes};
use ttm_spec::{BaseSpecifications, PerSide, ThermalCharacteristics, Transformer};

use crate::error::{SimError, SimResult};
use crate::initial::InitialCondition;
use crate::output::{HotSpotProfile, OutputProfile};
use crate::profile::TemperatureProfile;

/// Options for building a [`ThermalModel`].
#[derive(Clone, Debug, Default)]
pub struct ModelOptions {
    /// Starting state (default: cold start)
    pub initial_condition: InitialCondition,
    /// ONAN/ONAF switching; requires an ONAF transformer
    pub cooling_switch: Option<CoolingSwitchSettings>,
}

/// Lag state of one winding.
#[derive(Clone, Copy, Debug, Default)]
struct WindingState {
    rise_winding: Real,
    rise_oil: Real,
}

impl WindingState {
    fn steady(static_rise: Real, base: &BaseSpecifications) -> Self {
        let k21 = Real::from(base.winding_const_k21);
        Self {
            rise_winding: k21 * static_rise,
            rise_oil: (k21 - 1.0) * static_rise,
        }
    }

    fn advance(&mut self, static_rise: Real, dt: Real, base: &BaseSpecifications) {
        let k21 = Real::from(base.winding_const_k21);
        let k22 = Real::from(base.winding_const_k22);
        self.rise_winding = lag(
            self.rise_winding,
            k21 * static_rise,
            dt,
            k22 * base.time_const_windings,
        );
        self.rise_oil = lag(
            self.rise_oil,
            (k21 - 1.0) * static_rise,
            dt,
            base.time_const_oil / k22,
        );
    }

    fn hot_spot_rise(&self) -> Real {
        self.rise_winding - self.rise_oil
    }
}

fn advance_top_oil(previous: Real, target: Real, dt: Real, base: &BaseSpecifications) -> Real {
    lag(previous, target, dt, base.oil_const_k11 * base.time_const_oil)
}

/// First-order lag of `previous` toward `target` over `dt` minutes.
fn lag(previous: Real, target: Real, dt: Real, tau: Real) -> Real {
    if dt == 0.0 {
        return previous;
    }
    target + (previous - target) * (-dt / tau).exp()
}

/// Thermal model bound to one profile and one transformer.
///
/// Construction validates everything; [`ThermalModel::run`] cannot fail on
/// input shape and can be called repeatedly with identical results.
#[derive(Clone, Debug)]
pub struct ThermalModel {
    profile: TemperatureProfile,
    transformer: Transformer,
    initial_condition: InitialCondition,
    controller: Option<CoolingSwitchController>,
    steps: Vec<Real>,
}

impl ThermalModel {
    /// Create a model. The transformer is copied; the caller's value is never touched.
    ///
    /// # Errors
    ///
    /// - load arrangement or initial condition not matching the transformer
    /// - invalid cooling switch configuration
    /// - a fan schedule whose length differs from the profile
    pub fn new(
        profile: TemperatureProfile,
        transformer: &Transformer,
        options: ModelOptions,
    ) -> SimResult<Self> {
        let windings = transformer.winding_count();
        if profile.load().winding_count() != windings {
            return Err(SimError::InvalidArg {
                what: "load profile arrangement does not match the transformer windings",
            });
        }
        check_initial_condition(&options.initial_condition, windings)?;

        let controller = options
            .cooling_switch
            .as_ref()
            .map(|settings| CoolingSwitchController::new(settings, transformer))
            .transpose()?;
        if let Some(found) = controller.as_ref().and_then(|c| c.schedule_len()) {
            if found != profile.len() {
                return Err(SimError::ScheduleLength {
                    expected: profile.len(),
                    found,
                });
            }
        }
        let steps = step_minutes(profile.timestamps())?;

        Ok(Self {
            profile,
            transformer: transformer.clone(),
            initial_condition: options.initial_condition,
            controller,
            steps,
        })
    }

    pub fn profile(&self) -> &TemperatureProfile {
        &self.profile
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// Run the recursion over the whole profile.
    pub fn run(&self) -> SimResult<OutputProfile> {
        let n = self.profile.len();
        let ambient = self.profile.ambient();
        let measured = self.profile.top_oil_measured();
        let columns = self.profile.load().columns();
        let winding_count = columns.len();
        let mut load_buf = [0.0; 3];
        debug!(points = n, windings = winding_count, "thermal model start");

        let mut controller = self.controller.clone();
        let mut active = match controller.as_mut() {
            Some(c) => {
                let first_top_oil = match measured {
                    Some(m) => m[0],
                    None => self.initial_state(&self.transformer, ambient[0]).0,
                };
                c.start(first_top_oil).clone()
            }
            None => self.transformer.clone(),
        };

        let (mut top_oil, mut winding_states) = self.initial_state(&active, ambient[0]);
        let mut top_oil_out = Vec::with_capacity(n);
        let mut hot_spot_out: Vec<Vec<Real>> = vec![Vec::with_capacity(n); winding_count];
        top_oil_out.push(top_oil);
        for (out, state) in hot_spot_out.iter_mut().zip(&winding_states) {
            out.push(top_oil + state.hot_spot_rise());
        }

        for i in 1..n {
            if let Some(c) = controller.as_mut() {
                let history = measured.unwrap_or(&top_oil_out);
                let current = history[i - 1];
                let previous = history[i.saturating_sub(2)];
                if let Some(next) = c.update(i - 1, current, previous) {
                    active = next.clone();
                }
            }

            let dt = self.steps[i - 1];
            for (slot, column) in load_buf.iter_mut().zip(&columns) {
                *slot = column[i];
            }
            let load = &load_buf[..winding_count];
            let base = active.base();

            let target =
                active.internal_temperature(ambient[i]) + active.end_temperature_top_oil(load);
            top_oil = advance_top_oil(top_oil, target, dt, base);
            top_oil_out.push(top_oil);

            for (w, winding) in active.windings().iter().enumerate() {
                let static_rise = active.hot_spot_static_rise(winding, load[w]);
                winding_states[w].advance(static_rise, dt, base);
                hot_spot_out[w].push(top_oil + winding_states[w].hot_spot_rise());
            }
        }

        let mut sides = hot_spot_out.into_iter();
        let hot_spot = if self.transformer.is_three_winding() {
            let lv = sides.next().unwrap_or_default();
            let mv = sides.next().unwrap_or_default();
            let hv = sides.next().unwrap_or_default();
            HotSpotProfile::ThreeWinding(PerSide::new(lv, mv, hv))
        } else {
            HotSpotProfile::Single(sides.next().unwrap_or_default())
        };
        let output = OutputProfile::new(self.profile.timestamps().to_vec(), top_oil_out, hot_spot);
        info!(
            points = n,
            peak_top_oil = ?output.peak_top_oil(),
            peak_hot_spot = ?output.peak_hot_spot(),
            "thermal model finished"
        );
        Ok(output)
    }

    /// Top-oil temperature and winding lag states at the first point.
    fn initial_state(&self, transformer: &Transformer, ambient: Real) -> (Real, Vec<WindingState>) {
        let cold = vec![WindingState::default(); transformer.winding_count()];
        match self.initial_condition {
            InitialCondition::ColdStart => (transformer.internal_temperature(ambient), cold),
            InitialCondition::TopOil { value } => (value, cold),
            InitialCondition::Load { value } => steady_state(transformer, ambient, &[value]),
            InitialCondition::SideLoads(loads) => {
                steady_state(transformer, ambient, &loads.into_array())
            }
        }
    }
}

fn steady_state(transformer: &Transformer, ambient: Real, load: &[Real]) -> (Real, Vec<WindingState>) {
    let base = transformer.base();
    let top_oil =
        transformer.internal_temperature(ambient) + transformer.end_temperature_top_oil(load);
    let states = transformer
        .windings()
        .iter()
        .zip(load)
        .map(|(winding, &l)| WindingState::steady(transformer.hot_spot_static_rise(winding, l), base))
        .collect();
    (top_oil, states)
}

fn check_initial_condition(condition: &InitialCondition, windings: usize) -> SimResult<()> {
    match condition {
        InitialCondition::ColdStart => {}
        InitialCondition::TopOil { value } => {
            ensure_finite(*value, "initial top-oil temperature")?;
        }
        InitialCondition::Load { value } => {
            if windings != 1 {
                return Err(SimError::InvalidArg {
                    what: "a single initial load needs a single-winding transformer",
                });
            }
            ensure_non_negative(*value, "initial load")?;
        }
        InitialCondition::SideLoads(loads) => {
            if windings != 3 {
                return Err(SimError::InvalidArg {
                    what: "per-side initial loads need a three-winding transformer",
                });
            }
            for value in loads.into_array() {
                ensure_non_negative(value, "initial load")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LoadProfile;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use ttm_controls::FanThresholds;
    use ttm_spec::{
        CoolerType, SingleWindingOverrides, SpecOverrides, UserBaseSpecifications,
        UserTransformerSpecifications,
    };

    fn stamps(minutes: &[Real]) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        minutes
            .iter()
            .map(|m| t0 + Duration::seconds((*m * 60.0) as i64))
            .collect()
    }

    fn user() -> UserTransformerSpecifications {
        UserTransformerSpecifications {
            base: UserBaseSpecifications {
                no_load_loss: 200.0,
                amb_temp_surcharge: 20.0,
                hot_spot_fac: Some(1.1),
                ..Default::default()
            },
            load_loss: 1000.0,
            nom_load_sec_side: 1500.0,
        }
    }

    fn profile(minutes: &[Real], load: Real, ambient: Real) -> TemperatureProfile {
        TemperatureProfile::new(
            stamps(minutes),
            vec![ambient; minutes.len()],
            LoadProfile::Single(vec![load; minutes.len()]),
        )
        .unwrap()
    }

    #[test]
    fn lag_limits() {
        assert_eq!(lag(12.5, 80.3, 0.0, 105.0), 12.5);
        assert_eq!(lag(12.5, 80.3, 1e9, 105.0), 80.3);
        assert_eq!(lag(80.3, 80.3, 15.0, 105.0), 80.3);
        let half = lag(0.0, 10.0, 105.0 * std::f64::consts::LN_2, 105.0);
        assert!((half - 5.0).abs() < 1e-12);
    }

    #[test]
    fn cold_start_begins_at_internal_temperature() {
        let t = Transformer::power(&user(), CoolerType::Onan).unwrap();
        let model =
            ThermalModel::new(profile(&[0.0, 15.0], 0.0, 5.0), &t, ModelOptions::default())
                .unwrap();
        let out = model.run().unwrap();
        assert_eq!(out.top_oil()[0], 25.0);
        assert_eq!(out.hot_spot().single().unwrap()[0], 25.0);
    }

    #[test]
    fn initial_top_oil_sets_both_series() {
        let t = Transformer::power(&user(), CoolerType::Onan).unwrap();
        let options = ModelOptions {
            initial_condition: InitialCondition::TopOil { value: 55.0 },
            ..Default::default()
        };
        let out = ThermalModel::new(profile(&[0.0, 15.0], 0.0, 5.0), &t, options)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(out.top_oil()[0], 55.0);
        assert_eq!(out.hot_spot().single().unwrap()[0], 55.0);
    }

    #[test]
    fn initial_load_starts_in_steady_state() {
        let t = Transformer::power(&user(), CoolerType::Onan).unwrap();
        let options = ModelOptions {
            initial_condition: InitialCondition::Load { value: 1000.0 },
            ..Default::default()
        };
        let out = ThermalModel::new(profile(&[0.0, 15.0, 30.0], 1000.0, 20.0), &t, options)
            .unwrap()
            .run()
            .unwrap();
        let hot_spot = out.hot_spot().single().unwrap();
        assert!((out.top_oil()[0] - 76.48838493402766).abs() < 1e-9);
        assert!((hot_spot[0] - 87.52721301711226).abs() < 1e-9);
        // already in equilibrium with the applied load
        assert!((out.top_oil()[2] - out.top_oil()[0]).abs() < 1e-9);
        assert!((hot_spot[2] - hot_spot[0]).abs() < 1e-9);
    }

    #[test]
    fn initial_condition_must_match_windings() {
        let t = Transformer::power(&user(), CoolerType::Onan).unwrap();
        let options = ModelOptions {
            initial_condition: InitialCondition::SideLoads(PerSide::splat(10.0)),
            ..Default::default()
        };
        let err = ThermalModel::new(profile(&[0.0, 15.0], 0.0, 5.0), &t, options).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn load_arrangement_must_match_windings() {
        let t = Transformer::power(&user(), CoolerType::Onan).unwrap();
        let p = TemperatureProfile::new(
            stamps(&[0.0, 15.0]),
            vec![20.0; 2],
            LoadProfile::ThreeWinding(PerSide::splat(vec![0.0; 2])),
        )
        .unwrap();
        assert!(ThermalModel::new(p, &t, ModelOptions::default()).is_err());
    }

    #[test]
    fn schedule_length_checked_at_model_construction() {
        let t = Transformer::power(&user(), CoolerType::Onaf).unwrap();
        let natural = SpecOverrides::SingleWinding(SingleWindingOverrides::default());
        let options = ModelOptions {
            cooling_switch: Some(CoolingSwitchSettings::schedule(vec![true; 3], natural)),
            ..Default::default()
        };
        let err =
            ThermalModel::new(profile(&[0.0, 15.0, 30.0, 45.0], 0.0, 5.0), &t, options).unwrap_err();
        assert!(matches!(
            err,
            SimError::ScheduleLength {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn switch_on_natural_transformer_rejected() {
        let t = Transformer::power(&user(), CoolerType::Onan).unwrap();
        let options = ModelOptions {
            cooling_switch: Some(CoolingSwitchSettings::threshold(
                FanThresholds::new(70.0, 60.0).unwrap(),
                SpecOverrides::SingleWinding(SingleWindingOverrides::default()),
            )),
            ..Default::default()
        };
        let err = ThermalModel::new(profile(&[0.0, 15.0], 0.0, 5.0), &t, options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cooling switch error: ONAF switch only works when the cooling type is ONAF."
        );
    }

    #[test]
    fn run_is_repeatable() {
        let t = Transformer::power(&user(), CoolerType::Onaf).unwrap();
        let natural = SpecOverrides::SingleWinding(SingleWindingOverrides {
            time_const_oil: Some(210.0),
            ..Default::default()
        });
        let options = ModelOptions {
            cooling_switch: Some(CoolingSwitchSettings::schedule(
                vec![false, false, true, true],
                natural,
            )),
            ..Default::default()
        };
        let model = ThermalModel::new(profile(&[0.0, 60.0, 120.0, 180.0], 1500.0, 20.0), &t, options)
            .unwrap();
        assert_eq!(model.run().unwrap(), model.run().unwrap());
        assert_eq!(model.transformer(), &t);
    }
}
