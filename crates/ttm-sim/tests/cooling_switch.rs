mod common;

use common::{single_profile, small_user};
use ttm_controls::{CoolingSwitchSettings, FanThresholds};
use ttm_sim::{ModelOptions, OutputProfile, TemperatureProfile, ThermalModel};
use ttm_spec::{CoolerType, SingleWindingOverrides, SpecOverrides, Transformer};

fn natural_overrides() -> SpecOverrides {
    SpecOverrides::SingleWinding(SingleWindingOverrides {
        top_oil_temp_rise: Some(65.0),
        time_const_oil: Some(210.0),
        time_const_windings: Some(10.0),
        ..Default::default()
    })
}

fn forced() -> Transformer {
    Transformer::power(&small_user(), CoolerType::Onaf).unwrap()
}

fn run(profile: TemperatureProfile, t: &Transformer, switch: Option<CoolingSwitchSettings>) -> OutputProfile {
    let options = ModelOptions {
        cooling_switch: switch,
        ..Default::default()
    };
    ThermalModel::new(profile, t, options).unwrap().run().unwrap()
}

fn hourly(points: usize, load: f64) -> TemperatureProfile {
    let minutes: Vec<f64> = (0..points).map(|i| i as f64 * 60.0).collect();
    single_profile(&minutes, &vec![20.0; points], &vec![load; points])
}

#[test]
fn fans_always_on_matches_forced_run() {
    let t = forced();
    let switched = run(
        hourly(12, 1500.0),
        &t,
        Some(CoolingSwitchSettings::schedule(vec![true; 12], natural_overrides())),
    );
    assert_eq!(switched, run(hourly(12, 1500.0), &t, None));
}

#[test]
fn fans_always_off_matches_natural_run() {
    let t = forced();
    let natural = t.with_overrides(&natural_overrides()).unwrap();
    let switched = run(
        hourly(12, 1500.0),
        &t,
        Some(CoolingSwitchSettings::schedule(vec![false; 12], natural_overrides())),
    );
    assert_eq!(switched, run(hourly(12, 1500.0), &natural, None));
}

#[test]
fn long_dwell_converges_to_forced_state() {
    let t = forced();
    let mut fans_on = vec![false; 20];
    fans_on.extend([true; 20]);
    let switched = run(
        hourly(40, 1500.0),
        &t,
        Some(CoolingSwitchSettings::schedule(fans_on, natural_overrides())),
    );
    let reference = run(hourly(40, 1500.0), &t, None);

    let last = switched.len() - 1;
    let rel = |a: f64, b: f64| (a - b).abs() / b.abs();
    assert!(rel(switched.top_oil()[last], reference.top_oil()[last]) < 0.01);
    assert!(
        rel(
            switched.hot_spot().single().unwrap()[last],
            reference.hot_spot().single().unwrap()[last]
        ) < 0.01
    );
    // natural cooling runs hotter before the fans come on
    assert!(switched.top_oil()[19] > reference.top_oil()[19]);
}

#[test]
fn measured_top_oil_drives_thresholds() {
    let t = forced();
    let measured = vec![30.0, 30.0, 55.0, 55.0, 55.0, 35.0, 35.0, 35.0];
    let profile = hourly(8, 1200.0).with_measured_top_oil(measured).unwrap();
    let by_threshold = run(
        profile.clone(),
        &t,
        Some(CoolingSwitchSettings::threshold(
            FanThresholds::new(50.0, 40.0).unwrap(),
            natural_overrides(),
        )),
    );
    // the crossing seen at point 2 applies from step 3, the drop at point 5 from step 6
    let by_schedule = run(
        profile,
        &t,
        Some(CoolingSwitchSettings::schedule(
            vec![false, false, false, true, true, true, false, false],
            natural_overrides(),
        )),
    );
    assert_eq!(by_threshold, by_schedule);
}

#[test]
fn threshold_without_crossing_stays_natural() {
    let t = forced();
    let natural = t.with_overrides(&natural_overrides()).unwrap();
    let switched = run(
        hourly(10, 0.0),
        &t,
        Some(CoolingSwitchSettings::threshold(
            FanThresholds::new(150.0, 140.0).unwrap(),
            natural_overrides(),
        )),
    );
    assert_eq!(switched, run(hourly(10, 0.0), &natural, None));
}
