//! Conversion of scenario definitions into engine objects.

use tracing::debug;
use ttm_controls::{CoolingSwitchSettings, FanThresholds};
use ttm_sim::{LoadProfile, ModelOptions, TemperatureProfile, ThermalModel};
use ttm_spec::{
    CoolerType, PerSide, SingleWindingOverrides, SpecOverrides, ThreeWindingOverrides, Transformer,
};

use crate::schema::{CoolingSwitchDef, ProfileDef, Scenario, TransformerDef};
use crate::validate::{ValidationError, validate_scenario};
use crate::ProjectResult;

pub fn build_transformer(def: &TransformerDef) -> ProjectResult<Transformer> {
    let transformer = match def {
        TransformerDef::Power { cooling, specs } => Transformer::power(specs, *cooling)?,
        TransformerDef::Distribution { specs } => {
            Transformer::distribution(specs, CoolerType::Onan)?
        }
        TransformerDef::ThreeWinding { cooling, specs } => {
            Transformer::three_winding(specs, *cooling)?
        }
    };
    Ok(transformer)
}

pub fn build_profile(def: &ProfileDef) -> ProjectResult<TemperatureProfile> {
    let load = match (&def.load, &def.load_lv, &def.load_mv, &def.load_hv) {
        (Some(load), None, None, None) => LoadProfile::Single(load.clone()),
        (None, Some(lv), Some(mv), Some(hv)) => {
            LoadProfile::ThreeWinding(PerSide::new(lv.clone(), mv.clone(), hv.clone()))
        }
        (None, _, _, _) => {
            return Err(ValidationError::MissingColumn { column: "load" }.into());
        }
        (Some(_), _, _, _) => {
            return Err(ValidationError::UnexpectedColumn {
                column: "load",
                reason: "give either load or load_lv, load_mv and load_hv",
            }
            .into());
        }
    };
    let mut profile = TemperatureProfile::new(def.timestamps.clone(), def.ambient.clone(), load)?;
    if let Some(measured) = &def.top_oil_measured {
        profile = profile.with_measured_top_oil(measured.clone())?;
    }
    Ok(profile)
}

pub fn build_switch(def: &CoolingSwitchDef, three_winding: bool) -> ProjectResult<CoolingSwitchSettings> {
    let natural = match (&def.natural, three_winding) {
        (Some(natural), _) => natural.clone(),
        (None, false) => SpecOverrides::SingleWinding(SingleWindingOverrides::default()),
        (None, true) => SpecOverrides::ThreeWinding(ThreeWindingOverrides::default()),
    };
    match (&def.fans_status, &def.temperature_threshold) {
        (Some(fans_on), None) => Ok(CoolingSwitchSettings::schedule(fans_on.clone(), natural)),
        (None, Some(thresholds)) => {
            let thresholds =
                FanThresholds::new(thresholds.activation_temp, thresholds.deactivation_temp)?;
            Ok(CoolingSwitchSettings::threshold(thresholds, natural))
        }
        (Some(_), Some(_)) => Err(ValidationError::ConflictingSwitchModes.into()),
        (None, None) => Err(ValidationError::MissingSwitchMode.into()),
    }
}

/// Validate a scenario and build a ready-to-run model.
pub fn build_model(scenario: &Scenario) -> ProjectResult<ThermalModel> {
    validate_scenario(scenario)?;
    let transformer = build_transformer(&scenario.transformer)?;
    let profile = build_profile(&scenario.profile)?;
    let cooling_switch = scenario
        .cooling_switch
        .as_ref()
        .map(|def| build_switch(def, transformer.is_three_winding()))
        .transpose()?;
    let options = ModelOptions {
        initial_condition: scenario.initial_condition.unwrap_or_default(),
        cooling_switch,
    };
    debug!(scenario = %scenario.name, points = profile.len(), "scenario built");
    Ok(ThermalModel::new(profile, &transformer, options)?)
}
