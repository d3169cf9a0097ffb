//! Scenario validation logic.
//!
//! Checks the structure of a scenario: version, column presence and lengths,
//! and switch configuration shape. Parameter ranges are checked when the
//! engine objects are built.

use crate::schema::{CoolingSwitchDef, LATEST_VERSION, ProfileDef, Scenario, TransformerDef};
use ttm_spec::SpecOverrides;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Missing column: {column}")]
    MissingColumn { column: &'static str },

    #[error("Unexpected column: {column} ({reason})")]
    UnexpectedColumn {
        column: &'static str,
        reason: &'static str,
    },

    #[error("Column {column} has {found} values, expected {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Provide either 'fans_status' or 'temperature_threshold', not both.")]
    ConflictingSwitchModes,

    #[error("Either 'fans_status' or 'temperature_threshold' must be provided.")]
    MissingSwitchMode,

    #[error("Invalid value: {field} ({reason})")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    validate_profile(&scenario.profile, scenario.transformer.is_three_winding())?;

    if let Some(switch) = &scenario.cooling_switch {
        validate_switch(switch, &scenario.transformer, scenario.profile.timestamps.len())?;
    }

    Ok(())
}

fn validate_profile(profile: &ProfileDef, three_winding: bool) -> Result<(), ValidationError> {
    let expected = profile.timestamps.len();
    if expected == 0 {
        return Err(ValidationError::InvalidValue {
            field: "timestamps",
            reason: "profile must contain at least one point",
        });
    }
    check_length("ambient", expected, profile.ambient.len())?;

    if three_winding {
        if profile.load.is_some() {
            return Err(ValidationError::UnexpectedColumn {
                column: "load",
                reason: "three-winding transformers take load_lv, load_mv and load_hv",
            });
        }
        for (column, values) in [
            ("load_lv", &profile.load_lv),
            ("load_mv", &profile.load_mv),
            ("load_hv", &profile.load_hv),
        ] {
            let values = values
                .as_ref()
                .ok_or(ValidationError::MissingColumn { column })?;
            check_length(column, expected, values.len())?;
        }
    } else {
        for (column, values) in [
            ("load_lv", &profile.load_lv),
            ("load_mv", &profile.load_mv),
            ("load_hv", &profile.load_hv),
        ] {
            if values.is_some() {
                return Err(ValidationError::UnexpectedColumn {
                    column,
                    reason: "single-winding transformers take a single load column",
                });
            }
        }
        let load = profile
            .load
            .as_ref()
            .ok_or(ValidationError::MissingColumn { column: "load" })?;
        check_length("load", expected, load.len())?;
    }

    if let Some(measured) = &profile.top_oil_measured {
        check_length("top_oil_measured", expected, measured.len())?;
    }
    Ok(())
}

fn validate_switch(
    switch: &CoolingSwitchDef,
    transformer: &TransformerDef,
    points: usize,
) -> Result<(), ValidationError> {
    match (&switch.fans_status, &switch.temperature_threshold) {
        (Some(_), Some(_)) => return Err(ValidationError::ConflictingSwitchModes),
        (None, None) => return Err(ValidationError::MissingSwitchMode),
        (Some(fans_status), None) => check_length("fans_status", points, fans_status.len())?,
        (None, Some(_)) => {}
    }

    if matches!(transformer, TransformerDef::Distribution { .. }) {
        return Err(ValidationError::InvalidValue {
            field: "cooling_switch",
            reason: "distribution transformers have no fans",
        });
    }

    match (&switch.natural, transformer.is_three_winding()) {
        (Some(SpecOverrides::SingleWinding(_)), true) => Err(ValidationError::InvalidValue {
            field: "cooling_switch.natural",
            reason: "three-winding transformers need three-winding overrides",
        }),
        (Some(SpecOverrides::ThreeWinding(_)), false) => Err(ValidationError::InvalidValue {
            field: "cooling_switch.natural",
            reason: "single-winding transformers need single-winding overrides",
        }),
        _ => Ok(()),
    }
}

fn check_length(column: &'static str, expected: usize, found: usize) -> Result<(), ValidationError> {
    if expected != found {
        return Err(ValidationError::ColumnLength {
            column,
            expected,
            found,
        });
    }
    Ok(())
}
