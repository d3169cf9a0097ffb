//! Scenario schema definitions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ttm_controls::FanThresholds;
use ttm_sim::InitialCondition;
use ttm_spec::{
    CoolerType, SpecOverrides, UserThreeWindingSpecifications, UserTransformerSpecifications,
};

pub const LATEST_VERSION: u32 = 1;

/// One transformer, one load/ambient profile, and how to run it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub transformer: TransformerDef,
    pub profile: ProfileDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_condition: Option<InitialCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_switch: Option<CoolingSwitchDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformerDef {
    Power {
        cooling: CoolerType,
        specs: UserTransformerSpecifications,
    },
    /// Distribution transformers are always ONAN.
    Distribution { specs: UserTransformerSpecifications },
    ThreeWinding {
        cooling: CoolerType,
        specs: UserThreeWindingSpecifications,
    },
}

impl TransformerDef {
    pub fn is_three_winding(&self) -> bool {
        matches!(self, TransformerDef::ThreeWinding { .. })
    }
}

/// Profile columns, all of equal length.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileDef {
    /// ISO 8601 without zone, e.g. `2020-01-01T00:15:00`.
    pub timestamps: Vec<NaiveDateTime>,
    /// Ambient temperature [°C].
    pub ambient: Vec<f64>,
    /// Load [A] of a single-winding transformer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_lv: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_mv: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_hv: Option<Vec<f64>>,
    /// Measured top-oil temperature [°C], used only by the fan thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_oil_measured: Option<Vec<f64>>,
}

/// Fan switch. Exactly one of `fans_status` and `temperature_threshold` is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoolingSwitchDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fans_status: Option<Vec<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_threshold: Option<FanThresholds>,
    /// Fans-off parameters; omitted means the forced set unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural: Option<SpecOverrides>,
}
