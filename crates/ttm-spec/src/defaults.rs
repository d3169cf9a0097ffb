//! Default parameter tables.
//!
//! One constant per (kind, cooling type) pair. Three-winding transformers share
//! the power-transformer tables. Because the tables are `const`, building or
//! calibrating a transformer can never alter them.

use serde::{Deserialize, Serialize};
use ttm_core::Real;

use crate::error::{SpecError, SpecResult};
use crate::kind::{CoolerType, TransformerKind};

/// Values used for any field the user leaves unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultSpecifications {
    /// Oil time constant [min].
    pub time_const_oil: Real,
    /// Winding time constant [min].
    pub time_const_windings: Real,
    /// Top-oil temperature rise at rated load [K].
    pub top_oil_temp_rise: Real,
    /// Winding-oil gradient at rated load [K].
    pub winding_oil_gradient: Real,
    /// Hot-spot factor. A table may leave it unset, in which case the user must supply it.
    pub hot_spot_fac: Option<Real>,
    pub oil_const_k11: Real,
    pub winding_const_k21: u32,
    pub winding_const_k22: u32,
    pub oil_exp_x: Real,
    pub winding_exp_y: Real,
    /// Lowering of the end temperature [K].
    pub end_temp_reduction: Real,
}

pub const POWER_ONAN: DefaultSpecifications = DefaultSpecifications {
    time_const_oil: 210.0,
    time_const_windings: 10.0,
    top_oil_temp_rise: 60.0,
    winding_oil_gradient: 17.0,
    hot_spot_fac: Some(1.3),
    oil_const_k11: 0.5,
    winding_const_k21: 2,
    winding_const_k22: 2,
    oil_exp_x: 0.8,
    winding_exp_y: 1.3,
    end_temp_reduction: 0.0,
};

pub const POWER_ONAF: DefaultSpecifications = DefaultSpecifications {
    time_const_oil: 150.0,
    time_const_windings: 7.0,
    ..POWER_ONAN
};

pub const DISTRIBUTION_ONAN: DefaultSpecifications = DefaultSpecifications {
    time_const_oil: 180.0,
    time_const_windings: 4.0,
    top_oil_temp_rise: 60.0,
    winding_oil_gradient: 23.0,
    hot_spot_fac: Some(1.2),
    oil_const_k11: 1.0,
    winding_const_k21: 1,
    winding_const_k22: 2,
    oil_exp_x: 0.8,
    winding_exp_y: 1.6,
    end_temp_reduction: 0.0,
};

impl DefaultSpecifications {
    /// Default table for a kind and cooling type.
    ///
    /// # Errors
    ///
    /// Distribution transformers only have an ONAN table.
    pub fn for_kind(
        kind: TransformerKind,
        cooling: CoolerType,
    ) -> SpecResult<&'static DefaultSpecifications> {
        match (kind, cooling) {
            (TransformerKind::Power | TransformerKind::ThreeWinding, CoolerType::Onan) => {
                Ok(&POWER_ONAN)
            }
            (TransformerKind::Power | TransformerKind::ThreeWinding, CoolerType::Onaf) => {
                Ok(&POWER_ONAF)
            }
            (TransformerKind::Distribution, CoolerType::Onan) => Ok(&DISTRIBUTION_ONAN),
            (TransformerKind::Distribution, CoolerType::Onaf) => {
                Err(SpecError::UnsupportedCooling { kind, cooling })
            }
        }
    }
}
