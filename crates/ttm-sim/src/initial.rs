//! Starting state of a simulation run.

use serde::{Deserialize, Serialize};
use ttm_core::Real;
use ttm_spec::PerSide;

/// How the first point of the output is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InitialCondition {
    /// Oil at the internal ambient temperature, no winding gradient.
    #[default]
    ColdStart,
    /// Known top-oil temperature [°C]; the hot-spot starts at the same value.
    TopOil { value: Real },
    /// Steady state of a single-winding transformer at this load [A].
    Load { value: Real },
    /// Steady state of a three-winding transformer at these loads [A].
    SideLoads(PerSide<Real>),
}
