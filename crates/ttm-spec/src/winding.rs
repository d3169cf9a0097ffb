//! Winding sides and the three-winding loss decomposition.

use serde::{Deserialize, Serialize};
use ttm_core::{Real, ensure_finite};

use crate::error::{SpecError, SpecResult};

/// Voltage side of a three-winding transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Low,
    Middle,
    High,
}

impl Side {
    /// Sides in storage order.
    pub const ALL: [Side; 3] = [Side::Low, Side::Middle, Side::High];

    /// Suffix used for per-side output columns.
    pub fn column_suffix(self) -> &'static str {
        match self {
            Side::Low => "low_voltage_side",
            Side::Middle => "middle_voltage_side",
            Side::High => "high_voltage_side",
        }
    }
}

/// One value per winding side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub lv: T,
    pub mv: T,
    pub hv: T,
}

impl<T> PerSide<T> {
    pub fn new(lv: T, mv: T, hv: T) -> Self {
        Self { lv, mv, hv }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Low => &self.lv,
            Side::Middle => &self.mv,
            Side::High => &self.hv,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerSide<U> {
        PerSide {
            lv: f(self.lv),
            mv: f(self.mv),
            hv: f(self.hv),
        }
    }

    pub fn as_ref(&self) -> PerSide<&T> {
        PerSide {
            lv: &self.lv,
            mv: &self.mv,
            hv: &self.hv,
        }
    }

    /// Values in `[lv, mv, hv]` order.
    pub fn into_array(self) -> [T; 3] {
        [self.lv, self.mv, self.hv]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().map(move |side| (side, self.get(side)))
    }
}

impl<T: Clone> PerSide<T> {
    /// Same value on every side.
    pub fn splat(value: T) -> Self {
        Self {
            lv: value.clone(),
            mv: value.clone(),
            hv: value,
        }
    }
}

/// Rated values of a single winding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindingSpecifications {
    /// Nominal load from the type plate [A].
    pub nom_load: Real,
    /// Winding-oil gradient at rated load [K].
    pub winding_oil_gradient: Real,
}

impl WindingSpecifications {
    pub fn validate(&self) -> SpecResult<()> {
        ensure_finite(self.nom_load, "nom_load")?;
        if self.nom_load <= 0.0 {
            return Err(SpecError::InvalidParameter {
                what: "nom_load must be positive",
                value: self.nom_load,
            });
        }
        ensure_finite(self.winding_oil_gradient, "winding_oil_gradient")?;
        if self.winding_oil_gradient < 0.0 {
            return Err(SpecError::InvalidParameter {
                what: "winding_oil_gradient must be non-negative",
                value: self.winding_oil_gradient,
            });
        }
        Ok(())
    }
}

/// Load losses measured between pairs of windings [W].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairwiseLosses {
    pub hv_lv: Real,
    pub hv_mv: Real,
    pub mv_lv: Real,
}

/// Recover the individual winding losses from the pairwise measurements.
///
/// With `c1 = In_hv / In_mv` and `c2 = In_mv / In_lv` the losses satisfy
/// `c1·hv + mv = P_hv_mv`, `c1·c2·hv + lv = P_hv_lv` and `c2·mv + lv = P_mv_lv`.
/// The closed form below is the exact solution of that system. Individual
/// losses can come out negative for inconsistent measurements; they are
/// returned as-is.
pub fn decompose_load_losses(pairwise: &PairwiseLosses, nom_load: &PerSide<Real>) -> PerSide<Real> {
    let c1 = nom_load.hv / nom_load.mv;
    let c2 = nom_load.mv / nom_load.lv;
    let PairwiseLosses {
        hv_lv,
        hv_mv,
        mv_lv,
    } = *pairwise;

    let hv = (0.5 / c1) * (hv_mv - mv_lv / c2 + hv_lv / c2);
    let mv = (0.5 / c2) * (c2 * hv_mv - hv_lv + mv_lv);
    let lv = 0.5 * (hv_lv - c2 * hv_mv + mv_lv);
    PerSide { lv, mv, hv }
}
