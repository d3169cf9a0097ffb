//! Partial parameter records applied on top of a complete parameter set.
//!
//! Used to derive the natural-cooling (fans off) parameter set from the
//! forced-cooling one: every field left `None` keeps the forced value.

use serde::{Deserialize, Serialize};
use ttm_core::Real;

use crate::specs::{ThreeWindingSpecifications, TransformerSpecifications};
use crate::winding::WindingSpecifications;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleWindingOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom_load_sec_side: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_oil_temp_rise: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winding_oil_gradient: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_spot_fac: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_const_oil: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_const_windings: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_loss: Option<Real>,
}

impl SingleWindingOverrides {
    /// Copy of `specs` with the set fields replaced. Not validated here.
    pub fn apply(&self, specs: &TransformerSpecifications) -> TransformerSpecifications {
        let mut out = specs.clone();
        if let Some(v) = self.nom_load_sec_side {
            out.nom_load_sec_side = v;
        }
        if let Some(v) = self.top_oil_temp_rise {
            out.base.top_oil_temp_rise = v;
        }
        if let Some(v) = self.winding_oil_gradient {
            out.base.winding_oil_gradient = v;
        }
        if let Some(v) = self.hot_spot_fac {
            out.base.hot_spot_fac = v;
        }
        if let Some(v) = self.time_const_oil {
            out.base.time_const_oil = v;
        }
        if let Some(v) = self.time_const_windings {
            out.base.time_const_windings = v;
        }
        if let Some(v) = self.load_loss {
            out.load_loss = v;
        }
        out
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindingOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom_load: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winding_oil_gradient: Option<Real>,
}

impl WindingOverrides {
    fn apply(&self, winding: &mut WindingSpecifications) {
        if let Some(v) = self.nom_load {
            winding.nom_load = v;
        }
        if let Some(v) = self.winding_oil_gradient {
            winding.winding_oil_gradient = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreeWindingOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_oil_temp_rise: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_const_oil: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_const_windings: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_spot_fac: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lv_winding: Option<WindingOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mv_winding: Option<WindingOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hv_winding: Option<WindingOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_loss_hv_lv: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_loss_hv_mv: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_loss_mv_lv: Option<Real>,
    /// Left unchanged unless given, even when pairwise losses change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_loss_total: Option<Real>,
}

impl ThreeWindingOverrides {
    /// Copy of `specs` with the set fields replaced. Not validated here.
    pub fn apply(&self, specs: &ThreeWindingSpecifications) -> ThreeWindingSpecifications {
        let mut out = specs.clone();
        if let Some(v) = self.top_oil_temp_rise {
            out.base.top_oil_temp_rise = v;
        }
        if let Some(v) = self.time_const_oil {
            out.base.time_const_oil = v;
        }
        if let Some(v) = self.time_const_windings {
            out.base.time_const_windings = v;
        }
        if let Some(v) = self.hot_spot_fac {
            out.base.hot_spot_fac = v;
        }
        if let Some(w) = &self.lv_winding {
            w.apply(&mut out.lv_winding);
        }
        if let Some(w) = &self.mv_winding {
            w.apply(&mut out.mv_winding);
        }
        if let Some(w) = &self.hv_winding {
            w.apply(&mut out.hv_winding);
        }
        if let Some(v) = self.load_loss_hv_lv {
            out.load_loss_hv_lv = v;
        }
        if let Some(v) = self.load_loss_hv_mv {
            out.load_loss_hv_mv = v;
        }
        if let Some(v) = self.load_loss_mv_lv {
            out.load_loss_mv_lv = v;
        }
        if let Some(v) = self.load_loss_total {
            out.load_loss_total = v;
        }
        out
    }
}

/// Overrides for either winding arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpecOverrides {
    SingleWinding(SingleWindingOverrides),
    ThreeWinding(ThreeWindingOverrides),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::POWER_ONAF;
    use crate::specs::{UserBaseSpecifications, UserTransformerSpecifications};

    #[test]
    fn unset_fields_keep_forced_values() {
        let user = UserTransformerSpecifications {
            base: UserBaseSpecifications {
                no_load_loss: 200.0,
                amb_temp_surcharge: 20.0,
                ..Default::default()
            },
            load_loss: 1000.0,
            nom_load_sec_side: 1500.0,
        };
        let forced = TransformerSpecifications::create(&POWER_ONAF, &user).unwrap();
        let overrides = SingleWindingOverrides {
            nom_load_sec_side: Some(1200.0),
            time_const_oil: Some(210.0),
            ..Default::default()
        };
        let natural = overrides.apply(&forced);
        assert_eq!(natural.nom_load_sec_side, 1200.0);
        assert_eq!(natural.base.time_const_oil, 210.0);
        assert_eq!(natural.base.time_const_windings, forced.base.time_const_windings);
        assert_eq!(natural.load_loss, forced.load_loss);
        // the forced set is untouched
        assert_eq!(forced.nom_load_sec_side, 1500.0);
    }

    #[test]
    fn tagged_serialization() {
        let overrides = SpecOverrides::SingleWinding(SingleWindingOverrides {
            hot_spot_fac: Some(1.3),
            ..Default::default()
        });
        let json = serde_json::to_string(&overrides).unwrap();
        assert_eq!(json, r#"{"type":"SingleWinding","hot_spot_fac":1.3}"#);
        let back: SpecOverrides = serde_json::from_str(&json).unwrap();
        assert_eq!(back, overrides);
    }
}
