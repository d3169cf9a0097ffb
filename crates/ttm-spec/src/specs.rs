//! User specification records and the merged parameter sets built from them.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ttm_core::{Real, ensure_finite, ensure_non_negative};

use crate::defaults::DefaultSpecifications;
use crate::error::{SpecError, SpecResult};
use crate::winding::{PairwiseLosses, PerSide, WindingSpecifications, decompose_load_losses};

/// Fields every user record carries. `None` falls back to the default table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBaseSpecifications {
    /// No-load (iron) loss [W].
    pub no_load_loss: Real,
    /// Flat ambient surcharge, e.g. +10 K when installed indoors [K].
    pub amb_temp_surcharge: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_const_oil: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_const_windings: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_oil_temp_rise: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winding_oil_gradient: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_spot_fac: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oil_const_k11: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winding_const_k21: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winding_const_k22: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oil_exp_x: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winding_exp_y: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_temp_reduction: Option<Real>,
}

/// User record for power and distribution transformers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTransformerSpecifications {
    #[serde(flatten)]
    pub base: UserBaseSpecifications,
    /// Load (copper) loss at rated load [W].
    pub load_loss: Real,
    /// Nominal current of the secondary side [A].
    pub nom_load_sec_side: Real,
}

/// User record for three-winding transformers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserThreeWindingSpecifications {
    #[serde(flatten)]
    pub base: UserBaseSpecifications,
    pub lv_winding: WindingSpecifications,
    pub mv_winding: WindingSpecifications,
    pub hv_winding: WindingSpecifications,
    pub load_loss_hv_lv: Real,
    pub load_loss_hv_mv: Real,
    pub load_loss_mv_lv: Real,
    /// Defaults to the no-load loss plus the decomposed winding losses at
    /// rated current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_loss_total: Option<Real>,
}

/// Complete parameter set shared by all transformer kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSpecifications {
    pub no_load_loss: Real,
    pub amb_temp_surcharge: Real,
    pub time_const_oil: Real,
    pub time_const_windings: Real,
    pub top_oil_temp_rise: Real,
    pub winding_oil_gradient: Real,
    pub hot_spot_fac: Real,
    pub oil_const_k11: Real,
    pub winding_const_k21: u32,
    pub winding_const_k22: u32,
    pub oil_exp_x: Real,
    pub winding_exp_y: Real,
    pub end_temp_reduction: Real,
}

impl BaseSpecifications {
    /// Overlay the user's values on a default table.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::MissingParameter`] when neither side provides a
    /// hot-spot factor, or a range error from [`BaseSpecifications::validate`].
    pub fn merge(defaults: &DefaultSpecifications, user: &UserBaseSpecifications) -> SpecResult<Self> {
        let hot_spot_fac = user
            .hot_spot_fac
            .or(defaults.hot_spot_fac)
            .ok_or(SpecError::MissingParameter {
                name: "hot_spot_fac",
            })?;
        let merged = Self {
            no_load_loss: user.no_load_loss,
            amb_temp_surcharge: user.amb_temp_surcharge,
            time_const_oil: user.time_const_oil.unwrap_or(defaults.time_const_oil),
            time_const_windings: user
                .time_const_windings
                .unwrap_or(defaults.time_const_windings),
            top_oil_temp_rise: user.top_oil_temp_rise.unwrap_or(defaults.top_oil_temp_rise),
            winding_oil_gradient: user
                .winding_oil_gradient
                .unwrap_or(defaults.winding_oil_gradient),
            hot_spot_fac,
            oil_const_k11: user.oil_const_k11.unwrap_or(defaults.oil_const_k11),
            winding_const_k21: user.winding_const_k21.unwrap_or(defaults.winding_const_k21),
            winding_const_k22: user.winding_const_k22.unwrap_or(defaults.winding_const_k22),
            oil_exp_x: user.oil_exp_x.unwrap_or(defaults.oil_exp_x),
            winding_exp_y: user.winding_exp_y.unwrap_or(defaults.winding_exp_y),
            end_temp_reduction: user.end_temp_reduction.unwrap_or(defaults.end_temp_reduction),
        };
        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> SpecResult<()> {
        ensure_non_negative(self.no_load_loss, "no_load_loss")?;
        ensure_finite(self.amb_temp_surcharge, "amb_temp_surcharge")?;
        positive(self.time_const_oil, "time_const_oil must be positive")?;
        positive(self.time_const_windings, "time_const_windings must be positive")?;
        ensure_non_negative(self.top_oil_temp_rise, "top_oil_temp_rise")?;
        ensure_non_negative(self.winding_oil_gradient, "winding_oil_gradient")?;
        ensure_non_negative(self.hot_spot_fac, "hot_spot_fac")?;
        positive(self.oil_const_k11, "oil_const_k11 must be positive")?;
        positive(
            Real::from(self.winding_const_k21),
            "winding_const_k21 must be positive",
        )?;
        positive(
            Real::from(self.winding_const_k22),
            "winding_const_k22 must be positive",
        )?;
        ensure_non_negative(self.oil_exp_x, "oil_exp_x")?;
        ensure_non_negative(self.winding_exp_y, "winding_exp_y")?;
        ensure_finite(self.end_temp_reduction, "end_temp_reduction")?;
        Ok(())
    }
}

/// Merged parameter set of a power or distribution transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerSpecifications {
    #[serde(flatten)]
    pub base: BaseSpecifications,
    pub load_loss: Real,
    pub nom_load_sec_side: Real,
}

impl TransformerSpecifications {
    pub fn create(
        defaults: &DefaultSpecifications,
        user: &UserTransformerSpecifications,
    ) -> SpecResult<Self> {
        let specs = Self {
            base: BaseSpecifications::merge(defaults, &user.base)?,
            load_loss: user.load_loss,
            nom_load_sec_side: user.nom_load_sec_side,
        };
        specs.validate()?;
        debug!(?specs, "complete transformer specifications");
        Ok(specs)
    }

    pub fn validate(&self) -> SpecResult<()> {
        self.base.validate()?;
        ensure_non_negative(self.load_loss, "load_loss")?;
        self.winding().validate()
    }

    /// The single winding seen by the hot-spot calculation.
    pub fn winding(&self) -> WindingSpecifications {
        WindingSpecifications {
            nom_load: self.nom_load_sec_side,
            winding_oil_gradient: self.base.winding_oil_gradient,
        }
    }
}

/// Merged parameter set of a three-winding transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeWindingSpecifications {
    #[serde(flatten)]
    pub base: BaseSpecifications,
    pub lv_winding: WindingSpecifications,
    pub mv_winding: WindingSpecifications,
    pub hv_winding: WindingSpecifications,
    pub load_loss_hv_lv: Real,
    pub load_loss_hv_mv: Real,
    pub load_loss_mv_lv: Real,
    pub load_loss_total: Real,
}

impl ThreeWindingSpecifications {
    pub fn create(
        defaults: &DefaultSpecifications,
        user: &UserThreeWindingSpecifications,
    ) -> SpecResult<Self> {
        let base = BaseSpecifications::merge(defaults, &user.base)?;
        let mut specs = Self {
            base,
            lv_winding: user.lv_winding,
            mv_winding: user.mv_winding,
            hv_winding: user.hv_winding,
            load_loss_hv_lv: user.load_loss_hv_lv,
            load_loss_hv_mv: user.load_loss_hv_mv,
            load_loss_mv_lv: user.load_loss_mv_lv,
            load_loss_total: 0.0,
        };
        specs.load_loss_total = match user.load_loss_total {
            Some(total) => total,
            None => specs.rated_total_loss(),
        };
        specs.validate()?;
        debug!(?specs, "complete three-winding transformer specifications");
        Ok(specs)
    }

    pub fn validate(&self) -> SpecResult<()> {
        self.base.validate()?;
        for winding in self.windings().into_array() {
            winding.validate()?;
        }
        ensure_non_negative(self.load_loss_hv_lv, "load_loss_hv_lv")?;
        ensure_non_negative(self.load_loss_hv_mv, "load_loss_hv_mv")?;
        ensure_non_negative(self.load_loss_mv_lv, "load_loss_mv_lv")?;
        ensure_non_negative(self.load_loss_total, "load_loss_total")?;
        Ok(())
    }

    pub fn windings(&self) -> PerSide<WindingSpecifications> {
        PerSide::new(self.lv_winding, self.mv_winding, self.hv_winding)
    }

    /// Individual winding losses recovered from the pairwise measurements [W].
    pub fn winding_losses(&self) -> PerSide<Real> {
        let nom_load = self.windings().map(|w| w.nom_load);
        decompose_load_losses(&self.pairwise_losses(), &nom_load)
    }

    /// No-load loss plus every winding loss at rated current [W]. This is
    /// the total used when none is given, so that rated load on every side
    /// gives a loss ratio of one.
    pub fn rated_total_loss(&self) -> Real {
        self.base.no_load_loss + self.winding_losses().into_array().iter().sum::<Real>()
    }

    pub fn pairwise_losses(&self) -> PairwiseLosses {
        PairwiseLosses {
            hv_lv: self.load_loss_hv_lv,
            hv_mv: self.load_loss_hv_mv,
            mv_lv: self.load_loss_mv_lv,
        }
    }
}

fn positive(value: Real, what: &'static str) -> SpecResult<()> {
    ensure_finite(value, what)?;
    if value <= 0.0 {
        return Err(SpecError::InvalidParameter { what, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{POWER_ONAF, POWER_ONAN};

    fn user() -> UserTransformerSpecifications {
        UserTransformerSpecifications {
            base: UserBaseSpecifications {
                no_load_loss: 200.0,
                amb_temp_surcharge: 20.0,
                ..Default::default()
            },
            load_loss: 1000.0,
            nom_load_sec_side: 1500.0,
        }
    }

    #[test]
    fn unset_fields_come_from_defaults() {
        let specs = TransformerSpecifications::create(&POWER_ONAF, &user()).unwrap();
        assert_eq!(specs.base.time_const_oil, 150.0);
        assert_eq!(specs.base.hot_spot_fac, 1.3);
        assert_eq!(specs.base.winding_const_k21, 2);
        assert_eq!(specs.load_loss, 1000.0);
    }

    #[test]
    fn user_values_override_defaults() {
        let mut u = user();
        u.base.hot_spot_fac = Some(1.1);
        u.base.time_const_oil = Some(90.0);
        let specs = TransformerSpecifications::create(&POWER_ONAN, &u).unwrap();
        assert_eq!(specs.base.hot_spot_fac, 1.1);
        assert_eq!(specs.base.time_const_oil, 90.0);
        assert_eq!(specs.base.time_const_windings, 10.0);
    }

    #[test]
    fn missing_hot_spot_factor_fails() {
        let table = DefaultSpecifications {
            hot_spot_fac: None,
            ..POWER_ONAN
        };
        let err = TransformerSpecifications::create(&table, &user()).unwrap_err();
        assert_eq!(
            err,
            SpecError::MissingParameter {
                name: "hot_spot_fac"
            }
        );

        let mut u = user();
        u.base.hot_spot_fac = Some(1.2);
        assert!(TransformerSpecifications::create(&table, &u).is_ok());
    }

    #[test]
    fn non_positive_time_constant_rejected() {
        let mut u = user();
        u.base.time_const_oil = Some(0.0);
        let err = TransformerSpecifications::create(&POWER_ONAN, &u).unwrap_err();
        assert!(matches!(err, SpecError::InvalidParameter { .. }));

        let mut u = user();
        u.base.time_const_windings = Some(-3.0);
        assert!(TransformerSpecifications::create(&POWER_ONAN, &u).is_err());
    }

    #[test]
    fn negative_gradient_and_zero_rating_rejected() {
        let mut u = user();
        u.base.winding_oil_gradient = Some(-1.0);
        assert!(TransformerSpecifications::create(&POWER_ONAN, &u).is_err());

        let mut u = user();
        u.nom_load_sec_side = 0.0;
        assert!(TransformerSpecifications::create(&POWER_ONAN, &u).is_err());
    }

    #[test]
    fn three_winding_total_defaults_to_rated_losses() {
        let winding = WindingSpecifications {
            nom_load: 1000.0,
            winding_oil_gradient: 20.0,
        };
        let mut u = UserThreeWindingSpecifications {
            base: UserBaseSpecifications {
                no_load_loss: 10_000.0,
                amb_temp_surcharge: 0.0,
                ..Default::default()
            },
            lv_winding: winding,
            mv_winding: winding,
            hv_winding: winding,
            load_loss_hv_lv: 20_000.0,
            load_loss_hv_mv: 21_000.0,
            load_loss_mv_lv: 22_000.0,
            load_loss_total: None,
        };
        let specs = ThreeWindingSpecifications::create(&POWER_ONAN, &u).unwrap();
        // Decomposed losses are lv 10500, mv 11500, hv 9500.
        assert_eq!(specs.winding_losses(), PerSide::new(10_500.0, 11_500.0, 9_500.0));
        assert_eq!(specs.load_loss_total, 41_500.0);

        u.load_loss_total = Some(40_000.0);
        let specs = ThreeWindingSpecifications::create(&POWER_ONAN, &u).unwrap();
        assert_eq!(specs.load_loss_total, 40_000.0);
    }

    #[test]
    fn user_record_reads_flat_json() {
        let json = r#"{
            "no_load_loss": 200.0,
            "amb_temp_surcharge": 20.0,
            "hot_spot_fac": 1.1,
            "load_loss": 1000.0,
            "nom_load_sec_side": 1500.0
        }"#;
        let parsed: UserTransformerSpecifications = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.base.hot_spot_fac, Some(1.1));
        assert_eq!(parsed.base.time_const_oil, None);
        assert_eq!(parsed.nom_load_sec_side, 1500.0);
    }
}
