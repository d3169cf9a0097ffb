//! Transformer variants and the steady-state temperature formulas.

use ttm_core::Real;

use crate::defaults::{DISTRIBUTION_ONAN, DefaultSpecifications, POWER_ONAF, POWER_ONAN};
use crate::error::{SpecError, SpecResult};
use crate::kind::{CoolerType, TransformerKind};
use crate::overrides::SpecOverrides;
use crate::specs::{
    BaseSpecifications, ThreeWindingSpecifications, TransformerSpecifications,
    UserThreeWindingSpecifications, UserTransformerSpecifications,
};
use crate::winding::{PerSide, WindingSpecifications};

/// Thermal behaviour shared by all transformer kinds.
///
/// Temperatures are in °C, rises in K, loads in A.
pub trait ThermalCharacteristics {
    fn kind(&self) -> TransformerKind;

    fn cooling(&self) -> CoolerType;

    /// Default table this transformer falls back to.
    fn defaults(&self) -> &'static DefaultSpecifications;

    fn base(&self) -> &BaseSpecifications;

    /// Windings in side order (`lv, mv, hv`); a single entry for
    /// single-winding transformers.
    fn windings(&self) -> &[WindingSpecifications];

    /// Top-oil rise at rated load, including any kind-specific surcharge.
    fn pre_factor(&self) -> Real;

    /// Ambient temperature as seen by the oil.
    fn internal_temperature(&self, ambient: Real) -> Real;

    /// Steady-state top-oil rise above the internal temperature.
    ///
    /// `load` holds one value per winding, in the order of
    /// [`ThermalCharacteristics::windings`]. Missing entries count as zero load.
    fn end_temperature_top_oil(&self, load: &[Real]) -> Real;

    /// Steady-state hot-spot rise above top-oil for one winding.
    fn hot_spot_static_rise(&self, winding: &WindingSpecifications, load: Real) -> Real {
        let base = self.base();
        base.hot_spot_fac
            * winding.winding_oil_gradient
            * (load / winding.nom_load).powf(base.winding_exp_y)
    }
}

/// `pre_factor × ratio^x − end_temp_reduction`, with zero rise when the
/// loss denominator vanishes.
fn end_rise(base: &BaseSpecifications, pre_factor: Real, numerator: Real, denominator: Real) -> Real {
    if denominator == 0.0 {
        return -base.end_temp_reduction;
    }
    let ratio = (numerator / denominator).max(0.0);
    pre_factor * ratio.powf(base.oil_exp_x) - base.end_temp_reduction
}

fn single_winding_rise(specs: &TransformerSpecifications, pre_factor: Real, load: &[Real]) -> Real {
    let load = load.first().copied().unwrap_or(0.0);
    let relative = load / specs.nom_load_sec_side;
    let numerator = specs.base.no_load_loss + specs.load_loss * relative * relative;
    let denominator = specs.base.no_load_loss + specs.load_loss;
    end_rise(&specs.base, pre_factor, numerator, denominator)
}

/// Power transformer, ONAN or ONAF.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTransformer {
    cooling: CoolerType,
    specs: TransformerSpecifications,
    winding: [WindingSpecifications; 1],
}

impl PowerTransformer {
    pub fn new(user: &UserTransformerSpecifications, cooling: CoolerType) -> SpecResult<Self> {
        let defaults = DefaultSpecifications::for_kind(TransformerKind::Power, cooling)?;
        Self::with_defaults(user, cooling, defaults)
    }

    /// Build against a caller-supplied default table.
    pub fn with_defaults(
        user: &UserTransformerSpecifications,
        cooling: CoolerType,
        defaults: &DefaultSpecifications,
    ) -> SpecResult<Self> {
        let specs = TransformerSpecifications::create(defaults, user)?;
        Ok(Self::from_specs(cooling, specs))
    }

    fn from_specs(cooling: CoolerType, specs: TransformerSpecifications) -> Self {
        let winding = [specs.winding()];
        Self {
            cooling,
            specs,
            winding,
        }
    }

    pub fn specs(&self) -> &TransformerSpecifications {
        &self.specs
    }
}

impl ThermalCharacteristics for PowerTransformer {
    fn kind(&self) -> TransformerKind {
        TransformerKind::Power
    }

    fn cooling(&self) -> CoolerType {
        self.cooling
    }

    fn defaults(&self) -> &'static DefaultSpecifications {
        match self.cooling {
            CoolerType::Onan => &POWER_ONAN,
            CoolerType::Onaf => &POWER_ONAF,
        }
    }

    fn base(&self) -> &BaseSpecifications {
        &self.specs.base
    }

    fn windings(&self) -> &[WindingSpecifications] {
        &self.winding
    }

    fn pre_factor(&self) -> Real {
        self.specs.base.top_oil_temp_rise
    }

    fn internal_temperature(&self, ambient: Real) -> Real {
        ambient + self.specs.base.amb_temp_surcharge
    }

    fn end_temperature_top_oil(&self, load: &[Real]) -> Real {
        single_winding_rise(&self.specs, self.pre_factor(), load)
    }
}

/// Distribution transformer. Only natural cooling exists for this kind, and
/// the ambient surcharge is folded into the top-oil rise instead of the
/// internal temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTransformer {
    specs: TransformerSpecifications,
    winding: [WindingSpecifications; 1],
}

impl DistributionTransformer {
    pub fn new(user: &UserTransformerSpecifications, cooling: CoolerType) -> SpecResult<Self> {
        let defaults = DefaultSpecifications::for_kind(TransformerKind::Distribution, cooling)?;
        Self::with_defaults(user, defaults)
    }

    pub fn with_defaults(
        user: &UserTransformerSpecifications,
        defaults: &DefaultSpecifications,
    ) -> SpecResult<Self> {
        let specs = TransformerSpecifications::create(defaults, user)?;
        Ok(Self::from_specs(specs))
    }

    fn from_specs(specs: TransformerSpecifications) -> Self {
        let winding = [specs.winding()];
        Self { specs, winding }
    }

    pub fn specs(&self) -> &TransformerSpecifications {
        &self.specs
    }
}

impl ThermalCharacteristics for DistributionTransformer {
    fn kind(&self) -> TransformerKind {
        TransformerKind::Distribution
    }

    fn cooling(&self) -> CoolerType {
        CoolerType::Onan
    }

    fn defaults(&self) -> &'static DefaultSpecifications {
        &DISTRIBUTION_ONAN
    }

    fn base(&self) -> &BaseSpecifications {
        &self.specs.base
    }

    fn windings(&self) -> &[WindingSpecifications] {
        &self.winding
    }

    fn pre_factor(&self) -> Real {
        self.specs.base.top_oil_temp_rise + self.specs.base.amb_temp_surcharge
    }

    fn internal_temperature(&self, ambient: Real) -> Real {
        ambient
    }

    fn end_temperature_top_oil(&self, load: &[Real]) -> Real {
        single_winding_rise(&self.specs, self.pre_factor(), load)
    }
}

/// Three-winding power transformer.
///
/// The individual winding losses are recovered once at construction from the
/// pairwise measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeWindingTransformer {
    cooling: CoolerType,
    specs: ThreeWindingSpecifications,
    windings: [WindingSpecifications; 3],
    winding_losses: PerSide<Real>,
}

impl ThreeWindingTransformer {
    pub fn new(user: &UserThreeWindingSpecifications, cooling: CoolerType) -> SpecResult<Self> {
        let defaults = DefaultSpecifications::for_kind(TransformerKind::ThreeWinding, cooling)?;
        Self::with_defaults(user, cooling, defaults)
    }

    pub fn with_defaults(
        user: &UserThreeWindingSpecifications,
        cooling: CoolerType,
        defaults: &DefaultSpecifications,
    ) -> SpecResult<Self> {
        let specs = ThreeWindingSpecifications::create(defaults, user)?;
        Ok(Self::from_specs(cooling, specs))
    }

    fn from_specs(cooling: CoolerType, specs: ThreeWindingSpecifications) -> Self {
        let windings = specs.windings();
        let winding_losses = specs.winding_losses();
        Self {
            cooling,
            windings: windings.into_array(),
            specs,
            winding_losses,
        }
    }

    pub fn specs(&self) -> &ThreeWindingSpecifications {
        &self.specs
    }

    /// Per-winding load losses [W].
    pub fn winding_losses(&self) -> &PerSide<Real> {
        &self.winding_losses
    }
}

impl ThermalCharacteristics for ThreeWindingTransformer {
    fn kind(&self) -> TransformerKind {
        TransformerKind::ThreeWinding
    }

    fn cooling(&self) -> CoolerType {
        self.cooling
    }

    fn defaults(&self) -> &'static DefaultSpecifications {
        match self.cooling {
            CoolerType::Onan => &POWER_ONAN,
            CoolerType::Onaf => &POWER_ONAF,
        }
    }

    fn base(&self) -> &BaseSpecifications {
        &self.specs.base
    }

    fn windings(&self) -> &[WindingSpecifications] {
        &self.windings
    }

    fn pre_factor(&self) -> Real {
        self.specs.base.top_oil_temp_rise
    }

    fn internal_temperature(&self, ambient: Real) -> Real {
        ambient + self.specs.base.amb_temp_surcharge
    }

    fn end_temperature_top_oil(&self, load: &[Real]) -> Real {
        let copper: Real = self
            .windings
            .iter()
            .zip(self.winding_losses.into_array())
            .zip(load)
            .map(|((winding, loss), &load)| {
                let relative = load / winding.nom_load;
                loss * relative * relative
            })
            .sum();
        let numerator = self.specs.base.no_load_loss + copper;
        end_rise(
            &self.specs.base,
            self.pre_factor(),
            numerator,
            self.specs.load_loss_total,
        )
    }
}

/// Any supported transformer.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformer {
    Power(PowerTransformer),
    Distribution(DistributionTransformer),
    ThreeWinding(ThreeWindingTransformer),
}

impl Transformer {
    pub fn power(user: &UserTransformerSpecifications, cooling: CoolerType) -> SpecResult<Self> {
        PowerTransformer::new(user, cooling).map(Transformer::Power)
    }

    pub fn distribution(
        user: &UserTransformerSpecifications,
        cooling: CoolerType,
    ) -> SpecResult<Self> {
        DistributionTransformer::new(user, cooling).map(Transformer::Distribution)
    }

    pub fn three_winding(
        user: &UserThreeWindingSpecifications,
        cooling: CoolerType,
    ) -> SpecResult<Self> {
        ThreeWindingTransformer::new(user, cooling).map(Transformer::ThreeWinding)
    }

    pub fn is_three_winding(&self) -> bool {
        matches!(self, Transformer::ThreeWinding(_))
    }

    pub fn winding_count(&self) -> usize {
        self.windings().len()
    }

    /// Copy with a different hot-spot factor. `self` is left untouched.
    pub fn with_hot_spot_fac(&self, hot_spot_fac: Real) -> SpecResult<Self> {
        self.map_base(|base| base.hot_spot_fac = hot_spot_fac)
    }

    /// Copy with a different ambient surcharge. `self` is left untouched.
    pub fn with_amb_temp_surcharge(&self, amb_temp_surcharge: Real) -> SpecResult<Self> {
        self.map_base(|base| base.amb_temp_surcharge = amb_temp_surcharge)
    }

    /// Copy with a partial override record applied and re-validated.
    ///
    /// # Errors
    ///
    /// The override arrangement must match the transformer: single-winding
    /// records for power and distribution, three-winding records otherwise.
    pub fn with_overrides(&self, overrides: &SpecOverrides) -> SpecResult<Self> {
        match (self, overrides) {
            (Transformer::Power(t), SpecOverrides::SingleWinding(o)) => {
                let specs = o.apply(&t.specs);
                specs.validate()?;
                Ok(Transformer::Power(PowerTransformer::from_specs(
                    t.cooling, specs,
                )))
            }
            (Transformer::Distribution(t), SpecOverrides::SingleWinding(o)) => {
                let specs = o.apply(&t.specs);
                specs.validate()?;
                Ok(Transformer::Distribution(
                    DistributionTransformer::from_specs(specs),
                ))
            }
            (Transformer::ThreeWinding(t), SpecOverrides::ThreeWinding(o)) => {
                let specs = o.apply(&t.specs);
                specs.validate()?;
                Ok(Transformer::ThreeWinding(
                    ThreeWindingTransformer::from_specs(t.cooling, specs),
                ))
            }
            (Transformer::ThreeWinding(_), SpecOverrides::SingleWinding(_)) => {
                Err(SpecError::OverrideMismatch {
                    what: "single-winding overrides given for a three-winding transformer",
                })
            }
            (_, SpecOverrides::ThreeWinding(_)) => Err(SpecError::OverrideMismatch {
                what: "three-winding overrides given for a single-winding transformer",
            }),
        }
    }

    fn map_base(&self, f: impl FnOnce(&mut BaseSpecifications)) -> SpecResult<Self> {
        match self {
            Transformer::Power(t) => {
                let mut specs = t.specs.clone();
                f(&mut specs.base);
                specs.validate()?;
                Ok(Transformer::Power(PowerTransformer::from_specs(
                    t.cooling, specs,
                )))
            }
            Transformer::Distribution(t) => {
                let mut specs = t.specs.clone();
                f(&mut specs.base);
                specs.validate()?;
                Ok(Transformer::Distribution(
                    DistributionTransformer::from_specs(specs),
                ))
            }
            Transformer::ThreeWinding(t) => {
                let mut specs = t.specs.clone();
                f(&mut specs.base);
                specs.validate()?;
                Ok(Transformer::ThreeWinding(
                    ThreeWindingTransformer::from_specs(t.cooling, specs),
                ))
            }
        }
    }

    fn inner(&self) -> &dyn ThermalCharacteristics {
        match self {
            Transformer::Power(t) => t,
            Transformer::Distribution(t) => t,
            Transformer::ThreeWinding(t) => t,
        }
    }
}

impl ThermalCharacteristics for Transformer {
    fn kind(&self) -> TransformerKind {
        self.inner().kind()
    }

    fn cooling(&self) -> CoolerType {
        self.inner().cooling()
    }

    fn defaults(&self) -> &'static DefaultSpecifications {
        self.inner().defaults()
    }

    fn base(&self) -> &BaseSpecifications {
        self.inner().base()
    }

    fn windings(&self) -> &[WindingSpecifications] {
        self.inner().windings()
    }

    fn pre_factor(&self) -> Real {
        self.inner().pre_factor()
    }

    fn internal_temperature(&self, ambient: Real) -> Real {
        self.inner().internal_temperature(ambient)
    }

    fn end_temperature_top_oil(&self, load: &[Real]) -> Real {
        self.inner().end_temperature_top_oil(load)
    }
}
