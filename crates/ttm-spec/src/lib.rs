//! Transformer specifications for the thermal model.
//!
//! A transformer is described by a complete, immutable parameter set built by
//! merging user-supplied values over a per-kind default table. This crate owns:
//! - the default tables, one constant per (kind, cooling type) pair
//! - user and merged specification records
//! - the three-winding per-winding loss decomposition
//! - the [`ThermalCharacteristics`] trait exposing the steady-state top-oil formula
//!
//! # Design Principles
//!
//! - **No shared mutable defaults**: default tables are `const` values
//! - **Copy on change**: hot-spot factor, surcharge and natural-cooling overrides
//!   return a new validated transformer and never touch the original

pub mod defaults;
pub mod error;
pub mod kind;
pub mod overrides;
pub mod specs;
pub mod transformer;
pub mod winding;

pub use defaults::{DISTRIBUTION_ONAN, DefaultSpecifications, POWER_ONAF, POWER_ONAN};
pub use error::{SpecError, SpecResult};
pub use kind::{CoolerType, TransformerKind};
pub use overrides::{SingleWindingOverrides, SpecOverrides, ThreeWindingOverrides, WindingOverrides};
pub use specs::{
    BaseSpecifications, ThreeWindingSpecifications, TransformerSpecifications,
    UserBaseSpecifications, UserThreeWindingSpecifications, UserTransformerSpecifications,
};
pub use transformer::{
    DistributionTransformer, PowerTransformer, ThermalCharacteristics, ThreeWindingTransformer,
    Transformer,
};
pub use winding::{PairwiseLosses, PerSide, Side, WindingSpecifications, decompose_load_losses};
