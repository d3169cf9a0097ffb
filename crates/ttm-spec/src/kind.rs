//! Transformer kinds and cooling types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cooling mode of the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoolerType {
    /// Oil natural, air natural.
    #[serde(rename = "ONAN")]
    Onan,
    /// Oil natural, air forced (fans).
    #[serde(rename = "ONAF")]
    Onaf,
}

impl fmt::Display for CoolerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoolerType::Onan => write!(f, "ONAN"),
            CoolerType::Onaf => write!(f, "ONAF"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformerKind {
    Power,
    Distribution,
    ThreeWinding,
}

impl fmt::Display for TransformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformerKind::Power => write!(f, "power"),
            TransformerKind::Distribution => write!(f, "distribution"),
            TransformerKind::ThreeWinding => write!(f, "three-winding"),
        }
    }
}
