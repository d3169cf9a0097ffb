//! Simulation output and its tabular forms.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Write;
use ttm_core::{Real, max_value};
use ttm_spec::{PerSide, Side};

use crate::aging::{PaperInsulationType, days_aged};
use crate::error::{SimError, SimResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Hot-spot trajectory, one series per winding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HotSpotProfile {
    Single(Vec<Real>),
    ThreeWinding(PerSide<Vec<Real>>),
}

impl HotSpotProfile {
    pub fn single(&self) -> Option<&[Real]> {
        match self {
            HotSpotProfile::Single(values) => Some(values),
            HotSpotProfile::ThreeWinding(_) => None,
        }
    }

    pub fn three_winding(&self) -> Option<&PerSide<Vec<Real>>> {
        match self {
            HotSpotProfile::Single(_) => None,
            HotSpotProfile::ThreeWinding(sides) => Some(sides),
        }
    }

    /// Peak per winding, in winding order.
    pub fn peaks(&self) -> Vec<Real> {
        let peak = |values: &[Real]| max_value(values).unwrap_or(Real::NEG_INFINITY);
        match self {
            HotSpotProfile::Single(values) => vec![peak(values)],
            HotSpotProfile::ThreeWinding(sides) => {
                vec![peak(&sides.lv), peak(&sides.mv), peak(&sides.hv)]
            }
        }
    }

    /// Hottest winding at each point.
    pub fn hottest(&self) -> Vec<Real> {
        match self {
            HotSpotProfile::Single(values) => values.clone(),
            HotSpotProfile::ThreeWinding(sides) => sides
                .lv
                .iter()
                .zip(&sides.mv)
                .zip(&sides.hv)
                .map(|((lv, mv), hv)| lv.max(*mv).max(*hv))
                .collect(),
        }
    }
}

/// One row of the single-winding table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleWindingRow {
    pub timestamp: NaiveDateTime,
    pub top_oil_temperature: Real,
    pub hot_spot_temperature: Real,
}

/// One row of the three-winding table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeWindingRow {
    pub timestamp: NaiveDateTime,
    pub top_oil_temperature: Real,
    pub hot_spot_temperature_low_voltage_side: Real,
    pub hot_spot_temperature_middle_voltage_side: Real,
    pub hot_spot_temperature_high_voltage_side: Real,
}

/// Top-oil and hot-spot trajectories, indexed like the input profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputProfile {
    timestamps: Vec<NaiveDateTime>,
    #[serde(rename = "top_oil_temperature")]
    top_oil: Vec<Real>,
    #[serde(rename = "hot_spot_temperature")]
    hot_spot: HotSpotProfile,
}

impl OutputProfile {
    pub(crate) fn new(
        timestamps: Vec<NaiveDateTime>,
        top_oil: Vec<Real>,
        hot_spot: HotSpotProfile,
    ) -> Self {
        Self {
            timestamps,
            top_oil,
            hot_spot,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn top_oil(&self) -> &[Real] {
        &self.top_oil
    }

    pub fn hot_spot(&self) -> &HotSpotProfile {
        &self.hot_spot
    }

    pub fn peak_top_oil(&self) -> Option<Real> {
        max_value(&self.top_oil)
    }

    /// Peak over all windings.
    pub fn peak_hot_spot(&self) -> Option<Real> {
        max_value(&self.hot_spot.peaks())
    }

    /// Equivalent paper aging of the hottest winding, in days.
    pub fn days_aged(&self, insulation: PaperInsulationType) -> SimResult<Real> {
        days_aged(&self.timestamps, &self.hot_spot.hottest(), insulation)
    }

    /// Flatten a single-winding profile.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ThreeWindingOutput`] for a three-winding profile.
    pub fn single_winding_rows(&self) -> SimResult<Vec<SingleWindingRow>> {
        let hot_spot = self.hot_spot.single().ok_or(SimError::ThreeWindingOutput)?;
        Ok(self
            .timestamps
            .iter()
            .zip(&self.top_oil)
            .zip(hot_spot)
            .map(|((&timestamp, &top_oil), &hot_spot)| SingleWindingRow {
                timestamp,
                top_oil_temperature: top_oil,
                hot_spot_temperature: hot_spot,
            })
            .collect())
    }

    /// Flatten a three-winding profile.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::SingleWindingOutput`] for a single-winding profile.
    pub fn three_winding_rows(&self) -> SimResult<Vec<ThreeWindingRow>> {
        let sides = self
            .hot_spot
            .three_winding()
            .ok_or(SimError::SingleWindingOutput)?;
        Ok((0..self.len())
            .map(|i| ThreeWindingRow {
                timestamp: self.timestamps[i],
                top_oil_temperature: self.top_oil[i],
                hot_spot_temperature_low_voltage_side: sides.lv[i],
                hot_spot_temperature_middle_voltage_side: sides.mv[i],
                hot_spot_temperature_high_voltage_side: sides.hv[i],
            })
            .collect())
    }

    /// Write the flattened table as CSV with a header row.
    pub fn write_csv<W: Write>(&self, mut out: W) -> SimResult<()> {
        let mut header = vec![
            "timestamp".to_string(),
            "top_oil_temperature".to_string(),
        ];
        match &self.hot_spot {
            HotSpotProfile::Single(_) => header.push("hot_spot_temperature".to_string()),
            HotSpotProfile::ThreeWinding(_) => header.extend(
                Side::ALL
                    .iter()
                    .map(|side| format!("hot_spot_temperature_{}", side.column_suffix())),
            ),
        }
        writeln!(out, "{}", header.join(","))?;

        for i in 0..self.len() {
            let mut line = format!(
                "{},{}",
                self.timestamps[i].format(TIMESTAMP_FORMAT),
                self.top_oil[i]
            );
            match &self.hot_spot {
                HotSpotProfile::Single(values) => line.push_str(&format!(",{}", values[i])),
                HotSpotProfile::ThreeWinding(sides) => {
                    for (_, values) in sides.iter() {
                        line.push_str(&format!(",{}", values[i]));
                    }
                }
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}
