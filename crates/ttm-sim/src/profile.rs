//! Input time series for a simulation run.

use chrono::{Duration, NaiveDateTime};
use ttm_core::{Real, ensure_finite, ensure_non_negative, step_minutes};
use ttm_spec::PerSide;

use crate::error::{SimError, SimResult};

/// Load current per point [A], one series per winding.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadProfile {
    Single(Vec<Real>),
    ThreeWinding(PerSide<Vec<Real>>),
}

impl LoadProfile {
    pub fn winding_count(&self) -> usize {
        match self {
            LoadProfile::Single(_) => 1,
            LoadProfile::ThreeWinding(_) => 3,
        }
    }

    /// Load series in winding order (`lv, mv, hv` for three windings).
    pub fn columns(&self) -> Vec<&[Real]> {
        match self {
            LoadProfile::Single(load) => vec![load.as_slice()],
            LoadProfile::ThreeWinding(sides) => {
                vec![sides.lv.as_slice(), sides.mv.as_slice(), sides.hv.as_slice()]
            }
        }
    }

    fn named_columns(&self) -> Vec<(&'static str, &[Real])> {
        match self {
            LoadProfile::Single(load) => vec![("load", load.as_slice())],
            LoadProfile::ThreeWinding(sides) => vec![
                ("load_lv", sides.lv.as_slice()),
                ("load_mv", sides.mv.as_slice()),
                ("load_hv", sides.hv.as_slice()),
            ],
        }
    }
}

/// Validated simulation input.
///
/// Timestamps are non-decreasing; a repeated timestamp is a zero-length step.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureProfile {
    timestamps: Vec<NaiveDateTime>,
    ambient: Vec<Real>,
    load: LoadProfile,
    top_oil_measured: Option<Vec<Real>>,
}

impl TemperatureProfile {
    /// Create a profile.
    ///
    /// # Errors
    ///
    /// Returns error for an empty profile, series of different lengths,
    /// timestamps out of order, negative or non-finite loads and non-finite
    /// ambient temperatures.
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        ambient: Vec<Real>,
        load: LoadProfile,
    ) -> SimResult<Self> {
        let expected = timestamps.len();
        if expected == 0 {
            return Err(SimError::InvalidArg {
                what: "profile must contain at least one point",
            });
        }
        check_len("ambient_temperature", expected, ambient.len())?;
        for (what, column) in load.named_columns() {
            check_len(what, expected, column.len())?;
            for &value in column {
                ensure_non_negative(value, what)?;
            }
        }
        for &value in &ambient {
            ensure_finite(value, "ambient_temperature")?;
        }
        step_minutes(&timestamps)?;

        Ok(Self {
            timestamps,
            ambient,
            load,
            top_oil_measured: None,
        })
    }

    /// Points spaced `step` apart starting at `start`, with constant ambient
    /// and constant load on every winding.
    pub fn constant(
        start: NaiveDateTime,
        step: Duration,
        points: usize,
        ambient: Real,
        load: &[Real],
    ) -> SimResult<Self> {
        let timestamps: Vec<NaiveDateTime> = (0..points)
            .map(|i| start + step * i as i32)
            .collect();
        let load = match load {
            [single] => LoadProfile::Single(vec![*single; points]),
            [lv, mv, hv] => LoadProfile::ThreeWinding(PerSide::new(
                vec![*lv; points],
                vec![*mv; points],
                vec![*hv; points],
            )),
            _ => {
                return Err(SimError::InvalidArg {
                    what: "constant load needs one or three values",
                });
            }
        };
        Self::new(timestamps, vec![ambient; points], load)
    }

    /// Attach measured top-oil temperatures. They only drive the cooling
    /// switch thresholds, never the recursion.
    pub fn with_measured_top_oil(mut self, values: Vec<Real>) -> SimResult<Self> {
        check_len("top_oil_measured", self.len(), values.len())?;
        for &value in &values {
            ensure_finite(value, "top_oil_measured")?;
        }
        self.top_oil_measured = Some(values);
        Ok(self)
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

    pub fn ambient(&self) -> &[Real] {
        &self.ambient
    }

    pub fn load(&self) -> &LoadProfile {
        &self.load
    }

    pub fn top_oil_measured(&self) -> Option<&[Real]> {
        self.top_oil_measured.as_deref()
    }
}

fn check_len(what: &'static str, expected: usize, found: usize) -> SimResult<()> {
    if expected != found {
        return Err(SimError::LengthMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}
