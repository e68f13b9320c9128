//! Square and hexagonal lattices over a rectangle.
use std::fmt;
use std::str::FromStr;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{build_axis_samples, cartesian_flatten};
use crate::pattern::{SpotPattern, UNIFORM_WEIGHT};
use crate::spots::SpotSet;

/// Lattice layout of a rectangular field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LatticeMode {
    #[default]
    Square,
    /// The square lattice plus a copy shifted by half a step along y.
    Hexagonal,
}

impl FromStr for LatticeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(LatticeMode::Square),
            "hexagonal" | "hex" => Ok(LatticeMode::Hexagonal),
            other => Err(Error::InvalidConfig(format!(
                "unknown lattice mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LatticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatticeMode::Square => f.write_str("square"),
            LatticeMode::Hexagonal => f.write_str("hexagonal"),
        }
    }
}

/// Lattice of uniformly weighted spots over `[xy_min, xy_max]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RectanglePattern {
    /// Lower-left corner in cm.
    pub xy_min: DVec2,
    /// Upper-right corner in cm.
    pub xy_max: DVec2,
    /// Spot spacing in cm. Non-positive selects even subdivision.
    pub spacing: f64,
    /// Samples per axis used when `spacing` is not positive.
    pub fallback_count: Option<usize>,
    pub lattice: LatticeMode,
}

impl RectanglePattern {
    /// Create a square-lattice pattern.
    pub fn new(xy_min: impl Into<DVec2>, xy_max: impl Into<DVec2>, spacing: f64) -> Self {
        Self {
            xy_min: xy_min.into(),
            xy_max: xy_max.into(),
            spacing,
            fallback_count: None,
            lattice: LatticeMode::Square,
        }
    }

    pub fn with_lattice(mut self, lattice: LatticeMode) -> Self {
        self.lattice = lattice;
        self
    }

    /// Sets the per-axis sample count used when `spacing` is not positive.
    pub fn with_fallback_count(mut self, count: usize) -> Self {
        self.fallback_count = Some(count);
        self
    }

    /// Validates bounds and spacing.
    pub fn validate(&self) -> Result<()> {
        validate_bounds(self.xy_min, self.xy_max)?;
        let spaced = self.spacing.is_finite() && self.spacing > 0.0;
        match self.fallback_count {
            None if !spaced => Err(Error::InvalidSpacing(self.spacing)),
            // A single row has no row step to shift by.
            Some(1) if !spaced && self.lattice == LatticeMode::Hexagonal => Err(
                Error::InvalidConfig("hexagonal lattice needs a fallback count of at least 2".into()),
            ),
            _ => Ok(()),
        }
    }

    fn axes(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        let xs = build_axis_samples(
            self.xy_min.x,
            self.xy_max.x,
            self.spacing,
            self.fallback_count,
        )?;
        let ys = build_axis_samples(
            self.xy_min.y,
            self.xy_max.y,
            self.spacing,
            self.fallback_count,
        )?;
        Ok((xs, ys))
    }

    /// Step between neighbouring rows, which is stretched in fallback mode.
    fn row_step(&self, ys: &[f64]) -> f64 {
        if self.spacing.is_finite() && self.spacing > 0.0 {
            self.spacing
        } else if ys.len() >= 2 {
            ys[1] - ys[0]
        } else {
            0.0
        }
    }
}

impl SpotPattern for RectanglePattern {
    fn generate(&self) -> Result<SpotSet> {
        self.validate()?;
        let (xs, ys) = self.axes()?;
        let square = SpotSet::uniform(cartesian_flatten(&xs, &ys), UNIFORM_WEIGHT)?;

        match self.lattice {
            LatticeMode::Square => Ok(square),
            LatticeMode::Hexagonal => {
                // Shifted rows may overhang xy_max.y by half a step; no clipping.
                let half = 0.5 * self.row_step(&ys);
                let shifted: Vec<f64> = ys.iter().map(|y| y + half).collect();
                let offset = SpotSet::uniform(cartesian_flatten(&xs, &shifted), UNIFORM_WEIGHT)?;
                Ok(square.concat(offset))
            }
        }
    }
}

pub(crate) fn validate_bounds(xy_min: DVec2, xy_max: DVec2) -> Result<()> {
    if !xy_min.is_finite() || !xy_max.is_finite() {
        return Err(Error::InvalidConfig("field bounds must be finite".into()));
    }
    if xy_max.x <= xy_min.x || xy_max.y <= xy_min.y {
        return Err(Error::InvalidConfig(format!(
            "xy_max {xy_max} must exceed xy_min {xy_min} in both components"
        )));
    }
    Ok(())
}
