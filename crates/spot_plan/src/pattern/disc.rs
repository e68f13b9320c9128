//! Square lattice clipped to a closed disc.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{build_axis_samples, cartesian_flatten, disc_membership, pairs};
use crate::pattern::{SpotPattern, UNIFORM_WEIGHT};
use crate::spots::SpotSet;

/// Uniformly weighted spots on a square lattice inside a disc.
///
/// The spot count is an output: it follows from the diameter and spacing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct DiscPattern {
    /// Disc center in cm.
    pub center: DVec2,
    /// Disc diameter in cm.
    pub diameter: f64,
    /// Lattice spacing in cm. Non-positive selects even subdivision of the bounding box.
    pub spacing: f64,
    /// Samples per axis of the bounding box used when `spacing` is not positive.
    pub fallback_count: Option<usize>,
}

impl DiscPattern {
    pub fn new(center: impl Into<DVec2>, diameter: f64, spacing: f64) -> Self {
        Self {
            center: center.into(),
            diameter,
            spacing,
            fallback_count: None,
        }
    }

    pub fn with_fallback_count(mut self, count: usize) -> Self {
        self.fallback_count = Some(count);
        self
    }

    pub fn radius(&self) -> f64 {
        self.diameter * 0.5
    }

    /// Validates center, diameter and spacing.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(Error::InvalidConfig("disc center must be finite".into()));
        }
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "disc diameter must be > 0, got {}",
                self.diameter
            )));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) && self.fallback_count.is_none() {
            return Err(Error::InvalidSpacing(self.spacing));
        }
        Ok(())
    }
}

impl SpotPattern for DiscPattern {
    fn generate(&self) -> Result<SpotSet> {
        self.validate()?;
        let r = self.radius();
        let min = self.center - DVec2::splat(r);
        let max = self.center + DVec2::splat(r);

        let xs = build_axis_samples(min.x, max.x, self.spacing, self.fallback_count)?;
        let ys = build_axis_samples(min.y, max.y, self.spacing, self.fallback_count)?;
        let lattice = cartesian_flatten(&xs, &ys);

        let coordinates: Vec<f64> = pairs(&lattice)
            .filter(|p| disc_membership(*p, self.center, r))
            .flat_map(|p| [p.x, p.y])
            .collect();
        SpotSet::uniform(coordinates, UNIFORM_WEIGHT)
    }
}
