//! A single beam state in a delivery sequence.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::pairs;

/// Whether a control point delivers spots or only moves the beam.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointRole {
    /// Even index: carries the layer's spot weights.
    Delivery,
    /// Odd index: all spot weights are zero.
    Transit,
}

impl PointRole {
    /// Role of the control point at `index`.
    #[inline]
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            PointRole::Delivery
        } else {
            PointRole::Transit
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPoint {
    pub index: usize,
    pub role: PointRole,
    /// Weight delivered before this point.
    pub cumulative_weight: f64,
    /// Flattened `[x0, y0, x1, y1, …]` spot positions in centimetres.
    pub position_map: Vec<f64>,
    pub spot_weights: Vec<f64>,
    /// Nominal beam energy in MeV.
    pub nominal_energy: f64,
}

impl ControlPoint {
    pub fn spot_count(&self) -> usize {
        self.spot_weights.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.spot_weights.iter().sum()
    }

    pub fn positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        pairs(&self.position_map)
    }

    pub fn is_delivery(&self) -> bool {
        self.role == PointRole::Delivery
    }
}
