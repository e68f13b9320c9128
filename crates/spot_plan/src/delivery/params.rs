//! Delivery parameters shared by every field of a plan.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for turning spot sets into control points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryParams {
    /// Number of control points per field. Even indices deliver a layer,
    /// odd indices are transit points.
    pub control_points: usize,
    /// Monitor units per spot.
    pub mu_per_spot: f64,
    /// Factor applied to delivery weights. Does not affect monitor units.
    pub layer_scale: f64,
}

impl Default for DeliveryParams {
    fn default() -> Self {
        Self {
            control_points: 2,
            mu_per_spot: 1.0,
            layer_scale: 1.0,
        }
    }
}

impl DeliveryParams {
    /// Creates a new [`DeliveryParams`] with the specified control point count.
    pub fn new(control_points: usize) -> Self {
        Self {
            control_points,
            ..Default::default()
        }
    }

    /// Sets the control point count.
    pub fn with_control_points(mut self, control_points: usize) -> Self {
        self.control_points = control_points;
        self
    }

    /// Sets the monitor units per spot.
    pub fn with_mu_per_spot(mut self, mu_per_spot: f64) -> Self {
        self.mu_per_spot = mu_per_spot;
        self
    }

    /// Sets the delivery weight scale.
    pub fn with_layer_scale(mut self, layer_scale: f64) -> Self {
        self.layer_scale = layer_scale;
        self
    }

    /// Number of energy layers (delivery points) implied by the control point count.
    pub fn layer_count(&self) -> usize {
        self.control_points.div_ceil(2)
    }

    /// Validates the parameters, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.control_points < 1 {
            return Err(Error::InvalidLayerCount {
                requested: self.control_points,
                layers: 0,
            });
        }
        if !(self.mu_per_spot.is_finite() && self.mu_per_spot >= 0.0) {
            return Err(Error::InvalidConfig(
                "mu_per_spot must be finite and >= 0".into(),
            ));
        }
        if !(self.layer_scale.is_finite() && self.layer_scale >= 0.0) {
            return Err(Error::InvalidConfig(
                "layer_scale must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }
}
