//! Partitioning of spot sets into an alternating control point sequence.
//!
//! A sequence of `N` control points alternates delivery points (even indices),
//! which carry one energy layer's spot weights, and transit points (odd indices),
//! which repeat the preceding layer's positions with zero weight. The cumulative
//! weight of point `i` is the sum of all spot weights of the points before it.
use tracing::debug;

use crate::delivery::control_point::{ControlPoint, PointRole};
use crate::delivery::params::DeliveryParams;
use crate::error::{Error, Result};
use crate::spots::{check_pairs, SpotSet};

/// One delivery point's worth of spots at a nominal beam energy.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyLayer {
    /// Nominal beam energy in MeV.
    pub nominal_energy: f64,
    pub spots: SpotSet,
}

impl EnergyLayer {
    pub fn new(nominal_energy: f64, spots: SpotSet) -> Self {
        Self {
            nominal_energy,
            spots,
        }
    }
}

/// Ordered control points of one field.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeliverySequence {
    pub control_points: Vec<ControlPoint>,
    /// Spot count summed over layers times monitor units per spot.
    pub total_monitor_units: f64,
    /// Cumulative weight after the last control point.
    pub final_cumulative_weight: f64,
}

impl DeliverySequence {
    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlPoint> {
        self.control_points.iter()
    }

    /// Control points that carry spot weights.
    pub fn delivery_points(&self) -> impl Iterator<Item = &ControlPoint> {
        self.control_points.iter().filter(|cp| cp.is_delivery())
    }
}

/// Builds [`DeliverySequence`]s from energy layers.
#[derive(Clone, Debug, Default)]
pub struct ControlPointBuilder {
    params: DeliveryParams,
}

impl ControlPointBuilder {
    pub fn try_new(params: DeliveryParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Creates a builder without validating `params`; [`Self::build`] still
    /// rejects a zero control point count.
    pub fn new(params: DeliveryParams) -> Self {
        debug_assert!(params.mu_per_spot >= 0.0, "mu_per_spot must be >= 0");
        debug_assert!(params.layer_scale >= 0.0, "layer_scale must be >= 0");
        Self { params }
    }

    pub fn params(&self) -> &DeliveryParams {
        &self.params
    }

    /// Builds the control point sequence for `layers`.
    ///
    /// The number of layers must equal `ceil(N / 2)` for `N` control points,
    /// otherwise [`Error::InvalidLayerCount`] is returned.
    pub fn build(&self, layers: &[EnergyLayer]) -> Result<DeliverySequence> {
        let n = self.params.control_points;
        if n < 1 || layers.len() != self.params.layer_count() {
            return Err(Error::InvalidLayerCount {
                requested: n,
                layers: layers.len(),
            });
        }
        for layer in layers {
            check_pairs(layer.spots.coordinates(), layer.spots.weights())?;
        }

        let mut control_points = Vec::with_capacity(n);
        let mut cumulative = 0.0;
        for index in 0..n {
            let layer = &layers[index / 2];
            let role = PointRole::for_index(index);
            let spot_weights: Vec<f64> = match role {
                PointRole::Delivery => layer
                    .spots
                    .weights()
                    .iter()
                    .map(|w| w * self.params.layer_scale)
                    .collect(),
                PointRole::Transit => vec![0.0; layer.spots.len()],
            };
            let delivered: f64 = spot_weights.iter().sum();

            control_points.push(ControlPoint {
                index,
                role,
                cumulative_weight: cumulative,
                position_map: layer.spots.coordinates().to_vec(),
                spot_weights,
                nominal_energy: layer.nominal_energy,
            });
            cumulative += delivered;
        }

        let spot_count: usize = layers.iter().map(|l| l.spots.len()).sum();
        let total_monitor_units = spot_count as f64 * self.params.mu_per_spot;
        debug!(
            "Built {} control points over {} layer(s): {} spots, {} MU, final weight {}.",
            n,
            layers.len(),
            spot_count,
            total_monitor_units,
            cumulative
        );

        Ok(DeliverySequence {
            control_points,
            total_monitor_units,
            final_cumulative_weight: cumulative,
        })
    }

    /// Builds a sequence from a single spot set.
    pub fn build_single(&self, spots: &SpotSet, nominal_energy: f64) -> Result<DeliverySequence> {
        self.build(&[EnergyLayer::new(nominal_energy, spots.clone())])
    }

    /// Builds a single-layer sequence from raw flattened coordinates and weights.
    pub fn build_from_parts(
        &self,
        coordinates: Vec<f64>,
        weights: Vec<f64>,
        nominal_energy: f64,
    ) -> Result<DeliverySequence> {
        check_pairs(&coordinates, &weights)?;
        let spots = SpotSet::new(coordinates, weights)?;
        self.build(&[EnergyLayer::new(nominal_energy, spots)])
    }
}
