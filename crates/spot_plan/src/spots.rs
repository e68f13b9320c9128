//! Spot sets: the immutable output of a pattern generator.
//!
//! A [`SpotSet`] holds spot positions as a flattened `[x0, y0, x1, y1, …]`
//! sequence (centimetres) next to one non-negative relative weight per spot.
//! Both sequences are checked on construction and never mutated afterwards.
use glam::DVec2;
use mint::Vector2;

use crate::error::{Error, Result};
use crate::geometry::pairs;

/// Ordered spot positions with their relative delivery weights.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpotSet {
    coordinates: Vec<f64>,
    weights: Vec<f64>,
}

impl SpotSet {
    /// Creates a spot set from flattened coordinates and per-spot weights.
    ///
    /// Fails with [`Error::MalformedSpotSet`] unless there are exactly two
    /// coordinates per weight, and with [`Error::InvalidConfig`] on a negative or
    /// non-finite weight.
    pub fn new(coordinates: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        check_pairs(&coordinates, &weights)?;
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::InvalidConfig(format!(
                "spot weights must be finite and >= 0, got {w}"
            )));
        }
        Ok(Self {
            coordinates,
            weights,
        })
    }

    /// Creates a spot set where every spot carries the same weight.
    pub fn uniform(coordinates: Vec<f64>, weight: f64) -> Result<Self> {
        let n = coordinates.len() / 2;
        Self::new(coordinates, vec![weight; n])
    }

    /// Creates a spot set from individual positions.
    pub fn from_positions<I, P>(positions: I, weights: Vec<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        let coordinates = positions
            .into_iter()
            .flat_map(|p| {
                let p: DVec2 = p.into();
                [p.x, p.y]
            })
            .collect();
        Self::new(coordinates, weights)
    }

    /// An empty spot set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of spots.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Flattened `[x0, y0, x1, y1, …]` coordinates in centimetres.
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Relative weight per spot, in spot order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterates spot positions in generation order.
    pub fn positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        pairs(&self.coordinates)
    }

    /// Spot positions as `mint` vectors for callers that do not use `glam`.
    pub fn positions_mint(&self) -> Vec<Vector2<f64>> {
        self.positions().map(Into::into).collect()
    }

    /// Sum of all spot weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Appends the spots of `other` after the spots of `self`.
    pub fn concat(mut self, other: SpotSet) -> Self {
        self.coordinates.extend(other.coordinates);
        self.weights.extend(other.weights);
        self
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.coordinates, self.weights)
    }
}

/// Checks the flattened pair invariant `len(coordinates) == 2 * len(weights)`.
pub(crate) fn check_pairs(coordinates: &[f64], weights: &[f64]) -> Result<()> {
    if coordinates.len() != 2 * weights.len() {
        return Err(Error::MalformedSpotSet {
            coordinates: coordinates.len(),
            weights: weights.len(),
        });
    }
    Ok(())
}
