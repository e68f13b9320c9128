//! Fields and plans: the output handed to a [`PlanEncoder`].
use crate::delivery::builder::{DeliverySequence, EnergyLayer};
use crate::delivery::control_point::ControlPoint;
use crate::delivery::encoder::PlanEncoder;
use crate::error::Result;
use crate::pattern::FieldSpec;

/// Identifier used by [`crate::delivery::runner::plan_field`].
pub const DEFAULT_FIELD_ID: &str = "field-1";

/// A field to be built: its geometry and one nominal energy per energy layer.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRequest {
    pub id: String,
    pub spec: FieldSpec,
    /// Nominal energies in MeV, one per delivery point.
    pub energies: Vec<f64>,
}

impl FieldRequest {
    /// Creates a single-energy request.
    pub fn new(id: impl Into<String>, spec: impl Into<FieldSpec>, nominal_energy: f64) -> Self {
        Self {
            id: id.into(),
            spec: spec.into(),
            energies: vec![nominal_energy],
        }
    }

    /// Replaces the energies; the same spot pattern is delivered at each.
    pub fn with_energy_layers(mut self, energies: Vec<f64>) -> Self {
        self.energies = energies;
        self
    }
}

/// A built field.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub id: String,
    pub spec: FieldSpec,
    pub layers: Vec<EnergyLayer>,
    pub sequence: DeliverySequence,
}

impl Field {
    pub fn new(
        id: impl Into<String>,
        spec: FieldSpec,
        layers: Vec<EnergyLayer>,
        sequence: DeliverySequence,
    ) -> Self {
        Self {
            id: id.into(),
            spec,
            layers,
            sequence,
        }
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.sequence.control_points
    }

    /// Spots summed over all energy layers.
    pub fn spot_count(&self) -> usize {
        self.layers.iter().map(|l| l.spots.len()).sum()
    }

    pub fn total_monitor_units(&self) -> f64 {
        self.sequence.total_monitor_units
    }

    pub fn final_cumulative_weight(&self) -> f64 {
        self.sequence.final_cumulative_weight
    }
}

/// An ordered collection of [`Field`]s.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
    pub fields: Vec<Field>,
}

impl Plan {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn total_monitor_units(&self) -> f64 {
        self.fields.iter().map(Field::total_monitor_units).sum()
    }

    /// Feeds every field to `encoder` in plan order, then finishes it.
    ///
    /// Stops at the first encoder error.
    pub fn encode_with(&self, encoder: &mut dyn PlanEncoder) -> Result<()> {
        for field in &self.fields {
            encoder.encode_field(field)?;
        }
        encoder.finish()
    }
}
