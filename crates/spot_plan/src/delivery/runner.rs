//! High-level runner chaining pattern generation and control point building.
use tracing::{debug, info, warn};

use crate::delivery::builder::{ControlPointBuilder, EnergyLayer};
use crate::delivery::events::{BuildEvent, BuildEventKind, EventSink};
use crate::delivery::params::DeliveryParams;
use crate::delivery::plan::{Field, FieldRequest, Plan, DEFAULT_FIELD_ID};
use crate::error::Result;
use crate::pattern::{FieldSpec, SpotPattern};

/// Builds one field at a single nominal energy.
///
/// Every energy layer required by `params` reuses `nominal_energy`. The field is
/// identified as [`DEFAULT_FIELD_ID`].
pub fn plan_field(spec: &FieldSpec, nominal_energy: f64, params: &DeliveryParams) -> Result<Field> {
    plan_field_with_events(spec, nominal_energy, params, &mut ())
}

pub fn plan_field_with_events(
    spec: &FieldSpec,
    nominal_energy: f64,
    params: &DeliveryParams,
    sink: &mut dyn EventSink,
) -> Result<Field> {
    params.validate()?;
    let request = FieldRequest::new(DEFAULT_FIELD_ID, spec.clone(), nominal_energy)
        .with_energy_layers(vec![nominal_energy; params.layer_count()]);
    let builder = ControlPointBuilder::new(*params);
    build_field(&request, 0, &builder, sink)
}

/// Runs field requests into a [`Plan`] with shared delivery parameters.
pub struct PlanRunner {
    builder: ControlPointBuilder,
}

impl PlanRunner {
    pub fn try_new(params: DeliveryParams) -> Result<Self> {
        Ok(Self {
            builder: ControlPointBuilder::try_new(params)?,
        })
    }

    pub fn new(params: DeliveryParams) -> Self {
        Self {
            builder: ControlPointBuilder::new(params),
        }
    }

    pub fn params(&self) -> &DeliveryParams {
        self.builder.params()
    }

    /// Runs the given requests in order, returning the plan.
    ///
    /// Stops at the first failing field.
    pub fn run(&mut self, requests: &[FieldRequest]) -> Result<Plan> {
        self.run_with_events(requests, &mut ())
    }

    pub fn run_with_events(
        &mut self,
        requests: &[FieldRequest],
        sink: &mut dyn EventSink,
    ) -> Result<Plan> {
        if sink.wants(BuildEventKind::RunStarted) {
            sink.send(BuildEvent::RunStarted {
                params: *self.builder.params(),
                field_count: requests.len(),
            });
        }

        let mut plan = Plan::new();
        for (index, request) in requests.iter().enumerate() {
            plan.push(build_field(request, index, &self.builder, sink)?);
        }

        info!(
            "Plan built: {} field(s), {} MU.",
            plan.len(),
            plan.total_monitor_units()
        );
        if sink.wants(BuildEventKind::RunFinished) {
            sink.send(BuildEvent::RunFinished {
                field_count: plan.len(),
                total_monitor_units: plan.total_monitor_units(),
            });
        }
        Ok(plan)
    }

    /// Builds a single request without wrapping it in a plan.
    pub fn run_field(&mut self, request: &FieldRequest) -> Result<Field> {
        build_field(request, 0, &self.builder, &mut ())
    }
}

fn build_field(
    request: &FieldRequest,
    index: usize,
    builder: &ControlPointBuilder,
    sink: &mut dyn EventSink,
) -> Result<Field> {
    let shape = request.spec.shape();
    info!(
        "Field {}: '{}' | shape: {} | energies: {:?}.",
        index, request.id, shape, request.energies
    );
    if sink.wants(BuildEventKind::FieldStarted) {
        sink.send(BuildEvent::FieldStarted {
            index,
            id: request.id.clone(),
            shape,
        });
    }

    let spots = request.spec.generate()?;
    debug!(
        "Field '{}': {} spots, total weight {}.",
        request.id,
        spots.len(),
        spots.total_weight()
    );
    if sink.wants(BuildEventKind::SpotsGenerated) {
        sink.send(BuildEvent::SpotsGenerated {
            field_index: index,
            field_id: request.id.clone(),
            spot_count: spots.len(),
            total_weight: spots.total_weight(),
        });
    }
    if spots.is_empty() {
        warn!("Field '{}' produced no spots.", request.id);
        if sink.wants(BuildEventKind::Warning) {
            sink.send(BuildEvent::Warning {
                context: format!("field:{}", request.id),
                message: format!("{shape} pattern produced no spots"),
            });
        }
    }

    let layers: Vec<EnergyLayer> = request
        .energies
        .iter()
        .map(|energy| EnergyLayer::new(*energy, spots.clone()))
        .collect();
    let sequence = builder.build(&layers)?;

    if sink.wants(BuildEventKind::ControlPointBuilt) {
        for cp in &sequence.control_points {
            sink.send(BuildEvent::ControlPointBuilt {
                field_index: index,
                field_id: request.id.clone(),
                index: cp.index,
                role: cp.role,
                cumulative_weight: cp.cumulative_weight,
            });
        }
    }
    if sink.wants(BuildEventKind::FieldFinished) {
        sink.send(BuildEvent::FieldFinished {
            index,
            id: request.id.clone(),
            total_monitor_units: sequence.total_monitor_units,
            final_cumulative_weight: sequence.final_cumulative_weight,
        });
    }

    Ok(Field::new(
        request.id.clone(),
        request.spec.clone(),
        layers,
        sequence,
    ))
}
