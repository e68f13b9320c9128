//! Event types and sinks for observing field builds.
//!
//! This module defines [`BuildEvent`] and a set of sinks and adapters to emit,
//! collect or forward events while turning field requests into a
//! [`crate::delivery::plan::Plan`] via [`crate::delivery::runner::PlanRunner`] or
//! [`crate::delivery::runner::plan_field_with_events`].
use crate::delivery::control_point::PointRole;
use crate::delivery::params::DeliveryParams;
use crate::pattern::ShapeTag;

/// Describes events emitted while building fields.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Emitted when a run over several field requests starts.
    RunStarted {
        /// Delivery parameters applied to every field.
        params: DeliveryParams,
        /// Number of field requests.
        field_count: usize,
    },

    /// Emitted when the whole run finishes.
    RunFinished {
        /// Number of fields built.
        field_count: usize,
        /// Sum of the fields' total monitor units.
        total_monitor_units: f64,
    },

    /// Emitted before a field's spots are generated.
    FieldStarted {
        /// Index of the field in the run.
        index: usize,
        /// The field id.
        id: String,
        /// Shape of the field specification.
        shape: ShapeTag,
    },

    /// Emitted once the pattern generator returned.
    SpotsGenerated {
        field_index: usize,
        field_id: String,
        spot_count: usize,
        /// Sum of the generated relative weights.
        total_weight: f64,
    },

    /// Emitted for each control point appended to a field.
    ControlPointBuilt {
        field_index: usize,
        field_id: String,
        /// Control point index within the field.
        index: usize,
        role: PointRole,
        /// Cumulative weight before this point's spots are delivered.
        cumulative_weight: f64,
    },

    /// Emitted when a field is complete.
    FieldFinished {
        index: usize,
        id: String,
        total_monitor_units: f64,
        final_cumulative_weight: f64,
    },

    /// Non-fatal warning, such as a field without spots.
    Warning {
        /// Context string (e.g. field id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`BuildEvent`], used by sinks to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildEventKind {
    RunStarted,
    RunFinished,
    FieldStarted,
    SpotsGenerated,
    ControlPointBuilt,
    FieldFinished,
    Warning,
}

impl BuildEvent {
    pub fn kind(&self) -> BuildEventKind {
        match self {
            BuildEvent::RunStarted { .. } => BuildEventKind::RunStarted,
            BuildEvent::RunFinished { .. } => BuildEventKind::RunFinished,
            BuildEvent::FieldStarted { .. } => BuildEventKind::FieldStarted,
            BuildEvent::SpotsGenerated { .. } => BuildEventKind::SpotsGenerated,
            BuildEvent::ControlPointBuilt { .. } => BuildEventKind::ControlPointBuilt,
            BuildEvent::FieldFinished { .. } => BuildEventKind::FieldFinished,
            BuildEvent::Warning { .. } => BuildEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`BuildEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: BuildEvent);

    /// Whether events of `kind` should be constructed and sent at all.
    #[inline]
    fn wants(&self, _kind: BuildEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: BuildEvent) {}

    #[inline]
    fn wants(&self, _kind: BuildEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(BuildEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(BuildEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(BuildEvent),
{
    #[inline]
    fn send(&mut self, event: BuildEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<BuildEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn as_slice(&self) -> &[BuildEvent] {
        &self.events
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: BuildEvent) {
        self.events.push(event);
    }
}
