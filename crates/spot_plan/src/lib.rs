#![forbid(unsafe_code)]
//! spot_plan: spot-pattern generation and control-point weight accumulation for
//! scanned particle-beam treatment fields.
//!
//! Modules:
//! - geometry: axis sampling, lattice flattening, disc membership, unit conversion
//! - pattern: field specifications and the rectangle/hex, disc and image generators
//! - spots: the spot set produced by a generator
//! - delivery: control points, fields, plans, runner, events and the encoder seam
//!
//! All coordinates are in centimetres; energies are in MeV.
pub mod delivery;
pub mod error;
pub mod geometry;
pub mod pattern;
pub mod spots;

/// Convenient re-exports for common types. Import with `use spot_plan::prelude::*;`.
pub mod prelude {
    pub use crate::delivery::{
        plan_field, plan_field_with_events, BuildEvent, BuildEventKind, ControlPoint,
        ControlPointBuilder, DeliveryParams, DeliverySequence, EnergyLayer, EventSink, Field,
        FieldRequest, FnSink, Plan, PlanEncoder, PlanRunner, PointRole, VecSink,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{to_millimeters, MILLIMETERS_PER_CENTIMETER};
    pub use crate::pattern::{
        ActivationWindow, DiscPattern, FieldConfig, FieldSpec, ImagePattern, ImageSource,
        IntensityGrid, LatticeMode, RectanglePattern, Resample, RowOrder, ShapeTag, SpotPattern,
    };
    pub use crate::spots::SpotSet;
}
