//! Control point construction and plan assembly.
//!
//! [`ControlPointBuilder`] partitions spot sets into an alternating sequence of
//! delivery and transit control points. [`PlanRunner`] and [`plan_field`] chain a
//! [`crate::pattern::FieldSpec`] through generation and building into [`Field`]s,
//! optionally reporting progress as [`BuildEvent`]s. A [`PlanEncoder`] consumes
//! the result.
pub mod builder;
pub mod control_point;
pub mod encoder;
pub mod events;
pub mod params;
pub mod plan;
pub mod runner;

pub use builder::{ControlPointBuilder, DeliverySequence, EnergyLayer};
pub use control_point::{ControlPoint, PointRole};
pub use encoder::PlanEncoder;
pub use events::{BuildEvent, BuildEventKind, EventSink, FnSink, VecSink};
pub use params::DeliveryParams;
pub use plan::{Field, FieldRequest, Plan, DEFAULT_FIELD_ID};
pub use runner::{plan_field, plan_field_with_events, PlanRunner};
