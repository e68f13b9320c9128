//! Shared geometry primitives for spot patterns.
//!
//! All coordinates produced here are in centimetres. Conversion to the units a
//! plan encoder expects happens at the encoder boundary, see [`units`].
pub mod axis;
pub mod disc;
pub mod lattice;
pub mod units;

pub use axis::{build_axis_samples, linspace, MAX_AXIS_SAMPLES};
pub use disc::disc_membership;
pub use lattice::{cartesian_flatten, pairs};
pub use units::{to_millimeters, MILLIMETERS_PER_CENTIMETER};
