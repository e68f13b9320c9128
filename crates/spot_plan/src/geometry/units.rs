//! Length units at the encoder boundary.
//!
//! Spot coordinates are produced in centimetres. Plan encoders that write
//! millimetre-based records convert with [`to_millimeters`].

pub const MILLIMETERS_PER_CENTIMETER: f64 = 10.0;

/// Converts a flattened centimetre coordinate sequence to millimetres.
pub fn to_millimeters(coordinates_cm: &[f64]) -> Vec<f64> {
    coordinates_cm
        .iter()
        .map(|c| c * MILLIMETERS_PER_CENTIMETER)
        .collect()
}
