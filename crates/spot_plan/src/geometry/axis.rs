//! One-dimensional coordinate sampling along a lattice axis.
use crate::error::{Error, Result};

/// Upper bound on samples along one lattice or image axis.
pub const MAX_AXIS_SAMPLES: usize = 1 << 14;

/// Builds the ordered samples of one lattice axis between `min` and `max`.
///
/// With a positive, finite `spacing` the samples are `min + i * spacing`, and the
/// last one is kept whenever it lies within half a step of `max`. Samples are
/// computed by multiplication so the final row or column is not lost to
/// accumulated rounding.
///
/// A non-positive or non-finite `spacing` falls back to [`linspace`] with
/// `fallback_count` samples, which stretches the true spacing so both extremes
/// land exactly on `min` and `max`. Without a fallback count this fails with
/// [`Error::InvalidSpacing`].
///
/// Spacings that would need more than [`MAX_AXIS_SAMPLES`] samples fail with
/// [`Error::InvalidSpacing`]; fallback counts above it with [`Error::InvalidConfig`].
pub fn build_axis_samples(
    min: f64,
    max: f64,
    spacing: f64,
    fallback_count: Option<usize>,
) -> Result<Vec<f64>> {
    if spacing.is_finite() && spacing > 0.0 {
        let steps = ((max - min) / spacing + 0.5).ceil();
        if steps > MAX_AXIS_SAMPLES as f64 {
            return Err(Error::InvalidSpacing(spacing));
        }
        // Saturating cast: a reversed or NaN range yields no samples.
        let n = steps.max(0.0) as usize;
        return Ok((0..n).map(|i| min + i as f64 * spacing).collect());
    }

    match fallback_count {
        Some(count) if count > MAX_AXIS_SAMPLES => Err(Error::InvalidConfig(format!(
            "fallback spot count {count} exceeds {MAX_AXIS_SAMPLES} per axis"
        ))),
        Some(count) => Ok(linspace(min, max, count)),
        None => Err(Error::InvalidSpacing(spacing)),
    }
}

/// Evenly subdivides `[min, max]` into `count` samples, both ends included.
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            let mut out: Vec<f64> = (0..count).map(|i| min + i as f64 * step).collect();
            out[count - 1] = max;
            out
        }
    }
}
