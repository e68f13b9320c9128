//! Flattening of 2D lattices into interleaved coordinate sequences.
use glam::DVec2;

/// Cross product of two axis sample sets, flattened row-major with x as the
/// outer loop and y as the inner loop:
///
/// `[x0, y0, x0, y1, …, x0, yn, x1, y0, …, xm, yn]`
///
/// Control points and plan encoders rely on this exact interleaving.
pub fn cartesian_flatten(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(xs.len() * ys.len() * 2);
    for &x in xs {
        for &y in ys {
            out.push(x);
            out.push(y);
        }
    }
    out
}

/// Iterates a flattened `[x0, y0, x1, y1, …]` sequence as points.
///
/// A trailing unpaired value is ignored; callers that care check the length first.
pub fn pairs(coordinates: &[f64]) -> impl Iterator<Item = DVec2> + '_ {
    coordinates
        .chunks_exact(2)
        .map(|xy| DVec2::new(xy[0], xy[1]))
}
