//! Closed-disc membership test.
use glam::DVec2;

/// Returns `true` when `p` lies inside or on the boundary of the disc.
#[inline]
pub fn disc_membership(p: DVec2, center: DVec2, radius: f64) -> bool {
    (p - center).length_squared() <= radius * radius
}
