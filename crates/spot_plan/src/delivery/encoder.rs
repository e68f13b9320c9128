//! Seam for writing plans into an external record format.
//!
//! The crate produces [`Field`]s with coordinates in centimetres and stops there.
//! Writing them as treatment records (unit conversion with
//! [`crate::geometry::to_millimeters`], record layout, integrity checksums) is up
//! to a [`PlanEncoder`] implementation.
use crate::delivery::plan::Field;
use crate::error::Result;

/// Consumes the fields of a plan in order.
pub trait PlanEncoder {
    fn encode_field(&mut self, field: &Field) -> Result<()>;

    /// Called once after the last field.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<F> PlanEncoder for F
where
    F: FnMut(&Field) -> Result<()>,
{
    fn encode_field(&mut self, field: &Field) -> Result<()> {
        self(field)
    }
}
