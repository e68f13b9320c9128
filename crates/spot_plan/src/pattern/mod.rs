//! Pattern generators that turn a field description into a [`SpotSet`].
//!
//! Three strategies are provided:
//! - [`RectanglePattern`]: square or hexagonal lattice over a rectangle, uniform weights.
//! - [`DiscPattern`]: square lattice clipped to a closed disc, uniform weights.
//! - [`ImagePattern`]: grayscale intensity image used as an inverted dose mask.
//!
//! [`FieldSpec`] is the tagged union over the three and dispatches to the matching
//! strategy. [`FieldConfig`] is the flat attribute bag accepted from configuration
//! files and converted into a [`FieldSpec`].
use crate::error::Result;
use crate::spots::SpotSet;

pub mod config;
pub mod disc;
pub mod intensity;
pub mod raster;
pub mod rectangle;
pub mod spec;

pub use config::FieldConfig;
pub use disc::DiscPattern;
pub use intensity::{IntensityGrid, Resample};
pub use raster::{ActivationWindow, ImagePattern, ImageSource, RowOrder};
pub use rectangle::{LatticeMode, RectanglePattern};
pub use spec::{FieldSpec, ShapeTag};

/// Weight assigned to every spot by the uniform generators.
pub const UNIFORM_WEIGHT: f64 = 1.0;

/// Trait for spot pattern generation.
///
/// Implementations are deterministic: identical inputs yield identical spot
/// sets, in identical order.
pub trait SpotPattern: Send + Sync {
    fn generate(&self) -> Result<SpotSet>;
}

impl<T: SpotPattern + ?Sized> SpotPattern for Box<T> {
    fn generate(&self) -> Result<SpotSet> {
        (**self).generate()
    }
}
