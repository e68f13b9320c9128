//! Raster-image mask pattern: a grayscale image used as a relative dose map.
//!
//! Dark pixels deliver more weight than bright ones (`w = 1 - intensity / 255`),
//! and only pixels whose weight falls strictly inside the [`ActivationWindow`]
//! become spots.
use std::borrow::Cow;
use std::path::PathBuf;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::MAX_AXIS_SAMPLES;
use crate::pattern::intensity::{IntensityGrid, Resample};
use crate::pattern::rectangle::validate_bounds;
use crate::pattern::SpotPattern;
use crate::spots::SpotSet;

/// Largest 8-bit intensity; maps to weight 0.
pub const MAX_INTENSITY: f64 = 255.0;

/// Inverted intensity-to-weight mapping.
#[inline]
pub fn intensity_to_weight(intensity: u8) -> f64 {
    1.0 - intensity as f64 / MAX_INTENSITY
}

/// Open interval `(lower, upper)` a pixel weight must fall in to become a spot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivationWindow {
    pub lower: f64,
    pub upper: f64,
}

impl ActivationWindow {
    pub const DEFAULT: Self = Self {
        lower: 0.01,
        upper: 1.0,
    };

    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn admits(&self, weight: f64) -> bool {
        self.lower < weight && weight < self.upper
    }

    pub fn validate(&self) -> Result<()> {
        let ok = self.lower.is_finite()
            && self.upper.is_finite()
            && 0.0 <= self.lower
            && self.lower < self.upper
            && self.upper <= 1.0;
        if !ok {
            return Err(Error::InvalidConfig(format!(
                "activation window ({}, {}) must satisfy 0 <= lower < upper <= 1",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

impl Default for ActivationWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Vertical layout of the source grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Row 0 is the top of the picture, as decoded images are. Rows are flipped
    /// once so that row 0 maps to `xy_min.y`.
    #[default]
    TopDown,
    /// Row 0 already maps to `xy_min.y`.
    BottomUp,
}

/// Where the intensity grid comes from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// Image file decoded during generation.
    Path(PathBuf),
    Grid(IntensityGrid),
}

impl ImageSource {
    fn load(&self) -> Result<Cow<'_, IntensityGrid>> {
        match self {
            ImageSource::Path(path) => IntensityGrid::open(path).map(Cow::Owned),
            ImageSource::Grid(grid) => Ok(Cow::Borrowed(grid)),
        }
    }
}

impl From<IntensityGrid> for ImageSource {
    fn from(grid: IntensityGrid) -> Self {
        ImageSource::Grid(grid)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

/// Spots from a grayscale image stretched over `[xy_min, xy_max]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePattern {
    pub source: ImageSource,
    /// Lower-left corner in cm.
    pub xy_min: DVec2,
    /// Upper-right corner in cm.
    pub xy_max: DVec2,
    /// Spot spacing in cm, also the size of one resampled pixel.
    pub spacing: f64,
    pub activation: ActivationWindow,
    pub resample: Resample,
    pub row_order: RowOrder,
}

impl ImagePattern {
    pub fn new(
        source: impl Into<ImageSource>,
        xy_min: impl Into<DVec2>,
        xy_max: impl Into<DVec2>,
        spacing: f64,
    ) -> Self {
        Self {
            source: source.into(),
            xy_min: xy_min.into(),
            xy_max: xy_max.into(),
            spacing,
            activation: ActivationWindow::DEFAULT,
            resample: Resample::default(),
            row_order: RowOrder::default(),
        }
    }

    pub fn with_activation(mut self, activation: ActivationWindow) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_resample(mut self, resample: Resample) -> Self {
        self.resample = resample;
        self
    }

    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    /// Pixel resolution implied by the bounds and spacing.
    pub fn target_size(&self) -> (u32, u32) {
        let extent = self.xy_max - self.xy_min;
        let w = (extent.x / self.spacing).round().max(0.0) as u32;
        let h = (extent.y / self.spacing).round().max(0.0) as u32;
        (w, h)
    }

    pub fn validate(&self) -> Result<()> {
        validate_bounds(self.xy_min, self.xy_max)?;
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(Error::InvalidSpacing(self.spacing));
        }
        let extent = self.xy_max - self.xy_min;
        if extent.max_element() / self.spacing > MAX_AXIS_SAMPLES as f64 {
            return Err(Error::InvalidSpacing(self.spacing));
        }
        self.activation.validate()
    }
}

impl SpotPattern for ImagePattern {
    fn generate(&self) -> Result<SpotSet> {
        self.validate()?;
        let source = self.source.load()?;
        if source.is_empty() {
            return Err(Error::InvalidConfig("intensity image has no pixels".into()));
        }

        let (w, h) = self.target_size();
        debug!(
            "Resampling {} x {} image to {} x {} spots ({:?}).",
            source.width(),
            source.height(),
            w,
            h,
            self.resample
        );
        let resampled = source.resample(w, h, self.resample);
        let grid = match self.row_order {
            RowOrder::TopDown => resampled.flip_vertical(),
            RowOrder::BottomUp => resampled,
        };

        let mut coordinates = Vec::new();
        let mut weights = Vec::new();
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let weight = intensity_to_weight(grid.get(col, row));
                if !self.activation.admits(weight) {
                    continue;
                }
                coordinates.push(col as f64 * self.spacing + self.xy_min.x);
                coordinates.push(row as f64 * self.spacing + self.xy_min.y);
                weights.push(weight);
            }
        }

        SpotSet::new(coordinates, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> IntensityGrid {
        // 16 x 1 strip from black to white.
        IntensityGrid::from_fn(16, 1, |x, _| (x * 17) as u8)
    }

    #[test]
    fn weights_are_inverted_intensity() {
        assert_eq!(intensity_to_weight(0), 1.0);
        assert_eq!(intensity_to_weight(255), 0.0);
        assert!(intensity_to_weight(10) > intensity_to_weight(11));
    }

    #[test]
    fn retained_weights_lie_strictly_inside_window() {
        let pattern = ImagePattern::new(gradient(), DVec2::ZERO, DVec2::new(16.0, 1.0), 1.0)
            .with_resample(Resample::Nearest);
        let spots = pattern.generate().unwrap();

        // Black (weight 1.0) and white (weight 0.0) are both outside (0.01, 1.0).
        assert_eq!(spots.len(), 14);
        for w in spots.weights() {
            assert!(0.01 < *w && *w < 1.0);
        }
        assert_eq!(spots.coordinates().len(), 2 * spots.weights().len());
    }

    #[test]
    fn weight_decreases_with_intensity() {
        let pattern = ImagePattern::new(gradient(), DVec2::ZERO, DVec2::new(16.0, 1.0), 1.0)
            .with_resample(Resample::Nearest);
        let spots = pattern.generate().unwrap();
        // Intensity grows with x, so weight must shrink with x.
        let pts: Vec<DVec2> = spots.positions().collect();
        for i in 1..spots.len() {
            assert!(pts[i].x > pts[i - 1].x);
            assert!(spots.weights()[i] < spots.weights()[i - 1]);
        }
    }

    #[test]
    fn coordinates_follow_index_times_spacing_plus_min() {
        let grid = IntensityGrid::new(2, 1, vec![128, 64]).unwrap();
        let pattern = ImagePattern::new(grid, DVec2::new(-1.0, 3.0), DVec2::new(0.0, 3.5), 0.5)
            .with_resample(Resample::Nearest);
        let spots = pattern.generate().unwrap();
        assert_eq!(spots.coordinates(), &[-1.0, 3.0, -0.5, 3.0]);
    }

    #[test]
    fn top_down_rows_are_flipped_once() {
        // Dark pixel in the top row of the picture.
        let grid = IntensityGrid::new(1, 2, vec![10, 255]).unwrap();
        let top_down = ImagePattern::new(grid.clone(), DVec2::ZERO, DVec2::new(1.0, 2.0), 1.0)
            .with_resample(Resample::Nearest)
            .generate()
            .unwrap();
        assert_eq!(top_down.coordinates(), &[0.0, 1.0]);

        let bottom_up = ImagePattern::new(grid, DVec2::ZERO, DVec2::new(1.0, 2.0), 1.0)
            .with_resample(Resample::Nearest)
            .with_row_order(RowOrder::BottomUp)
            .generate()
            .unwrap();
        assert_eq!(bottom_up.coordinates(), &[0.0, 0.0]);
    }

    #[test]
    fn target_size_rounds_extent_over_spacing() {
        let pattern = ImagePattern::new(gradient(), DVec2::ZERO, DVec2::new(10.0, 4.9), 1.0);
        assert_eq!(pattern.target_size(), (10, 5));
    }

    #[test]
    fn custom_window_narrows_selection() {
        let pattern = ImagePattern::new(gradient(), DVec2::ZERO, DVec2::new(16.0, 1.0), 1.0)
            .with_resample(Resample::Nearest)
            .with_activation(ActivationWindow::new(0.5, 0.9));
        let spots = pattern.generate().unwrap();
        assert!(!spots.is_empty());
        assert!(spots.weights().iter().all(|w| 0.5 < *w && *w < 0.9));
    }

    #[test]
    fn rejects_invalid_window_and_spacing() {
        let bad_window = ImagePattern::new(gradient(), DVec2::ZERO, DVec2::ONE, 0.1)
            .with_activation(ActivationWindow::new(0.8, 0.2));
        assert!(matches!(
            bad_window.generate().unwrap_err(),
            Error::InvalidConfig(_)
        ));

        let bad_spacing = ImagePattern::new(gradient(), DVec2::ZERO, DVec2::ONE, 0.0);
        assert!(matches!(
            bad_spacing.generate().unwrap_err(),
            Error::InvalidSpacing(_)
        ));
    }

    #[test]
    fn empty_image_is_rejected() {
        let grid = IntensityGrid::new(0, 0, Vec::new()).unwrap();
        let err = ImagePattern::new(grid, DVec2::ZERO, DVec2::ONE, 0.5)
            .generate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn shrinking_keeps_lines_narrower_than_a_spot() {
        // 100 x 4 white strip with a 3 px black line, shrunk ten-fold.
        let grid =
            IntensityGrid::from_fn(100, 4, |x, _| if (48..=50).contains(&x) { 0 } else { 255 });
        let spots = ImagePattern::new(grid, DVec2::ZERO, DVec2::new(10.0, 4.0), 1.0)
            .generate()
            .unwrap();

        assert!(!spots.is_empty());
        for (p, w) in spots.positions().zip(spots.weights()) {
            assert!(p.x == 4.0 || p.x == 5.0, "unexpected spot at {p}");
            assert!(0.01 < *w && *w < 0.5);
        }
    }

    #[test]
    fn spacing_too_fine_for_the_field_is_rejected() {
        let err = ImagePattern::new(gradient(), DVec2::ZERO, DVec2::new(16.0, 1.0), 1e-9)
            .generate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSpacing(_)));
    }

    #[test]
    fn decodes_image_files() {
        let path = std::env::temp_dir().join(format!(
            "spot_plan_raster_{}.png",
            std::process::id()
        ));
        let img = image::GrayImage::from_raw(2, 1, vec![0, 128]).unwrap();
        img.save(&path).unwrap();

        let spots = ImagePattern::new(path.clone(), DVec2::ZERO, DVec2::new(2.0, 1.0), 1.0)
            .with_resample(Resample::Nearest)
            .generate()
            .unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(spots.len(), 1);
        assert_eq!(spots.coordinates(), &[1.0, 0.0]);
        assert!((spots.weights()[0] - (1.0 - 128.0 / 255.0)).abs() < 1e-12);
    }
}
