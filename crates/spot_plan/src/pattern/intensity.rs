//! 8-bit grayscale intensity grids and their resampling.
//!
//! Row 0 is the first row as stored, which for decoded images is the top of
//! the picture. [`IntensityGrid::flip_vertical`] converts to a bottom-up layout.
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Resampling filter used when scaling a grid to the spot resolution.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Resample {
    Nearest,
    #[default]
    Bilinear,
}

/// Row-major 8-bit grayscale grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IntensityGrid {
    /// Create a grid from row-major samples.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidConfig(format!(
                "intensity grid {width}x{height} needs {expected} samples, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Decode an image file and convert it to 8-bit luma.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?.to_luma8();
        debug!(
            "Loaded intensity image '{}' ({} x {}).",
            path.display(),
            img.width(),
            img.height()
        );
        Ok(Self::from_luma(img))
    }

    pub fn from_luma(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Intensity at column `x`, row `y`. Panics when out of range.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Mirror rows so that row 0 becomes the last row.
    pub fn flip_vertical(&self) -> Self {
        let w = self.width as usize;
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(w.max(1)).rev() {
            data.extend_from_slice(row);
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Scale to `width` x `height` with the `image` crate's resize filters.
    ///
    /// [`Resample::Bilinear`] uses the triangle filter, whose support widens with
    /// the shrink factor, so features narrower than one output pixel still lighten
    /// it instead of vanishing.
    pub fn resample(&self, width: u32, height: u32, filter: Resample) -> Self {
        if self.is_empty() || width == 0 || height == 0 {
            return Self::from_fn(width, height, |_, _| 0);
        }
        let filter = match filter {
            Resample::Nearest => FilterType::Nearest,
            Resample::Bilinear => FilterType::Triangle,
        };
        Self::from_luma(imageops::resize(&self.to_luma(), width, height, filter))
    }

    fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.get(x, y)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> IntensityGrid {
        IntensityGrid::new(2, 2, vec![0, 100, 200, 255]).unwrap()
    }

    #[test]
    fn new_checks_sample_count() {
        assert!(IntensityGrid::new(2, 2, vec![0; 3]).is_err());
        assert!(IntensityGrid::new(0, 0, Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = IntensityGrid::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(grid.as_raw(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.get(2, 1), 12);
    }

    #[test]
    fn flip_vertical_reverses_rows() {
        let flipped = ramp().flip_vertical();
        assert_eq!(flipped.as_raw(), &[200, 255, 0, 100]);
        assert_eq!(flipped.flip_vertical(), ramp());
    }

    #[test]
    fn identity_resample_preserves_samples() {
        let grid = ramp();
        assert_eq!(grid.resample(2, 2, Resample::Nearest), grid);
        assert_eq!(grid.resample(2, 2, Resample::Bilinear), grid);
    }

    #[test]
    fn nearest_upsample_replicates_blocks() {
        let up = ramp().resample(4, 4, Resample::Nearest);
        assert_eq!(up.get(0, 0), 0);
        assert_eq!(up.get(1, 1), 0);
        assert_eq!(up.get(3, 0), 100);
        assert_eq!(up.get(0, 3), 200);
        assert_eq!(up.get(3, 3), 255);
    }

    #[test]
    fn bilinear_downsample_averages() {
        let grid = IntensityGrid::new(2, 1, vec![0, 200]).unwrap();
        let down = grid.resample(1, 1, Resample::Bilinear);
        assert_eq!(down.as_raw(), &[100]);
    }

    #[test]
    fn bilinear_downsample_keeps_thin_features() {
        // One dark column out of ten must still darken its output pixel.
        let grid = IntensityGrid::from_fn(20, 1, |x, _| if x == 9 { 0 } else { 255 });
        let down = grid.resample(2, 1, Resample::Bilinear);
        assert!(down.get(0, 0) < 255);
    }

    #[test]
    fn bilinear_upsample_stays_within_source_range() {
        let up = ramp().resample(7, 5, Resample::Bilinear);
        assert_eq!(up.width(), 7);
        assert_eq!(up.height(), 5);
        assert!(up.as_raw().iter().all(|v| *v <= 255));
        assert_eq!(up.get(0, 0), 0);
        assert_eq!(up.get(6, 4), 255);
    }

    #[test]
    fn resample_to_zero_size_is_empty() {
        assert!(ramp().resample(0, 3, Resample::Bilinear).is_empty());
    }

    #[test]
    fn from_luma_keeps_dimensions() {
        let img = GrayImage::from_raw(3, 1, vec![1, 2, 3]).unwrap();
        let grid = IntensityGrid::from_luma(img);
        assert_eq!((grid.width(), grid.height()), (3, 1));
        assert_eq!(grid.as_raw(), &[1, 2, 3]);
    }

    #[test]
    fn open_missing_file_fails() {
        let err = IntensityGrid::open("/nonexistent/field-mask.png").unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }
}
